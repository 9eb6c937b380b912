// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use super::categories::MESSAGE_SENT;
use super::step_ids::SEND_MESSAGE;
use crate::context::OutgoingContext;
use crate::errors::HandlerError;
use crate::logging::{LogLevel, LoggerRegistry};
use crate::pipeline::well_known::DISPATCH_MESSAGE_TO_TRANSPORT;
use crate::pipeline::{Next, StepRegistration};
use crate::traits::Stage;

const TEMPLATE: &str = "Sent message {MessageType} {MessageId}";

/// Logs every outgoing message once its headers are final.
///
/// Control messages carry no logical message and are passed through
/// without an event.
pub struct SendMessageStage {
    registry: Arc<LoggerRegistry>,
}

impl SendMessageStage {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registration(registry: Arc<LoggerRegistry>) -> StepRegistration<OutgoingContext> {
        StepRegistration::new(SEND_MESSAGE, Self::new(registry), "Logs outgoing messages")
            .insert_before(DISPATCH_MESSAGE_TO_TRANSPORT)
    }
}

#[async_trait]
impl Stage<OutgoingContext> for SendMessageStage {
    async fn invoke(
        &self,
        ctx: &mut OutgoingContext,
        next: Next<'_, OutgoingContext>,
    ) -> Result<(), HandlerError> {
        if let Some(message) = ctx.message() {
            let logger = self.registry.get_logger(MESSAGE_SENT);
            if logger.is_enabled(LogLevel::Information) {
                logger
                    .with_headers(&ctx.headers)
                    .for_context("Message", message.body().clone())
                    .for_context("MessageType", message.message_type())
                    .for_context("MessageId", ctx.message_id.as_str())
                    .information(TEMPLATE);
            }
        }

        next.run(ctx).await
    }
}
