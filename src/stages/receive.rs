// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use super::categories::MESSAGE_RECEIVED;
use super::step_ids::RECEIVE_MESSAGE;
use crate::context::IncomingContext;
use crate::errors::HandlerError;
use crate::logging::{LogLevel, LoggerRegistry};
use crate::pipeline::well_known::MUTATE_INCOMING_MESSAGES;
use crate::pipeline::{Next, StepRegistration};
use crate::traits::Stage;

const TEMPLATE: &str = "Receive message {MessageType} {MessageId}";

/// Logs every received message before any mutator touches it.
pub struct ReceiveMessageStage {
    registry: Arc<LoggerRegistry>,
}

impl ReceiveMessageStage {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registration(registry: Arc<LoggerRegistry>) -> StepRegistration<IncomingContext> {
        StepRegistration::new(RECEIVE_MESSAGE, Self::new(registry), "Logs incoming messages")
            .insert_before(MUTATE_INCOMING_MESSAGES)
    }
}

#[async_trait]
impl Stage<IncomingContext> for ReceiveMessageStage {
    async fn invoke(
        &self,
        ctx: &mut IncomingContext,
        next: Next<'_, IncomingContext>,
    ) -> Result<(), HandlerError> {
        let logger = self.registry.get_logger(MESSAGE_RECEIVED);
        if logger.is_enabled(LogLevel::Information) {
            logger
                .with_headers(&ctx.headers)
                .for_context("Message", ctx.message.body().clone())
                .for_context("MessageType", ctx.message.message_type())
                .for_context("MessageId", ctx.message_id.as_str())
                .information(TEMPLATE);
        }

        next.run(ctx).await
    }
}
