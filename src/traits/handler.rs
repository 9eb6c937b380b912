// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::context::InvokeHandlerContext;
use crate::errors::HandlerError;
use crate::message::{Headers, LogicalMessage};
use crate::saga::ActiveSagaInstance;

/// Application code invoked for one incoming message type.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    fn name(&self) -> &str;

    /// The saga instance this invocation targets, if the handler is a saga.
    ///
    /// Loading and persisting saga state belongs to the host; returning
    /// `Some` here is what marks the invocation as saga-active.
    fn activate_saga(
        &self,
        _message: &LogicalMessage,
        _headers: &Headers,
    ) -> Option<ActiveSagaInstance> {
        None
    }

    async fn handle(&self, ctx: &mut InvokeHandlerContext) -> Result<(), HandlerError>;
}
