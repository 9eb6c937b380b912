// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::OutgoingDispatcher;
use crate::context::{IncomingContext, InvokeHandlerContext, OutgoingContext};
use crate::errors::HandlerError;
use crate::message::headers::SAGA_STATE_CHANGE;
use crate::pipeline::Pipeline;
use crate::traits::{MessageHandler, Terminal};

/// Handlers per message type.
pub type HandlerMap = HashMap<String, Vec<Arc<dyn MessageHandler>>>;

/// End of the outgoing pipeline: hands the message to the transport.
pub struct DispatchToTransport;

#[async_trait]
impl Terminal<OutgoingContext> for DispatchToTransport {
    async fn handle(&self, ctx: &mut OutgoingContext) -> Result<(), HandlerError> {
        ctx.mark_dispatched();
        Ok(())
    }
}

/// End of the handler pipeline: calls the handler.
pub struct InvokeHandler;

#[async_trait]
impl Terminal<InvokeHandlerContext> for InvokeHandler {
    async fn handle(&self, ctx: &mut InvokeHandlerContext) -> Result<(), HandlerError> {
        let handler = ctx.handler();
        handler.handle(ctx).await
    }
}

/// End of the incoming pipeline: runs the handler pipeline once per handler.
///
/// Each invocation sees the headers as left by the previous one, so saga
/// lineage accumulates across handlers of the same message. The first
/// failing invocation stops the rest and nothing is released.
pub struct InvokeHandlers {
    handlers: Arc<HandlerMap>,
    pipeline: Pipeline<InvokeHandlerContext>,
    dispatcher: Arc<OutgoingDispatcher>,
}

impl InvokeHandlers {
    pub fn new(
        handlers: Arc<HandlerMap>,
        pipeline: Pipeline<InvokeHandlerContext>,
        dispatcher: Arc<OutgoingDispatcher>,
    ) -> Self {
        Self {
            handlers,
            pipeline,
            dispatcher,
        }
    }

    pub fn pipeline(&self) -> &Pipeline<InvokeHandlerContext> {
        &self.pipeline
    }
}

#[async_trait]
impl Terminal<IncomingContext> for InvokeHandlers {
    async fn handle(&self, ctx: &mut IncomingContext) -> Result<(), HandlerError> {
        let handlers = self
            .handlers
            .get(ctx.message.message_type())
            .map(Vec::as_slice)
            .unwrap_or_default();

        for handler in handlers {
            let mut invocation = InvokeHandlerContext::new(
                ctx.message_id.clone(),
                ctx.headers.clone(),
                ctx.message.clone(),
                Arc::clone(handler),
                Arc::clone(&self.dispatcher),
            );

            self.pipeline.invoke(&mut invocation).await?;

            let lineage = invocation.headers.get(SAGA_STATE_CHANGE).cloned();
            let mut dispatched = invocation.into_dispatched();

            if let Some(lineage) = lineage {
                for outgoing in &mut dispatched {
                    outgoing
                        .message
                        .headers
                        .insert(SAGA_STATE_CHANGE.to_string(), lineage.clone());
                }
                ctx.headers.insert(SAGA_STATE_CHANGE.to_string(), lineage);
            }

            ctx.dispatched.extend(dispatched);
        }

        Ok(())
    }
}
