// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::sync::Arc;

use crate::endpoint::OutgoingDispatcher;
use crate::errors::HandlerError;
use crate::message::headers::REPLY_TO_ADDRESS;
use crate::message::{DispatchedMessage, Headers, LogicalMessage, MessageIntent, RoutingStrategy};
use crate::saga::{ActiveSagaInstance, SagaAuditRecord};
use crate::traits::MessageHandler;

/// One handler invocation for one received message.
///
/// Handlers send through this context. Every send runs the outgoing pipeline
/// immediately; the resulting messages are held here until the invocation
/// completes.
pub struct InvokeHandlerContext {
    pub message_id: String,
    pub headers: Headers,
    pub message: LogicalMessage,
    handler: Arc<dyn MessageHandler>,
    saga: Option<ActiveSagaInstance>,
    saga_audit: Option<SagaAuditRecord>,
    dispatcher: Arc<OutgoingDispatcher>,
    dispatched: Vec<DispatchedMessage>,
}

impl InvokeHandlerContext {
    pub fn new(
        message_id: impl Into<String>,
        headers: Headers,
        message: LogicalMessage,
        handler: Arc<dyn MessageHandler>,
        dispatcher: Arc<OutgoingDispatcher>,
    ) -> Self {
        let saga = handler.activate_saga(&message, &headers);
        Self {
            message_id: message_id.into(),
            headers,
            message,
            handler,
            saga,
            saga_audit: None,
            dispatcher,
            dispatched: Vec::new(),
        }
    }

    pub fn handler(&self) -> Arc<dyn MessageHandler> {
        Arc::clone(&self.handler)
    }

    /// The saga this invocation targets, if the handler is a saga.
    pub fn saga(&self) -> Option<&ActiveSagaInstance> {
        self.saga.as_ref()
    }

    pub fn saga_mut(&mut self) -> Option<&mut ActiveSagaInstance> {
        self.saga.as_mut()
    }

    /// The open saga audit record, if saga auditing is active.
    pub fn saga_audit(&self) -> Option<&SagaAuditRecord> {
        self.saga_audit.as_ref()
    }

    pub fn attach_saga_audit(&mut self, record: SagaAuditRecord) {
        self.saga_audit = Some(record);
    }

    pub fn detach_saga_audit(&mut self) -> Option<SagaAuditRecord> {
        self.saga_audit.take()
    }

    /// Messages sent so far during this invocation.
    pub fn dispatched(&self) -> &[DispatchedMessage] {
        &self.dispatched
    }

    pub fn into_dispatched(self) -> Vec<DispatchedMessage> {
        self.dispatched
    }

    /// Sends to every destination routed for `message_type`.
    pub async fn send<T: Serialize + ?Sized + Sync>(
        &mut self,
        message_type: &str,
        message: &T,
    ) -> Result<(), HandlerError> {
        let routing: Vec<RoutingStrategy> = self
            .dispatcher
            .routes_for(message_type)
            .iter()
            .map(RoutingStrategy::unicast)
            .collect();

        if routing.is_empty() {
            return Err(HandlerError::NoRoute {
                message_type: message_type.to_string(),
            });
        }

        self.dispatch(message_type, message, MessageIntent::Send, routing).await
    }

    pub async fn send_to<T: Serialize + ?Sized + Sync>(
        &mut self,
        destination: &str,
        message_type: &str,
        message: &T,
    ) -> Result<(), HandlerError> {
        let routing = vec![RoutingStrategy::unicast(destination)];
        self.dispatch(message_type, message, MessageIntent::Send, routing).await
    }

    /// Sends to this endpoint's own queue.
    pub async fn send_local<T: Serialize + ?Sized + Sync>(
        &mut self,
        message_type: &str,
        message: &T,
    ) -> Result<(), HandlerError> {
        let routing = vec![RoutingStrategy::unicast(self.dispatcher.endpoint_name())];
        self.dispatch(message_type, message, MessageIntent::Send, routing).await
    }

    pub async fn publish<T: Serialize + ?Sized + Sync>(
        &mut self,
        message_type: &str,
        message: &T,
    ) -> Result<(), HandlerError> {
        let routing = vec![RoutingStrategy::multicast(message_type)];
        self.dispatch(message_type, message, MessageIntent::Publish, routing).await
    }

    /// Replies to the sender of the message being handled.
    pub async fn reply<T: Serialize + ?Sized + Sync>(
        &mut self,
        message_type: &str,
        message: &T,
    ) -> Result<(), HandlerError> {
        let destination = self
            .headers
            .get(REPLY_TO_ADDRESS)
            .cloned()
            .ok_or_else(|| HandlerError::NoReplyAddress {
                message_id: self.message_id.clone(),
            })?;

        let routing = vec![RoutingStrategy::unicast(destination)];
        self.dispatch(message_type, message, MessageIntent::Reply, routing).await
    }

    async fn dispatch<T: Serialize + ?Sized + Sync>(
        &mut self,
        message_type: &str,
        message: &T,
        intent: MessageIntent,
        routing: Vec<RoutingStrategy>,
    ) -> Result<(), HandlerError> {
        let logical = LogicalMessage::from_serializable(message_type, message).map_err(|source| {
            HandlerError::Serialization {
                message_type: message_type.to_string(),
                source,
            }
        })?;

        let dispatcher = Arc::clone(&self.dispatcher);
        if let Some(dispatched) = dispatcher
            .dispatch(logical, intent, routing, &mut self.saga_audit)
            .await?
        {
            self.dispatched.push(dispatched);
        }
        Ok(())
    }
}
