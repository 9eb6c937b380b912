// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::message::{DispatchedMessage, Headers, LogicalMessage, RoutingStrategy, TransportMessage};
use crate::saga::SagaAuditRecord;

/// One message on its way out of the endpoint.
///
/// `message` is `None` for control messages, which carry headers only.
#[derive(Debug, Clone)]
pub struct OutgoingContext {
    pub message_id: String,
    pub headers: Headers,
    pub routing_strategies: Vec<RoutingStrategy>,
    message: Option<LogicalMessage>,
    saga_audit: Option<SagaAuditRecord>,
    dispatched: Option<DispatchedMessage>,
}

impl OutgoingContext {
    pub fn new(
        message_id: impl Into<String>,
        headers: Headers,
        message: LogicalMessage,
        routing_strategies: Vec<RoutingStrategy>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            headers,
            routing_strategies,
            message: Some(message),
            saga_audit: None,
            dispatched: None,
        }
    }

    /// A headers-only message with no logical body.
    pub fn control(
        message_id: impl Into<String>,
        headers: Headers,
        routing_strategies: Vec<RoutingStrategy>,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            headers,
            routing_strategies,
            message: None,
            saga_audit: None,
            dispatched: None,
        }
    }

    /// Carries the in-flight saga audit record, if any, for this send.
    pub fn with_saga_audit(mut self, saga_audit: Option<SagaAuditRecord>) -> Self {
        self.saga_audit = saga_audit;
        self
    }

    pub fn message(&self) -> Option<&LogicalMessage> {
        self.message.as_ref()
    }

    pub fn saga_audit_mut(&mut self) -> Option<&mut SagaAuditRecord> {
        self.saga_audit.as_mut()
    }

    /// Hands the saga audit record back to the invocation that owns it.
    pub fn take_saga_audit(&mut self) -> Option<SagaAuditRecord> {
        self.saga_audit.take()
    }

    /// Records that the transport accepted the message.
    pub fn mark_dispatched(&mut self) {
        let body = self
            .message
            .as_ref()
            .map(|message| message.body().clone())
            .unwrap_or_default();

        self.dispatched = Some(DispatchedMessage {
            message: TransportMessage::new(self.message_id.clone(), self.headers.clone(), body),
            routing: self.routing_strategies.clone(),
        });
    }

    pub fn is_dispatched(&self) -> bool {
        self.dispatched.is_some()
    }

    /// The dispatched message, unless a stage stopped it before the transport.
    pub fn into_dispatched(self) -> Option<DispatchedMessage> {
        self.dispatched
    }
}
