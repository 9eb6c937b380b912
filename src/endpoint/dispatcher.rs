// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use crate::context::OutgoingContext;
use crate::errors::HandlerError;
use crate::message::headers::{
    format_time_sent, ENCLOSED_MESSAGE_TYPES, MESSAGE_ID, MESSAGE_INTENT, ORIGINATING_ENDPOINT,
    ORIGINATING_MACHINE, REPLY_TO_ADDRESS, TIME_SENT,
};
use crate::message::{DispatchedMessage, Headers, LogicalMessage, MessageIntent, RoutingStrategy};
use crate::pipeline::Pipeline;
use crate::saga::SagaAuditRecord;

/// Runs outgoing messages through the outgoing pipeline.
pub struct OutgoingDispatcher {
    pipeline: Pipeline<OutgoingContext>,
    endpoint_name: String,
    machine: String,
    routes: HashMap<String, Vec<String>>,
}

impl OutgoingDispatcher {
    pub fn new(
        pipeline: Pipeline<OutgoingContext>,
        endpoint_name: impl Into<String>,
        machine: impl Into<String>,
        routes: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            pipeline,
            endpoint_name: endpoint_name.into(),
            machine: machine.into(),
            routes,
        }
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    pub fn machine(&self) -> &str {
        &self.machine
    }

    /// Configured destinations for `message_type`; empty when unrouted.
    pub fn routes_for(&self, message_type: &str) -> &[String] {
        self.routes.get(message_type).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn pipeline(&self) -> &Pipeline<OutgoingContext> {
        &self.pipeline
    }

    /// Stamps the standard headers on `message` and sends it.
    ///
    /// The open saga audit record, if any, is moved into the outgoing context
    /// for the duration of the send and handed back afterwards, whether or
    /// not the send succeeded. Returns `None` when a stage stopped the
    /// message before it reached the transport.
    pub async fn dispatch(
        &self,
        message: LogicalMessage,
        intent: MessageIntent,
        routing: Vec<RoutingStrategy>,
        saga_audit: &mut Option<SagaAuditRecord>,
    ) -> Result<Option<DispatchedMessage>, HandlerError> {
        let message_id = Uuid::new_v4().to_string();
        let headers = self.outgoing_headers(&message_id, message.message_type(), intent);

        let mut ctx = OutgoingContext::new(message_id, headers, message, routing)
            .with_saga_audit(saga_audit.take());

        let result = self.pipeline.invoke(&mut ctx).await;
        *saga_audit = ctx.take_saga_audit();
        result?;

        Ok(ctx.into_dispatched())
    }

    fn outgoing_headers(&self, message_id: &str, message_type: &str, intent: MessageIntent) -> Headers {
        let mut headers = Headers::new();
        headers.insert(MESSAGE_ID.to_string(), message_id.to_string());
        headers.insert(MESSAGE_INTENT.to_string(), intent.as_str().to_string());
        headers.insert(ORIGINATING_ENDPOINT.to_string(), self.endpoint_name.clone());
        headers.insert(ORIGINATING_MACHINE.to_string(), self.machine.clone());
        headers.insert(TIME_SENT.to_string(), format_time_sent(Utc::now()));
        headers.insert(ENCLOSED_MESSAGE_TYPES.to_string(), message_type.to_string());
        headers.insert(REPLY_TO_ADDRESS.to_string(), self.endpoint_name.clone());
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::DispatchToTransport;
    use crate::message::headers::parse_time_sent;
    use crate::pipeline::PipelineBuilder;
    use serde_json::json;
    use std::sync::Arc;

    fn dispatcher() -> OutgoingDispatcher {
        let pipeline = PipelineBuilder::new("outgoing")
            .build(Arc::new(DispatchToTransport))
            .unwrap();
        let mut routes = HashMap::new();
        routes.insert("Confirm".to_string(), vec!["billing".to_string()]);
        OutgoingDispatcher::new(pipeline, "Sales", "sales-01", routes)
    }

    #[tokio::test]
    async fn dispatch_stamps_standard_headers() {
        let dispatcher = dispatcher();
        let mut saga_audit = None;

        let dispatched = dispatcher
            .dispatch(
                LogicalMessage::new("Confirm", json!({"order_id": "o-1"})),
                MessageIntent::Send,
                vec![RoutingStrategy::unicast("billing")],
                &mut saga_audit,
            )
            .await
            .unwrap()
            .unwrap();

        let message = &dispatched.message;
        assert_eq!(message.header(MESSAGE_ID), Some(message.message_id.as_str()));
        assert_eq!(message.header(MESSAGE_INTENT), Some("Send"));
        assert_eq!(message.header(ORIGINATING_ENDPOINT), Some("Sales"));
        assert_eq!(message.header(ORIGINATING_MACHINE), Some("sales-01"));
        assert_eq!(message.header(REPLY_TO_ADDRESS), Some("Sales"));
        assert_eq!(message.message_type(), Some("Confirm"));
        assert!(message.header(TIME_SENT).and_then(parse_time_sent).is_some());
        assert_eq!(message.body, json!({"order_id": "o-1"}));
        assert_eq!(dispatched.destinations(), vec!["billing"]);
    }

    #[tokio::test]
    async fn saga_audit_record_is_handed_back() {
        let dispatcher = dispatcher();
        let mut saga_audit = Some(SagaAuditRecord::open("OrderSaga"));

        dispatcher
            .dispatch(
                LogicalMessage::new("Confirm", json!({})),
                MessageIntent::Send,
                vec![RoutingStrategy::unicast("billing")],
                &mut saga_audit,
            )
            .await
            .unwrap();

        assert_eq!(saga_audit.map(|record| record.saga_type), Some("OrderSaga".to_string()));
    }

    #[test]
    fn unrouted_message_types_have_no_destinations() {
        let dispatcher = dispatcher();
        assert_eq!(dispatcher.routes_for("Confirm"), &["billing".to_string()]);
        assert!(dispatcher.routes_for("ShipOrder").is_empty());
    }
}
