// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use super::step_ids::{CAPTURE_SAGA_RESULTING_MESSAGES, SEND_MESSAGE};
use crate::context::OutgoingContext;
use crate::errors::HandlerError;
use crate::pipeline::well_known::DISPATCH_MESSAGE_TO_TRANSPORT;
use crate::pipeline::{Next, StepRegistration};
use crate::saga::SagaAuditAccumulator;
use crate::traits::Stage;

/// Adds each outgoing message to the open saga audit record, if any.
pub struct CaptureSagaResultingMessagesStage;

impl CaptureSagaResultingMessagesStage {
    /// Placed right after the send stage, which must also be registered.
    pub fn registration() -> StepRegistration<OutgoingContext> {
        Self::standalone_registration().insert_after(SEND_MESSAGE)
    }

    /// For pipelines without the send stage.
    pub fn standalone_registration() -> StepRegistration<OutgoingContext> {
        StepRegistration::new(
            CAPTURE_SAGA_RESULTING_MESSAGES,
            Self,
            "Reports messages outgoing from a saga",
        )
        .insert_before(DISPATCH_MESSAGE_TO_TRANSPORT)
    }
}

#[async_trait]
impl Stage<OutgoingContext> for CaptureSagaResultingMessagesStage {
    async fn invoke(
        &self,
        ctx: &mut OutgoingContext,
        next: Next<'_, OutgoingContext>,
    ) -> Result<(), HandlerError> {
        SagaAuditAccumulator::record_outgoing(ctx);
        next.run(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::sinks::MemorySink;
    use crate::logging::LoggerRegistry;
    use crate::message::{Headers, LogicalMessage, RoutingStrategy};
    use crate::pipeline::PipelineBuilder;
    use crate::saga::SagaAuditRecord;
    use crate::stages::test_support::CountingTerminal;
    use crate::stages::SendMessageStage;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn appends_to_open_record_and_orders_after_send() {
        let registry = Arc::new(LoggerRegistry::new(Arc::new(MemorySink::new()), "Sales"));
        let terminal = Arc::new(CountingTerminal::default());

        // Registered first on purpose: the after-constraint must still win.
        let pipeline = PipelineBuilder::new("outgoing")
            .anchor(DISPATCH_MESSAGE_TO_TRANSPORT)
            .register(CaptureSagaResultingMessagesStage::registration())
            .register(SendMessageStage::registration(registry))
            .build(terminal.clone())
            .unwrap();

        assert_eq!(
            pipeline.step_ids(),
            &[SEND_MESSAGE, CAPTURE_SAGA_RESULTING_MESSAGES, DISPATCH_MESSAGE_TO_TRANSPORT]
        );

        let mut ctx = OutgoingContext::new(
            "m2",
            Headers::new(),
            LogicalMessage::new("Confirm", json!({})),
            vec![RoutingStrategy::unicast("billing")],
        )
        .with_saga_audit(Some(SagaAuditRecord::open("OrderSaga")));

        pipeline.invoke(&mut ctx).await.unwrap();

        let record = ctx.take_saga_audit().unwrap();
        assert_eq!(record.resulting_messages.len(), 1);
        assert_eq!(record.resulting_messages[0].destination.as_deref(), Some("billing"));
        assert_eq!(terminal.calls(), 1);
    }
}
