// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use super::categories::SAGA_AUDIT;
use super::step_ids::CAPTURE_SAGA_STATE;
use crate::context::InvokeHandlerContext;
use crate::errors::HandlerError;
use crate::logging::{LogLevel, Logger, LoggerRegistry};
use crate::message::headers::{
    is_saga_timeout_message, time_sent, MESSAGE_ID, ORIGINATING_ENDPOINT, ORIGINATING_MACHINE,
};
use crate::message::MessageIntent;
use crate::observability::messages::saga::{SagaAuditAbandoned, SagaAuditSkipped};
use crate::observability::messages::StructuredLog;
use crate::pipeline::well_known::INVOKE_SAGA;
use crate::pipeline::{Next, StepRegistration};
use crate::saga::{append_saga_state_change, SagaAuditRecord, SagaChangeInitiator};
use crate::traits::Stage;

const TEMPLATE: &str = "Saga execution {SagaType} {SagaId}";

/// Wraps a saga handler invocation and emits one audit event for it.
///
/// ```text
/// NotStarted ─ no saga ──────────────▶ Skipped
///            ─ Information disabled ─▶ Skipped
///            ─ open ─▶ Opened ─ handler ─▶ Closed ─ no message id ─▶ Abandoned
///                                                 ─ otherwise ────▶ Emitted
/// ```
///
/// A failing handler leaves the record unemitted; the error goes back to the
/// host as-is.
pub struct CaptureSagaStateStage {
    logger: Logger,
}

impl CaptureSagaStateStage {
    pub fn new(registry: &LoggerRegistry) -> Self {
        Self {
            logger: registry.get_logger(SAGA_AUDIT),
        }
    }

    pub fn registration(registry: &LoggerRegistry) -> StepRegistration<InvokeHandlerContext> {
        StepRegistration::new(CAPTURE_SAGA_STATE, Self::new(registry), "Records saga state changes")
            .insert_before(INVOKE_SAGA)
    }

    fn audit_saga(&self, ctx: &mut InvokeHandlerContext, mut record: SagaAuditRecord) {
        let Some(saga) = ctx.saga().cloned() else {
            return;
        };

        let Some(message_id) = ctx.headers.get(MESSAGE_ID).cloned() else {
            SagaAuditAbandoned {
                saga_type: saga.saga_type(),
                saga_id: saga.saga_id(),
            }
            .log();
            return;
        };

        let initiator = SagaChangeInitiator {
            initiating_message_id: message_id,
            message_type: ctx.message.message_type().to_string(),
            is_saga_timeout_message: is_saga_timeout_message(&ctx.headers),
            originating_machine: ctx.headers.get(ORIGINATING_MACHINE).cloned(),
            originating_endpoint: ctx.headers.get(ORIGINATING_ENDPOINT).cloned(),
            time_sent: time_sent(&ctx.headers),
            intent: MessageIntent::from_headers(&ctx.headers),
        };

        record.is_new = saga.is_new();
        record.is_completed = saga.is_completed();
        record.saga_id = Some(saga.saga_id().to_string());
        record.saga_state = Some(saga.entity().clone());
        record.initiator = Some(initiator);

        append_saga_state_change(&mut ctx.headers, saga.saga_id(), record.state_change());

        self.logger
            .for_context("SagaId", saga.saga_id())
            .for_context("SagaType", record.saga_type.as_str())
            .for_context_structured("StartTime", &record.start_time)
            .for_context_structured("FinishTime", &record.finish_time)
            .for_context("IsCompleted", record.is_completed)
            .for_context("IsNew", record.is_new)
            .for_context_structured("Initiator", &record.initiator)
            .for_context_structured("ResultingMessages", &record.resulting_messages)
            .for_context_structured("SagaState", &record.saga_state)
            .information(TEMPLATE);
    }
}

#[async_trait]
impl Stage<InvokeHandlerContext> for CaptureSagaStateStage {
    async fn invoke(
        &self,
        ctx: &mut InvokeHandlerContext,
        next: Next<'_, InvokeHandlerContext>,
    ) -> Result<(), HandlerError> {
        let Some(saga_type) = ctx.saga().map(|saga| saga.saga_type().to_string()) else {
            return next.run(ctx).await;
        };

        if !self.logger.is_enabled(LogLevel::Information) {
            let handler = ctx.handler();
            SagaAuditSkipped {
                saga_type: &saga_type,
                handler: handler.name(),
            }
            .log();
            return next.run(ctx).await;
        }

        ctx.attach_saga_audit(SagaAuditRecord::open(saga_type));
        let result = next.run(ctx).await;
        let record = ctx.detach_saga_audit();
        result?;

        if let Some(mut record) = record {
            record.close();
            self.audit_saga(ctx, record);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{DispatchToTransport, InvokeHandler, OutgoingDispatcher};
    use crate::logging::sinks::MemorySink;
    use crate::message::headers::SAGA_STATE_CHANGE;
    use crate::message::{Headers, LogicalMessage};
    use crate::pipeline::{Pipeline, PipelineBuilder};
    use crate::saga::ActiveSagaInstance;
    use crate::stages::CaptureSagaResultingMessagesStage;
    use crate::traits::MessageHandler;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct OrderSaga {
        is_saga: bool,
        fail: bool,
        saw_audit_record: AtomicBool,
    }

    #[async_trait]
    impl MessageHandler for OrderSaga {
        fn name(&self) -> &str {
            "OrderSaga"
        }

        fn activate_saga(&self, _message: &LogicalMessage, _headers: &Headers) -> Option<ActiveSagaInstance> {
            self.is_saga
                .then(|| ActiveSagaInstance::started("OrderSaga", "s1", json!({"order_id": "o-1"})))
        }

        async fn handle(&self, ctx: &mut InvokeHandlerContext) -> Result<(), HandlerError> {
            self.saw_audit_record
                .store(ctx.saga_audit().is_some(), Ordering::SeqCst);
            ctx.send_to("billing", "Confirm", &json!({"order_id": "o-1"})).await?;
            if self.fail {
                return Err(HandlerError::failed("OrderSaga", "payment declined"));
            }
            Ok(())
        }
    }

    struct Harness {
        sink: Arc<MemorySink>,
        pipeline: Pipeline<InvokeHandlerContext>,
        dispatcher: Arc<OutgoingDispatcher>,
    }

    fn harness(sink: MemorySink) -> Harness {
        let sink = Arc::new(sink);
        let registry = LoggerRegistry::new(sink.clone(), "Sales");

        let outgoing = PipelineBuilder::new("outgoing")
            .anchor(crate::pipeline::well_known::DISPATCH_MESSAGE_TO_TRANSPORT)
            .register(CaptureSagaResultingMessagesStage::standalone_registration())
            .build(Arc::new(DispatchToTransport))
            .unwrap();
        let dispatcher = Arc::new(OutgoingDispatcher::new(outgoing, "Sales", "sales-01", HashMap::new()));

        let pipeline = PipelineBuilder::new("handler")
            .anchor(INVOKE_SAGA)
            .register(CaptureSagaStateStage::registration(&registry))
            .build(Arc::new(InvokeHandler))
            .unwrap();

        Harness {
            sink,
            pipeline,
            dispatcher,
        }
    }

    fn incoming_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert(MESSAGE_ID.to_string(), "m1".to_string());
        headers.insert(ORIGINATING_ENDPOINT.to_string(), "Web".to_string());
        headers.insert(ORIGINATING_MACHINE.to_string(), "web-01".to_string());
        headers.insert("NServiceBus.MessageIntent".to_string(), "Send".to_string());
        headers
    }

    impl Harness {
        fn context(&self, headers: Headers, handler: Arc<OrderSaga>) -> InvokeHandlerContext {
            InvokeHandlerContext::new(
                "m1",
                headers,
                LogicalMessage::new("CreateUser", json!({"user_name": "jsmith"})),
                handler,
                Arc::clone(&self.dispatcher),
            )
        }
    }

    #[tokio::test]
    async fn emits_one_audit_event_for_a_saga_invocation() {
        let harness = harness(MemorySink::new());
        let handler = Arc::new(OrderSaga {
            is_saga: true,
            ..Default::default()
        });
        let mut ctx = harness.context(incoming_headers(), handler.clone());

        harness.pipeline.invoke(&mut ctx).await.unwrap();

        assert!(handler.saw_audit_record.load(Ordering::SeqCst));
        assert!(ctx.saga_audit().is_none());
        assert_eq!(ctx.headers.get(SAGA_STATE_CHANGE).map(String::as_str), Some("s1:New"));

        let events = harness.sink.events_for(SAGA_AUDIT);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.message_template, TEMPLATE);
        assert_eq!(event.render(), "Saga execution OrderSaga s1");
        assert_eq!(event.property_str("SagaId"), Some("s1"));
        assert_eq!(event.property_str("SagaType"), Some("OrderSaga"));
        assert_eq!(event.property("IsNew"), Some(&json!(true)));
        assert_eq!(event.property("IsCompleted"), Some(&json!(false)));
        assert_eq!(event.property("SagaState"), Some(&json!({"order_id": "o-1"})));

        let initiator = event.property("Initiator").unwrap();
        assert_eq!(initiator["InitiatingMessageId"], "m1");
        assert_eq!(initiator["MessageType"], "CreateUser");
        assert_eq!(initiator["OriginatingEndpoint"], "Web");
        assert_eq!(initiator["OriginatingMachine"], "web-01");
        assert_eq!(initiator["Intent"], "Send");
        assert_eq!(initiator["IsSagaTimeoutMessage"], false);
        assert_eq!(initiator["TimeSent"], Value::Null);

        let resulting = event.property("ResultingMessages").unwrap().as_array().unwrap();
        assert_eq!(resulting.len(), 1);
        assert_eq!(resulting[0]["MessageType"], "Confirm");
        assert_eq!(resulting[0]["Destination"], "billing");
        assert_eq!(
            resulting[0]["ResultingMessageId"].as_str(),
            Some(ctx.dispatched()[0].message.message_id.as_str())
        );

        let start = event.property_str("StartTime").unwrap();
        let finish = event.property_str("FinishTime").unwrap();
        let start = chrono::DateTime::parse_from_rfc3339(start).unwrap();
        let finish = chrono::DateTime::parse_from_rfc3339(finish).unwrap();
        assert!(finish >= start);
    }

    #[tokio::test]
    async fn non_saga_handlers_are_not_audited() {
        let harness = harness(MemorySink::new());
        let handler = Arc::new(OrderSaga::default());
        let mut ctx = harness.context(incoming_headers(), handler.clone());

        harness.pipeline.invoke(&mut ctx).await.unwrap();

        assert!(!handler.saw_audit_record.load(Ordering::SeqCst));
        assert!(harness.sink.is_empty());
        assert!(!ctx.headers.contains_key(SAGA_STATE_CHANGE));
        assert_eq!(harness.sink.enabled_checks(), 0);
    }

    #[tokio::test]
    async fn disabled_information_level_opens_no_record() {
        let harness = harness(MemorySink::with_minimum_level(LogLevel::Warning));
        let handler = Arc::new(OrderSaga {
            is_saga: true,
            ..Default::default()
        });
        let mut ctx = harness.context(incoming_headers(), handler.clone());

        harness.pipeline.invoke(&mut ctx).await.unwrap();

        assert!(!handler.saw_audit_record.load(Ordering::SeqCst));
        assert!(harness.sink.is_empty());
        assert_eq!(harness.sink.enabled_checks(), 1);
        assert_eq!(ctx.dispatched().len(), 1);
    }

    #[tokio::test]
    async fn failed_handler_emits_no_audit_and_returns_its_error() {
        let harness = harness(MemorySink::new());
        let handler = Arc::new(OrderSaga {
            is_saga: true,
            fail: true,
            ..Default::default()
        });
        let mut ctx = harness.context(incoming_headers(), handler);

        let error = harness.pipeline.invoke(&mut ctx).await.unwrap_err();

        assert!(matches!(error, HandlerError::Failed { ref reason, .. } if reason == "payment declined"));
        assert!(harness.sink.is_empty());
        assert!(ctx.saga_audit().is_none());
        assert!(!ctx.headers.contains_key(SAGA_STATE_CHANGE));
    }

    #[tokio::test]
    async fn missing_message_id_abandons_the_audit() {
        let harness = harness(MemorySink::new());
        let handler = Arc::new(OrderSaga {
            is_saga: true,
            ..Default::default()
        });
        let mut headers = incoming_headers();
        headers.remove(MESSAGE_ID);
        let mut ctx = harness.context(headers, handler);

        harness.pipeline.invoke(&mut ctx).await.unwrap();

        assert!(harness.sink.is_empty());
        assert!(!ctx.headers.contains_key(SAGA_STATE_CHANGE));
    }
}
