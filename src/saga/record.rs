// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::state_change::SagaStateChange;
use crate::message::MessageIntent;

/// One saga handler invocation, as reported in the saga audit event.
///
/// Field names serialize in PascalCase to match the audit event's property
/// names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SagaAuditRecord {
    pub saga_id: Option<String>,
    pub saga_type: String,
    pub start_time: DateTime<Utc>,
    pub finish_time: Option<DateTime<Utc>>,
    pub is_new: bool,
    pub is_completed: bool,
    pub initiator: Option<SagaChangeInitiator>,
    pub resulting_messages: Vec<SagaChangeOutput>,
    pub saga_state: Option<Value>,
}

impl SagaAuditRecord {
    /// Starts a record for `saga_type`, timed from now.
    pub fn open(saga_type: impl Into<String>) -> Self {
        Self {
            saga_id: None,
            saga_type: saga_type.into(),
            start_time: Utc::now(),
            finish_time: None,
            is_new: false,
            is_completed: false,
            initiator: None,
            resulting_messages: Vec::new(),
            saga_state: None,
        }
    }

    /// Stamps the finish time, never earlier than the start time.
    pub fn close(&mut self) -> DateTime<Utc> {
        let finish_time = Utc::now().max(self.start_time);
        self.finish_time = Some(finish_time);
        finish_time
    }

    pub fn state_change(&self) -> SagaStateChange {
        SagaStateChange::resolve(self.is_new, self.is_completed)
    }
}

/// The message that caused a saga invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SagaChangeInitiator {
    pub initiating_message_id: String,
    pub message_type: String,
    pub is_saga_timeout_message: bool,
    pub originating_machine: Option<String>,
    pub originating_endpoint: Option<String>,
    pub time_sent: Option<DateTime<Utc>>,
    pub intent: Option<MessageIntent>,
}

/// A message sent while a saga invocation was in flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SagaChangeOutput {
    pub resulting_message_id: String,
    pub message_type: String,
    /// `None` unless exactly one unicast destination was resolved.
    pub destination: Option<String>,
    pub message_intent: Option<MessageIntent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn close_never_precedes_open() {
        let mut record = SagaAuditRecord::open("OrderSaga");
        let finish = record.close();

        assert!(finish >= record.start_time);
        assert_eq!(record.finish_time, Some(finish));
    }

    #[test]
    fn close_clamps_a_start_time_in_the_future() {
        let mut record = SagaAuditRecord::open("OrderSaga");
        record.start_time = Utc::now() + chrono::Duration::seconds(30);

        let finish = record.close();
        assert_eq!(finish, record.start_time);
    }

    #[test]
    fn resulting_messages_serialize_with_pascal_case_names() {
        let output = SagaChangeOutput {
            resulting_message_id: "m2".to_string(),
            message_type: "Confirm".to_string(),
            destination: None,
            message_intent: Some(MessageIntent::Send),
        };

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "ResultingMessageId": "m2",
                "MessageType": "Confirm",
                "Destination": null,
                "MessageIntent": "Send"
            })
        );
    }
}
