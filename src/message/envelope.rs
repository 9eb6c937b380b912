// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::headers::{Headers, ENCLOSED_MESSAGE_TYPES};
use super::routing::RoutingStrategy;

/// A deserialized message as handler code sees it.
///
/// The body is held in its structured form so the tracing stages can log it
/// as nested data rather than a flattened string. Anything implementing
/// `Serialize` can become a logical message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalMessage {
    message_type: String,
    body: Value,
}

impl LogicalMessage {
    pub fn new(message_type: impl Into<String>, body: Value) -> Self {
        Self {
            message_type: message_type.into(),
            body,
        }
    }

    /// Captures a typed message in its structured form.
    pub fn from_serializable<T: Serialize + ?Sized>(
        message_type: impl Into<String>,
        message: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(message_type, serde_json::to_value(message)?))
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Reads the body back as a typed message.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}

/// A message as it arrives at, or leaves, the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportMessage {
    pub message_id: String,
    pub headers: Headers,
    pub body: Value,
}

impl TransportMessage {
    pub fn new(message_id: impl Into<String>, headers: Headers, body: Value) -> Self {
        Self {
            message_id: message_id.into(),
            headers,
            body,
        }
    }

    /// The enclosed message type, if the header is present.
    pub fn message_type(&self) -> Option<&str> {
        self.headers.get(ENCLOSED_MESSAGE_TYPES).map(String::as_str)
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// An outgoing message that made it past the outgoing pipeline, together
/// with the routing it was dispatched with.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedMessage {
    pub message: TransportMessage,
    pub routing: Vec<RoutingStrategy>,
}

impl DispatchedMessage {
    /// Unicast addresses this message was sent to.
    pub fn destinations(&self) -> Vec<&str> {
        self.routing
            .iter()
            .filter_map(RoutingStrategy::unicast_destination)
            .collect()
    }

    pub fn is_published(&self) -> bool {
        self.routing
            .iter()
            .any(|strategy| matches!(strategy, RoutingStrategy::Multicast { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct CreateUser {
        user_name: String,
        family_name: String,
    }

    #[test]
    fn logical_message_keeps_structured_body() {
        let command = CreateUser {
            user_name: "jsmith".to_string(),
            family_name: "Smith".to_string(),
        };

        let message = LogicalMessage::from_serializable("CreateUser", &command).unwrap();

        assert_eq!(message.message_type(), "CreateUser");
        assert_eq!(message.body()["user_name"], "jsmith");
        assert_eq!(message.deserialize::<CreateUser>().unwrap(), command);
    }

    #[test]
    fn dispatched_message_reports_destinations() {
        let dispatched = DispatchedMessage {
            message: TransportMessage::new("m1", Headers::new(), Value::Null),
            routing: vec![
                RoutingStrategy::unicast("billing"),
                RoutingStrategy::multicast("OrderPlaced"),
            ],
        };

        assert_eq!(dispatched.destinations(), vec!["billing"]);
        assert!(dispatched.is_published());
    }
}
