// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

/// How an outgoing message will be routed once it leaves the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RoutingStrategy {
    /// Point-to-point delivery to a single address
    Unicast { destination: String },
    /// Delivery to every subscriber of the message type
    Multicast { message_type: String },
}

impl RoutingStrategy {
    pub fn unicast(destination: impl Into<String>) -> Self {
        RoutingStrategy::Unicast {
            destination: destination.into(),
        }
    }

    pub fn multicast(message_type: impl Into<String>) -> Self {
        RoutingStrategy::Multicast {
            message_type: message_type.into(),
        }
    }

    /// The unicast address, if this is a unicast strategy.
    pub fn unicast_destination(&self) -> Option<&str> {
        match self {
            RoutingStrategy::Unicast { destination } => Some(destination),
            RoutingStrategy::Multicast { .. } => None,
        }
    }
}

/// Resolves the single destination of a message.
///
/// Exactly one unicast strategy yields its address. Zero or several unicast
/// strategies cannot be attributed to one destination and yield `None`.
pub fn resolve_unicast_destination(strategies: &[RoutingStrategy]) -> Option<String> {
    let mut destinations = strategies.iter().filter_map(RoutingStrategy::unicast_destination);
    match (destinations.next(), destinations.next()) {
        (Some(destination), None) => Some(destination.to_string()),
        _ => None,
    }
}
