// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors flowing through a running pipeline.
//!
//! Stages never create or swallow these; whatever the wrapped handler (or a
//! later stage) returns is handed back to the host unchanged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// The message handler reported a failure
    #[error("Handler '{handler}' failed: {reason}")]
    Failed { handler: String, reason: String },

    /// A message body could not be converted to or from its structured form
    #[error("Failed to serialize message '{message_type}': {source}")]
    Serialization {
        message_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// `send` was called for a message type with no configured destination
    #[error("No route configured for message type '{message_type}'")]
    NoRoute { message_type: String },

    /// `reply` was called but the incoming message carries no reply address
    #[error("Message '{message_id}' has no reply-to address")]
    NoReplyAddress { message_id: String },
}

impl HandlerError {
    /// Shorthand for a handler-reported failure.
    pub fn failed(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        HandlerError::Failed {
            handler: handler.into(),
            reason: reason.into(),
        }
    }
}
