// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the endpoint harness.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An incoming message is about to enter the incoming pipeline.
///
/// # Log Level
/// `debug!` - Per-message detail
pub struct MessageProcessingStarted<'a> {
    pub endpoint: &'a str,
    pub message_type: &'a str,
    pub message_id: &'a str,
    pub handler_count: usize,
}

impl Display for MessageProcessingStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Endpoint '{}' processing {} {} with {} handler(s)",
            self.endpoint, self.message_type, self.message_id, self.handler_count
        )
    }
}

impl StructuredLog for MessageProcessingStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            endpoint = self.endpoint,
            message_type = self.message_type,
            message_id = self.message_id,
            handler_count = self.handler_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "process_message",
            span_name = name,
            endpoint = self.endpoint,
            message_type = self.message_type,
            message_id = self.message_id,
        )
    }
}

/// A handler failed; the error is returned to the caller unchanged.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use bus_tracing::errors::HandlerError;
/// use bus_tracing::observability::messages::endpoint::MessageProcessingFailed;
///
/// let error = HandlerError::failed("OrderSaga", "payment declined");
/// let msg = MessageProcessingFailed {
///     endpoint: "Sales",
///     message_id: "m1",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct MessageProcessingFailed<'a> {
    pub endpoint: &'a str,
    pub message_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for MessageProcessingFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Endpoint '{}' failed to process {}: {}",
            self.endpoint, self.message_id, self.error
        )
    }
}

impl StructuredLog for MessageProcessingFailed<'_> {
    fn log(&self) {
        tracing::error!(
            endpoint = self.endpoint,
            message_id = self.message_id,
            error = %self.error,
            "{}", self
        );
    }
}
