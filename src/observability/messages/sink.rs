// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for structured-log sink failures.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// A sink failed to accept an audit event. The event is lost; message
/// processing continues.
///
/// # Log Level
/// `warn!` - Degraded behavior
///
/// # Example
/// ```
/// use bus_tracing::errors::SinkError;
/// use bus_tracing::observability::messages::sink::SinkEmitFailed;
///
/// let error = SinkError::Rejected { sink: "seq".to_string(), reason: "timeout".to_string() };
/// let msg = SinkEmitFailed {
///     sink: "seq",
///     message_template: "Sent message {MessageType} {MessageId}",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct SinkEmitFailed<'a> {
    pub sink: &'a str,
    pub message_template: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SinkEmitFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Sink '{}' failed to emit '{}': {}",
            self.sink, self.message_template, self.error
        )
    }
}

impl StructuredLog for SinkEmitFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            sink = self.sink,
            message_template = self.message_template,
            error = %self.error,
            "{}", self
        );
    }
}

/// A property value could not be captured as structured data.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct PropertyCaptureFailed<'a> {
    pub property: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PropertyCaptureFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to capture property '{}': {}",
            self.property, self.error
        )
    }
}

impl StructuredLog for PropertyCaptureFailed<'_> {
    fn log(&self) {
        tracing::warn!(property = self.property, error = %self.error, "{}", self);
    }
}
