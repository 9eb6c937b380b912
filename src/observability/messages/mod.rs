// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for the crate's diagnostic logging.
//!
//! Each message type implements `Display` for the human-readable text and
//! [`StructuredLog`] to emit itself at its documented level with its fields
//! attached.

use tracing::Span;

pub mod endpoint;
pub mod pipeline;
pub mod saga;
pub mod sink;

/// A diagnostic message that knows its level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its documented level.
    fn log(&self);

    /// A span carrying the message's fields. Messages that never open a
    /// span keep the disabled default.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}
