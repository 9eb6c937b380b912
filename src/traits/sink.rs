// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::SinkError;
use crate::logging::{LogEvent, LogLevel};

/// Destination for structured audit events.
///
/// Supplied by the host: console, file and remote aggregators all live
/// behind this trait. `is_enabled` is consulted before any event is built so
/// callers can skip constructing expensive properties.
pub trait LogSink: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_enabled(&self, level: LogLevel) -> bool;

    fn emit(&self, event: &LogEvent) -> Result<(), SinkError>;
}
