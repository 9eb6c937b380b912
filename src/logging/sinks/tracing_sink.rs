// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::SinkError;
use crate::logging::{LogEvent, LogLevel, PROCESSING_ENDPOINT};
use crate::traits::LogSink;

/// Forwards audit events to the installed `tracing` subscriber.
///
/// Events are emitted under the `bus_tracing::audit` target with the rendered
/// message, the source context, the processing endpoint and the full property
/// bag serialized as JSON in `properties`.
pub struct TracingSink {
    minimum_level: LogLevel,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::with_minimum_level(LogLevel::Verbose)
    }

    pub fn with_minimum_level(minimum_level: LogLevel) -> Self {
        Self { minimum_level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        if level < self.minimum_level {
            return false;
        }
        match level {
            LogLevel::Verbose => tracing::enabled!(target: "bus_tracing::audit", tracing::Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: "bus_tracing::audit", tracing::Level::DEBUG),
            LogLevel::Information => tracing::enabled!(target: "bus_tracing::audit", tracing::Level::INFO),
            LogLevel::Warning => tracing::enabled!(target: "bus_tracing::audit", tracing::Level::WARN),
            LogLevel::Error | LogLevel::Fatal => {
                tracing::enabled!(target: "bus_tracing::audit", tracing::Level::ERROR)
            }
        }
    }

    fn emit(&self, event: &LogEvent) -> Result<(), SinkError> {
        let properties = serde_json::to_string(&event.properties)?;
        let source_context = event.source_context().unwrap_or_default();
        let endpoint = event.property_str(PROCESSING_ENDPOINT).unwrap_or_default();
        let message = event.render();

        match event.level {
            LogLevel::Verbose => tracing::trace!(
                target: "bus_tracing::audit",
                source_context, endpoint, properties = %properties, "{}", message
            ),
            LogLevel::Debug => tracing::debug!(
                target: "bus_tracing::audit",
                source_context, endpoint, properties = %properties, "{}", message
            ),
            LogLevel::Information => tracing::info!(
                target: "bus_tracing::audit",
                source_context, endpoint, properties = %properties, "{}", message
            ),
            LogLevel::Warning => tracing::warn!(
                target: "bus_tracing::audit",
                source_context, endpoint, properties = %properties, "{}", message
            ),
            LogLevel::Error | LogLevel::Fatal => tracing::error!(
                target: "bus_tracing::audit",
                source_context, endpoint, severity = event.level.as_str(), properties = %properties, "{}", message
            ),
        }
        Ok(())
    }
}
