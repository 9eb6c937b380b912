// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::SinkError;
use crate::logging::{LogEvent, LogLevel};
use crate::traits::LogSink;

/// Captures events in memory.
///
/// Also counts `is_enabled` probes, which lets callers verify that work was
/// skipped when a level is switched off.
pub struct MemorySink {
    minimum_level: LogLevel,
    events: Mutex<Vec<LogEvent>>,
    enabled_checks: AtomicUsize,
}

impl MemorySink {
    /// A sink accepting every level.
    pub fn new() -> Self {
        Self::with_minimum_level(LogLevel::Verbose)
    }

    pub fn with_minimum_level(minimum_level: LogLevel) -> Self {
        Self {
            minimum_level,
            events: Mutex::new(Vec::new()),
            enabled_checks: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every captured event, oldest first.
    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    /// Events whose `SourceContext` equals `category`.
    pub fn events_for(&self, category: &str) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|event| event.source_context() == Some(category))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// How many times `is_enabled` has been called.
    pub fn enabled_checks(&self) -> usize {
        self.enabled_checks.load(Ordering::Relaxed)
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_enabled(&self, level: LogLevel) -> bool {
        self.enabled_checks.fetch_add(1, Ordering::Relaxed);
        level >= self.minimum_level
    }

    fn emit(&self, event: &LogEvent) -> Result<(), SinkError> {
        self.lock().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{Logger, SOURCE_CONTEXT};
    use std::sync::Arc;

    #[test]
    fn filters_by_category() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::new(sink.clone());

        logger.for_context(SOURCE_CONTEXT, "MessageSent").information("a");
        logger.for_context(SOURCE_CONTEXT, "MessageReceived").information("b");
        logger.for_context(SOURCE_CONTEXT, "MessageSent").information("c");

        let sent = sink.events_for("MessageSent");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].message_template, "c");
        assert_eq!(sink.len(), 3);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn counts_enabled_probes() {
        let sink = MemorySink::with_minimum_level(LogLevel::Warning);
        assert!(!sink.is_enabled(LogLevel::Information));
        assert!(sink.is_enabled(LogLevel::Error));
        assert_eq!(sink.enabled_checks(), 2);
    }
}
