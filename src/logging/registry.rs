// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use dashmap::DashMap;
use std::sync::Arc;

use super::{LogLevel, Logger, PROCESSING_ENDPOINT, SOURCE_CONTEXT};
use crate::traits::LogSink;

/// Process-lifetime cache of category loggers.
///
/// Every logger handed out is bound to `SourceContext = <category>` and
/// `ProcessingEndpoint = <endpoint name>`. Concurrent first calls for the
/// same category may both build a logger, but only one is stored and every
/// caller receives that one. Entries are never evicted.
pub struct LoggerRegistry {
    root: Logger,
    endpoint_name: String,
    loggers: DashMap<String, Logger>,
}

impl LoggerRegistry {
    pub fn new(sink: Arc<dyn LogSink>, endpoint_name: impl Into<String>) -> Self {
        Self {
            root: Logger::new(sink),
            endpoint_name: endpoint_name.into(),
            loggers: DashMap::new(),
        }
    }

    /// Applies a minimum level to every logger this registry creates.
    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.root = self.root.with_minimum_level(level);
        self
    }

    pub fn get_logger(&self, category: &str) -> Logger {
        if let Some(logger) = self.loggers.get(category) {
            return logger.value().clone();
        }

        self.loggers
            .entry(category.to_string())
            .or_insert_with(|| {
                self.root
                    .for_context(SOURCE_CONTEXT, category)
                    .for_context(PROCESSING_ENDPOINT, self.endpoint_name.as_str())
            })
            .value()
            .clone()
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    /// Number of categories created so far.
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::sinks::MemorySink;
    use serde_json::json;
    use std::sync::Barrier;

    #[test]
    fn loggers_are_bound_to_category_and_endpoint() {
        let sink = Arc::new(MemorySink::new());
        let registry = LoggerRegistry::new(sink.clone(), "Sales");

        registry.get_logger("MessageReceived").information("hello");

        let event = &sink.events()[0];
        assert_eq!(event.source_context(), Some("MessageReceived"));
        assert_eq!(event.property(PROCESSING_ENDPOINT), Some(&json!("Sales")));
    }

    #[test]
    fn loggers_are_memoized_per_category() {
        let registry = LoggerRegistry::new(Arc::new(MemorySink::new()), "Sales");

        registry.get_logger("MessageReceived");
        registry.get_logger("MessageReceived");
        registry.get_logger("MessageSent");

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn concurrent_first_calls_share_one_logger() {
        const CALLERS: usize = 8;
        let registry = Arc::new(LoggerRegistry::new(Arc::new(MemorySink::new()), "Sales"));
        let barrier = Arc::new(Barrier::new(CALLERS));

        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    registry.get_logger("SagaAudit")
                })
            })
            .collect();

        let loggers: Vec<Logger> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
        let stored = registry.get_logger("SagaAudit");

        for logger in &loggers {
            assert!(logger.shares_properties_with(&stored));
            assert_eq!(logger.property(SOURCE_CONTEXT), Some(&json!("SagaAudit")));
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_categories_get_distinct_loggers() {
        let registry = LoggerRegistry::new(Arc::new(MemorySink::new()), "Sales");

        let received = registry.get_logger("MessageReceived");
        assert!(received.shares_properties_with(&registry.get_logger("MessageReceived")));
        assert!(!received.shares_properties_with(&registry.get_logger("MessageSent")));
    }
}
