// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{LogEvent, LogLevel};
use crate::message::Headers;
use crate::observability::messages::{sink::*, StructuredLog};
use crate::traits::LogSink;

/// A handle for writing structured events to a sink.
///
/// Each `for_context*` call returns a new handle with one more bound
/// property; the receiver is left untouched, so handles can be cached and
/// shared freely. Properties bound later win over earlier ones with the
/// same name.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    minimum_level: LogLevel,
    properties: Arc<BTreeMap<String, Value>>,
}

impl Logger {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            minimum_level: LogLevel::Verbose,
            properties: Arc::new(BTreeMap::new()),
        }
    }

    /// Drops events below `level` before they reach the sink.
    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.minimum_level = level;
        self
    }

    /// Binds a scalar property.
    pub fn for_context(&self, name: &str, value: impl Into<Value>) -> Self {
        let mut logger = self.clone();
        Arc::make_mut(&mut logger.properties).insert(name.to_string(), value.into());
        logger
    }

    /// Binds a property captured as nested structured data.
    ///
    /// A value that cannot be serialized is recorded as a string describing
    /// the failure rather than aborting the event.
    pub fn for_context_structured<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Self {
        let structured = match serde_json::to_value(value) {
            Ok(structured) => structured,
            Err(error) => {
                PropertyCaptureFailed {
                    property: name,
                    error: &error,
                }
                .log();
                Value::String(format!("<unserializable: {}>", error))
            }
        };
        self.for_context(name, structured)
    }

    /// Binds every transport header as its own property.
    ///
    /// Headers never replace a property that is already bound, so a header
    /// named `SourceContext` cannot move an event out of its category.
    pub fn with_headers(&self, headers: &Headers) -> Self {
        let mut logger = self.clone();
        let properties = Arc::make_mut(&mut logger.properties);
        for (key, value) in headers {
            properties
                .entry(key.clone())
                .or_insert_with(|| Value::String(value.clone()));
        }
        logger
    }

    #[cfg(test)]
    pub(crate) fn shares_properties_with(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.properties, &other.properties)
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.minimum_level && self.sink.is_enabled(level)
    }

    pub fn information(&self, message_template: &str) {
        self.write(LogLevel::Information, message_template);
    }

    /// Emits one event with the bound properties.
    ///
    /// Sink failures stay inside this call: they are reported through
    /// `tracing` and never reach the message being processed.
    pub fn write(&self, level: LogLevel, message_template: &str) {
        if !self.is_enabled(level) {
            return;
        }

        let event = LogEvent {
            timestamp: Utc::now(),
            level,
            message_template: message_template.to_string(),
            properties: (*self.properties).clone(),
        };

        if let Err(error) = self.sink.emit(&event) {
            SinkEmitFailed {
                sink: self.sink.name(),
                message_template,
                error: &error,
            }
            .log();
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &self.sink.name())
            .field("minimum_level", &self.minimum_level)
            .field("properties", &self.properties)
            .finish()
    }
}
