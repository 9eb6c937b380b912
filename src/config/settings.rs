// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::TracingConfig;
use crate::logging::LogLevel;
use crate::traits::LogSink;

/// Everything an endpoint needs to wire the tracing stages.
///
/// The default sink is passed in explicitly at startup; there is no global.
/// A tracing target, when set, replaces it for audit events only.
#[derive(Clone)]
pub struct TracingSettings {
    endpoint_name: String,
    default_sink: Arc<dyn LogSink>,
    tracing_target: Option<Arc<dyn LogSink>>,
    minimum_level: LogLevel,
    message_audit: bool,
    saga_audit: bool,
    originating_machine: Option<String>,
    routes: HashMap<String, Vec<String>>,
}

impl TracingSettings {
    pub fn new(endpoint_name: impl Into<String>, default_sink: Arc<dyn LogSink>) -> Self {
        Self {
            endpoint_name: endpoint_name.into(),
            default_sink,
            tracing_target: None,
            minimum_level: LogLevel::default(),
            message_audit: true,
            saga_audit: true,
            originating_machine: None,
            routes: HashMap::new(),
        }
    }

    pub fn from_config(cfg: &TracingConfig, default_sink: Arc<dyn LogSink>) -> Self {
        Self {
            minimum_level: cfg.minimum_level,
            message_audit: cfg.message_audit,
            saga_audit: cfg.saga_audit,
            originating_machine: cfg.originating_machine.clone(),
            routes: cfg.routes.clone(),
            ..Self::new(cfg.endpoint_name.clone(), default_sink)
        }
    }

    /// Sends audit events to `sink` instead of the default sink.
    pub fn with_tracing_target(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.tracing_target = Some(sink);
        self
    }

    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.minimum_level = level;
        self
    }

    pub fn with_message_audit(mut self, enabled: bool) -> Self {
        self.message_audit = enabled;
        self
    }

    pub fn with_saga_audit(mut self, enabled: bool) -> Self {
        self.saga_audit = enabled;
        self
    }

    pub fn with_originating_machine(mut self, machine: impl Into<String>) -> Self {
        self.originating_machine = Some(machine.into());
        self
    }

    /// The sink audit events go to: the tracing target if set, else the default.
    pub fn effective_sink(&self) -> Arc<dyn LogSink> {
        Arc::clone(self.tracing_target.as_ref().unwrap_or(&self.default_sink))
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    pub fn minimum_level(&self) -> LogLevel {
        self.minimum_level
    }

    pub fn message_audit(&self) -> bool {
        self.message_audit
    }

    pub fn saga_audit(&self) -> bool {
        self.saga_audit
    }

    pub fn originating_machine(&self) -> Option<&str> {
        self.originating_machine.as_deref()
    }

    pub fn routes(&self) -> &HashMap<String, Vec<String>> {
        &self.routes
    }
}

impl fmt::Debug for TracingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingSettings")
            .field("endpoint_name", &self.endpoint_name)
            .field("sink", &self.effective_sink().name())
            .field("minimum_level", &self.minimum_level)
            .field("message_audit", &self.message_audit)
            .field("saga_audit", &self.saga_audit)
            .field("originating_machine", &self.originating_machine)
            .field("routes", &self.routes)
            .finish()
    }
}
