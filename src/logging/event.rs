// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::LogLevel;

/// Property naming the logical log stream an event belongs to.
pub const SOURCE_CONTEXT: &str = "SourceContext";
/// Property naming the endpoint that produced an event.
pub const PROCESSING_ENDPOINT: &str = "ProcessingEndpoint";

/// One structured log event: template, level and a property bag.
///
/// Scalar properties are flat JSON values; bodies, initiators, resulting
/// messages and saga state are nested JSON objects or arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message_template: String,
    pub properties: BTreeMap<String, Value>,
}

impl LogEvent {
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Convenience accessor for string-valued properties.
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    pub fn source_context(&self) -> Option<&str> {
        self.property_str(SOURCE_CONTEXT)
    }

    /// Renders the template, substituting `{Name}` placeholders with property
    /// values. Placeholders without a matching property are left as written.
    pub fn render(&self) -> String {
        let template = self.message_template.as_str();
        let mut rendered = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            match after_open.find('}') {
                Some(close) => {
                    let name = &after_open[..close];
                    match self.properties.get(name) {
                        Some(Value::String(text)) => rendered.push_str(text),
                        Some(value) => rendered.push_str(&value.to_string()),
                        None => {
                            rendered.push('{');
                            rendered.push_str(name);
                            rendered.push('}');
                        }
                    }
                    rest = &after_open[close + 1..];
                }
                None => {
                    rendered.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        rendered.push_str(rest);
        rendered
    }
}
