// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Severity of a structured audit event, lowest first.
///
/// Serializes under the names [`LogLevel::as_str`] returns; config files may
/// also spell them in snake_case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LogLevel {
    #[serde(alias = "verbose")]
    Verbose,
    #[serde(alias = "debug")]
    Debug,
    #[default]
    #[serde(alias = "information")]
    Information,
    #[serde(alias = "warning")]
    Warning,
    #[serde(alias = "error")]
    Error,
    #[serde(alias = "fatal")]
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "Verbose",
            LogLevel::Debug => "Debug",
            LogLevel::Information => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
