// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for loading and validating tracing configuration.

use std::path::PathBuf;
use thiserror::Error;

use super::join_errors;

/// Errors that can occur while validating a tracing configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The endpoint name is empty or whitespace
    #[error("Endpoint name must not be empty")]
    EmptyEndpointName,

    /// A route was declared for an empty message type
    #[error("Route declared with an empty message type")]
    EmptyRouteMessageType,

    /// A route lists no destinations, or an empty destination address
    #[error("Route for message type '{message_type}' has no usable destination")]
    EmptyRouteDestination { message_type: String },
}

/// Errors produced by `load_config` and `load_and_validate_config`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}
