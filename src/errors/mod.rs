// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod endpoint;
mod handler;
mod pipeline;
mod sink;

pub use config::{ConfigError, ValidationError};
pub use endpoint::EndpointError;
pub use handler::HandlerError;
pub use pipeline::OrderingError;
pub use sink::SinkError;

/// Joins a list of errors into a single line for display.
pub(crate) fn join_errors<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
