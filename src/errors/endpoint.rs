// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{join_errors, HandlerError, OrderingError};

/// Errors surfaced by the in-process endpoint harness
#[derive(Debug, Error)]
pub enum EndpointError {
    /// One of the endpoint's pipelines could not be composed
    #[error("The {pipeline} pipeline could not be composed: {}", join_errors(.errors))]
    Composition {
        pipeline: &'static str,
        errors: Vec<OrderingError>,
    },

    /// The transport message is missing a header the endpoint needs
    #[error("Transport message '{message_id}' is missing header '{header}'")]
    MissingHeader { message_id: String, header: String },

    /// No handler is registered for the incoming message type
    #[error("No handlers registered for message type '{message_type}'")]
    NoHandlers { message_type: String },

    /// The handler pipeline failed; the error is passed through unchanged
    #[error(transparent)]
    Handler(#[from] HandlerError),
}
