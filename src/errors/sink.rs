// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure reported by a structured-log sink while emitting an event.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink '{sink}' rejected event: {reason}")]
    Rejected { sink: String, reason: String },

    #[error("Failed to serialize event properties: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
