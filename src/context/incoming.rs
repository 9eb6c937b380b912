// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::message::{DispatchedMessage, Headers, LogicalMessage};

/// One received message on its way to the handlers.
#[derive(Debug, Clone)]
pub struct IncomingContext {
    pub message_id: String,
    pub headers: Headers,
    pub message: LogicalMessage,
    /// Messages sent by the handlers, released once every handler succeeded.
    pub dispatched: Vec<DispatchedMessage>,
}

impl IncomingContext {
    pub fn new(message_id: impl Into<String>, headers: Headers, message: LogicalMessage) -> Self {
        Self {
            message_id: message_id.into(),
            headers,
            message,
            dispatched: Vec::new(),
        }
    }
}
