// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use super::headers::{Headers, MESSAGE_INTENT};

/// Why a message was put on the wire, as carried in the intent header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageIntent {
    Send,
    Publish,
    Subscribe,
    Unsubscribe,
    Reply,
}

impl MessageIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageIntent::Send => "Send",
            MessageIntent::Publish => "Publish",
            MessageIntent::Subscribe => "Subscribe",
            MessageIntent::Unsubscribe => "Unsubscribe",
            MessageIntent::Reply => "Reply",
        }
    }

    /// Parses a header value. Unknown intents yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Send" => Some(MessageIntent::Send),
            "Publish" => Some(MessageIntent::Publish),
            "Subscribe" => Some(MessageIntent::Subscribe),
            "Unsubscribe" => Some(MessageIntent::Unsubscribe),
            "Reply" => Some(MessageIntent::Reply),
            _ => None,
        }
    }

    /// Reads the intent header, if present and recognised.
    pub fn from_headers(headers: &Headers) -> Option<Self> {
        headers.get(MESSAGE_INTENT).and_then(|value| Self::parse(value))
    }
}

impl Display for MessageIntent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
