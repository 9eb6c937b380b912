// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Transport header keys and helpers for reading typed values out of them.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashMap;

/// Transport headers. Insertion order carries no meaning.
pub type Headers = HashMap<String, String>;

pub const MESSAGE_ID: &str = "NServiceBus.MessageId";
pub const MESSAGE_INTENT: &str = "NServiceBus.MessageIntent";
pub const ORIGINATING_ENDPOINT: &str = "NServiceBus.OriginatingEndpoint";
pub const ORIGINATING_MACHINE: &str = "NServiceBus.OriginatingMachine";
pub const TIME_SENT: &str = "NServiceBus.TimeSent";
pub const IS_SAGA_TIMEOUT_MESSAGE: &str = "NServiceBus.IsSagaTimeoutMessage";
pub const ENCLOSED_MESSAGE_TYPES: &str = "NServiceBus.EnclosedMessageTypes";
pub const REPLY_TO_ADDRESS: &str = "NServiceBus.ReplyToAddress";

/// Saga lineage: `;`-joined `<sagaId>:<New|Updated|Completed>` markers.
pub const SAGA_STATE_CHANGE: &str = "NServiceBus.Serilog.Tracing.SagaStateChange";

/// Wire format of [`TIME_SENT`], always UTC.
pub const TIME_SENT_FORMAT: &str = "%Y-%m-%d %H:%M:%S:%6f Z";

pub fn format_time_sent(time: DateTime<Utc>) -> String {
    time.format(TIME_SENT_FORMAT).to_string()
}

/// Parses a [`TIME_SENT`] value. Malformed values yield `None`.
pub fn parse_time_sent(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIME_SENT_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Reads and parses the [`TIME_SENT`] header.
pub fn time_sent(headers: &Headers) -> Option<DateTime<Utc>> {
    headers.get(TIME_SENT).and_then(|value| parse_time_sent(value))
}

/// True when the message was raised by a saga timeout.
pub fn is_saga_timeout_message(headers: &Headers) -> bool {
    headers
        .get(IS_SAGA_TIMEOUT_MESSAGE)
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}
