// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message envelopes as seen by the tracing stages.
//!
//! A [`LogicalMessage`] is the typed, already-deserialized message a handler
//! works with; a [`TransportMessage`] is what arrives at or leaves the
//! endpoint. Header keys in [`headers`] are a wire contract shared with
//! existing log consumers and must not change.

mod envelope;
pub mod headers;
mod intent;
mod routing;

pub use envelope::{DispatchedMessage, LogicalMessage, TransportMessage};
pub use headers::Headers;
pub use intent::MessageIntent;
pub use routing::{resolve_unicast_destination, RoutingStrategy};
