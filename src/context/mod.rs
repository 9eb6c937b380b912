// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Contexts threaded through the three pipelines.
//!
//! | Pipeline | Context | Runs |
//! |----------|---------|------|
//! | incoming | [`IncomingContext`] | once per received message |
//! | handler  | [`InvokeHandlerContext`] | once per handler of that message |
//! | outgoing | [`OutgoingContext`] | once per message sent by a handler |
//!
//! The saga audit record, when one is open, travels explicitly: it lives in
//! the handler context and is moved into each outgoing context for the
//! duration of that send.

mod incoming;
mod invoke;
mod outgoing;

pub use incoming::IncomingContext;
pub use invoke::InvokeHandlerContext;
pub use outgoing::OutgoingContext;
