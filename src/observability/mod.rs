// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for the crate's own diagnostics.
//!
//! Audit events (message received/sent, saga executed) go through
//! [`crate::logging`] to a structured-log sink. This module covers the other
//! kind of logging: what the tracing machinery itself is doing, reported
//! through `tracing`. Message types follow a struct-based pattern with a
//! `Display` implementation to:
//!
//! * Keep message text out of call sites
//! * Keep field names consistent between the text and the structured fields
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::pipeline` - Pipeline composition and step ordering
//! * `messages::saga` - Saga audit skip/abandon decisions
//! * `messages::sink` - Sink and property capture failures
//! * `messages::endpoint` - Endpoint harness message processing
//!
//! # Usage
//!
//! ```rust
//! use bus_tracing::observability::messages::{pipeline::PipelineComposed, StructuredLog};
//!
//! let steps = vec!["SerilogReceiveMessage", "MutateIncomingMessages"];
//! PipelineComposed {
//!     pipeline: "incoming",
//!     steps: &steps,
//! }
//! .log();
//! ```

pub mod messages;
