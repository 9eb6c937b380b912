// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structured audit logging.
//!
//! Audit events are not ordinary diagnostics: each one carries a message
//! template with named placeholders and a property bag whose structured
//! values (message bodies, saga state, initiator data) stay nested so a log
//! aggregation backend can query them. Events flow
//!
//! ```text
//! stage → LoggerRegistry::get_logger(category) → Logger (bound properties)
//!       → LogEvent → LogSink (tracing, memory, or host-provided)
//! ```

mod event;
mod level;
mod logger;
mod registry;
pub mod sinks;

pub use event::{LogEvent, PROCESSING_ENDPOINT, SOURCE_CONTEXT};
pub use level::LogLevel;
pub use logger::Logger;
pub use registry::LoggerRegistry;
