// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in structured-log sinks.
//!
//! * [`TracingSink`] forwards audit events into the `tracing` ecosystem so
//!   whatever subscriber the host installed (console, file, remote) gets them.
//! * [`MemorySink`] keeps events in memory for inspection.

mod memory;
mod tracing_sink;

pub use memory::MemorySink;
pub use tracing_sink::TracingSink;
