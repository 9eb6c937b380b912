// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // tracing config + settings
pub mod context;       // per-stage invocation contexts
pub mod endpoint;      // in-process endpoint harness
pub mod errors;        // error handling
pub mod logging;       // structured events, sinks, logger registry
pub mod message;       // envelopes, headers, routing
pub mod observability; // internal diagnostics
pub mod pipeline;      // stage composition
pub mod saga;          // saga audit record + accumulator
pub mod stages;        // trace and saga capture stages
pub mod traits;        // unified abstractions
