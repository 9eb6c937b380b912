// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A minimal in-process endpoint that hosts the tracing stages.
//!
//! It composes three pipelines from the configured settings and runs
//! messages through them:
//!
//! ```text
//! process(transport message)
//!   └─ incoming:  [SerilogReceiveMessage, MutateIncomingMessages, ..] → InvokeHandlers
//!        └─ per handler: [SerilogCaptureSagaState, InvokeSaga, ..] → InvokeHandler
//!             └─ per send: [SerilogSendMessage, SerilogCaptureSagaResultingMessages,
//!                           DispatchMessageToTransport, ..] → DispatchToTransport
//! ```
//!
//! Sent messages are batched per handler invocation and released with the
//! invocation's saga lineage header once it completes. There is no real
//! transport: released messages are returned from [`Endpoint::process`].

mod builder;
mod dispatcher;
mod terminals;

pub use builder::{Endpoint, EndpointBuilder, ProcessingResult};
pub use dispatcher::OutgoingDispatcher;
pub use terminals::{DispatchToTransport, InvokeHandler, InvokeHandlers};
