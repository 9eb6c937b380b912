// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ids of host-owned anchor steps that tracing stages position themselves
//! against.

/// Incoming pipeline: where host message mutators run.
pub const MUTATE_INCOMING_MESSAGES: &str = "MutateIncomingMessages";
/// Handler pipeline: where the saga handler is invoked.
pub const INVOKE_SAGA: &str = "InvokeSaga";
/// Outgoing pipeline: where the message leaves the process.
pub const DISPATCH_MESSAGE_TO_TRANSPORT: &str = "DispatchMessageToTransport";
