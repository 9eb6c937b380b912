// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The tracing stages and where they sit.
//!
//! | Step id | Pipeline | Placement |
//! |---------|----------|-----------|
//! | `SerilogReceiveMessage` | incoming | before `MutateIncomingMessages` |
//! | `SerilogCaptureSagaState` | handler | before `InvokeSaga` |
//! | `SerilogSendMessage` | outgoing | before `DispatchMessageToTransport` |
//! | `SerilogCaptureSagaResultingMessages` | outgoing | after `SerilogSendMessage` |
//!
//! The step ids are kept as they are known to existing pipelines and log
//! consumers.

mod receive;
mod saga_resulting_messages;
mod saga_state;
mod send;

pub use receive::ReceiveMessageStage;
pub use saga_resulting_messages::CaptureSagaResultingMessagesStage;
pub use saga_state::CaptureSagaStateStage;
pub use send::SendMessageStage;

/// Logger categories, one per kind of audit event.
pub mod categories {
    pub const MESSAGE_RECEIVED: &str = "MessageReceived";
    pub const MESSAGE_SENT: &str = "MessageSent";
    pub const SAGA_AUDIT: &str = "SagaAudit";
}

pub mod step_ids {
    pub const RECEIVE_MESSAGE: &str = "SerilogReceiveMessage";
    pub const SEND_MESSAGE: &str = "SerilogSendMessage";
    pub const CAPTURE_SAGA_RESULTING_MESSAGES: &str = "SerilogCaptureSagaResultingMessages";
    pub const CAPTURE_SAGA_STATE: &str = "SerilogCaptureSagaState";
}
