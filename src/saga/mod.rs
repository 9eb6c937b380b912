// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Saga audit records and their accumulation across one handler invocation.
//!
//! A [`SagaAuditRecord`] is opened by the saga capture stage, moved into each
//! outgoing context while a message is being sent (where
//! [`SagaAuditAccumulator`] appends to it), moved back, and finally closed and
//! emitted as a single audit event. Ownership moves with the record, so it is
//! never shared and never locked.

mod accumulator;
mod instance;
mod record;
mod state_change;

pub use accumulator::SagaAuditAccumulator;
pub use instance::ActiveSagaInstance;
pub use record::{SagaAuditRecord, SagaChangeInitiator, SagaChangeOutput};
pub use state_change::{append_saga_state_change, SagaStateChange};
