// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while resolving step insertion constraints into a total order
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderingError {
    /// Two steps (or a step and an anchor) share the same id
    #[error("Duplicate step id: '{step_id}'")]
    DuplicateStepId { step_id: String },

    /// A step asks to be placed before/after a step that was never registered
    #[error("Step '{step_id}' references '{missing_step}' which is not registered")]
    UnresolvedStepReference {
        step_id: String,
        missing_step: String,
    },

    /// The before/after constraints contradict each other
    #[error("Cyclic step ordering detected: {}", cycle.join(" -> "))]
    CyclicOrdering { cycle: Vec<String> },
}
