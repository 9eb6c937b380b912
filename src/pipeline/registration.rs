// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::traits::Stage;

/// A stage together with its stable id and placement constraints.
pub struct StepRegistration<C> {
    pub(crate) id: String,
    pub(crate) description: String,
    pub(crate) stage: Arc<dyn Stage<C>>,
    pub(crate) insert_before: Vec<String>,
    pub(crate) insert_after: Vec<String>,
}

impl<C: Send + 'static> StepRegistration<C> {
    pub fn new(
        id: impl Into<String>,
        stage: impl Stage<C> + 'static,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            stage: Arc::new(stage),
            insert_before: Vec::new(),
            insert_after: Vec::new(),
        }
    }

    /// Requires this step to run before `step_id`.
    pub fn insert_before(mut self, step_id: impl Into<String>) -> Self {
        self.insert_before.push(step_id.into());
        self
    }

    /// Requires this step to run after `step_id`.
    pub fn insert_after(mut self, step_id: impl Into<String>) -> Self {
        self.insert_after.push(step_id.into());
        self
    }
}

impl<C> StepRegistration<C> {
    pub fn id(&self) -> &str {
        &self.id
    }
}
