// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::HandlerError;
use crate::traits::{Stage, Terminal};

/// Continuation handed to a stage: the rest of the pipeline.
pub struct Next<'a, C> {
    stages: &'a [Arc<dyn Stage<C>>],
    terminal: &'a dyn Terminal<C>,
}

impl<'a, C: Send> Next<'a, C> {
    pub(crate) fn new(stages: &'a [Arc<dyn Stage<C>>], terminal: &'a dyn Terminal<C>) -> Self {
        Self { stages, terminal }
    }

    /// Runs the remaining stages, then the terminal.
    pub async fn run(self, ctx: &mut C) -> Result<(), HandlerError> {
        match self.stages.split_first() {
            Some((stage, rest)) => stage.invoke(ctx, Next::new(rest, self.terminal)).await,
            None => self.terminal.handle(ctx).await,
        }
    }
}
