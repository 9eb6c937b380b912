// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline composition events.

use crate::errors::OrderingError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A pipeline was composed and its steps put in their final order.
///
/// # Log Level
/// `debug!` - Startup detail
///
/// # Example
/// ```
/// use bus_tracing::observability::messages::pipeline::PipelineComposed;
///
/// let steps = vec!["SerilogSendMessage", "DispatchMessageToTransport"];
/// let msg = PipelineComposed {
///     pipeline: "outgoing",
///     steps: &steps,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct PipelineComposed<'a> {
    pub pipeline: &'a str,
    pub steps: &'a [&'a str],
}

impl Display for PipelineComposed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Composed {} pipeline: {}",
            self.pipeline,
            self.steps.join(" -> ")
        )
    }
}

impl StructuredLog for PipelineComposed<'_> {
    fn log(&self) {
        tracing::debug!(
            pipeline = self.pipeline,
            step_count = self.steps.len(),
            steps = self.steps.join(" -> "),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "pipeline",
            span_name = name,
            pipeline = self.pipeline,
            step_count = self.steps.len(),
        )
    }
}

/// A registered step took its place in a composed pipeline.
///
/// # Log Level
/// `trace!` - Startup detail, one per step
pub struct StepPlaced<'a> {
    pub step: &'a str,
    pub position: usize,
    pub description: &'a str,
}

impl Display for StepPlaced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Step {} at position {}: {}", self.step, self.position, self.description)
    }
}

impl StructuredLog for StepPlaced<'_> {
    fn log(&self) {
        tracing::trace!(
            step = self.step,
            position = self.position,
            description = self.description,
            "{}", self
        );
    }
}

/// Step insertion constraints could not be resolved.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use bus_tracing::errors::OrderingError;
/// use bus_tracing::observability::messages::pipeline::StepOrderingFailed;
///
/// let errors = vec![OrderingError::DuplicateStepId { step_id: "Audit".to_string() }];
/// let msg = StepOrderingFailed {
///     pipeline: "incoming",
///     errors: &errors,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct StepOrderingFailed<'a> {
    pub pipeline: &'a str,
    pub errors: &'a [OrderingError],
}

impl Display for StepOrderingFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to order steps of the {} pipeline: {}",
            self.pipeline,
            crate::errors::join_errors(self.errors)
        )
    }
}

impl StructuredLog for StepOrderingFailed<'_> {
    fn log(&self) {
        tracing::error!(
            pipeline = self.pipeline,
            error_count = self.errors.len(),
            "{}", self
        );
    }
}
