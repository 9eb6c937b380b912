// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::next::Next;
use super::ordering::{resolve_order, OrderingNode};
use super::registration::StepRegistration;
use crate::errors::{HandlerError, OrderingError};
use crate::observability::messages::pipeline::{PipelineComposed, StepOrderingFailed, StepPlaced};
use crate::observability::messages::StructuredLog;
use crate::traits::{Stage, Terminal};

enum Entry<C> {
    /// A host-owned position that steps can be ordered against.
    Anchor(String),
    Step(StepRegistration<C>),
}

impl<C> Entry<C> {
    fn id(&self) -> &str {
        match self {
            Entry::Anchor(id) => id,
            Entry::Step(registration) => &registration.id,
        }
    }
}

/// Collects step registrations and resolves them into a [`Pipeline`].
pub struct PipelineBuilder<C> {
    name: &'static str,
    entries: Vec<Entry<C>>,
}

impl<C: Send + 'static> PipelineBuilder<C> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    /// Declares a host step id that registrations may reference.
    pub fn anchor(mut self, id: impl Into<String>) -> Self {
        self.entries.push(Entry::Anchor(id.into()));
        self
    }

    pub fn register(mut self, registration: StepRegistration<C>) -> Self {
        self.entries.push(Entry::Step(registration));
        self
    }

    /// Same as [`register`](Self::register) for callers holding `&mut`.
    pub fn add(&mut self, registration: StepRegistration<C>) {
        self.entries.push(Entry::Step(registration));
    }

    /// Resolves every constraint and fixes the execution order.
    ///
    /// All structural problems are reported at once; the pipeline is only
    /// built when the registrations describe exactly one consistent order.
    pub fn build(self, terminal: Arc<dyn Terminal<C>>) -> Result<Pipeline<C>, Vec<OrderingError>> {
        const NO_CONSTRAINTS: &[String] = &[];

        let nodes: Vec<OrderingNode<'_>> = self
            .entries
            .iter()
            .map(|entry| match entry {
                Entry::Anchor(id) => OrderingNode {
                    id,
                    insert_before: NO_CONSTRAINTS,
                    insert_after: NO_CONSTRAINTS,
                },
                Entry::Step(registration) => OrderingNode {
                    id: &registration.id,
                    insert_before: &registration.insert_before,
                    insert_after: &registration.insert_after,
                },
            })
            .collect();

        let order = match resolve_order(&nodes) {
            Ok(order) => order,
            Err(errors) => {
                StepOrderingFailed {
                    pipeline: self.name,
                    errors: &errors,
                }
                .log();
                return Err(errors);
            }
        };

        let step_ids: Vec<String> = order
            .iter()
            .map(|&index| self.entries[index].id().to_string())
            .collect();

        {
            let step_refs: Vec<&str> = step_ids.iter().map(String::as_str).collect();
            let composed = PipelineComposed {
                pipeline: self.name,
                steps: &step_refs,
            };
            let span = composed.span("pipeline_build");
            let _guard = span.enter();
            composed.log();

            for (position, &index) in order.iter().enumerate() {
                if let Entry::Step(registration) = &self.entries[index] {
                    StepPlaced {
                        step: &registration.id,
                        position,
                        description: &registration.description,
                    }
                    .log();
                }
            }
        }

        let mut slots: Vec<Option<Entry<C>>> = self.entries.into_iter().map(Some).collect();
        let stages: Vec<Arc<dyn Stage<C>>> = order
            .iter()
            .filter_map(|&index| match slots[index].take() {
                Some(Entry::Step(registration)) => Some(registration.stage),
                _ => None,
            })
            .collect();

        Ok(Pipeline {
            name: self.name,
            step_ids,
            stages,
            terminal,
        })
    }
}

/// An ordered, immutable chain of stages ending in a terminal.
pub struct Pipeline<C> {
    name: &'static str,
    step_ids: Vec<String>,
    stages: Vec<Arc<dyn Stage<C>>>,
    terminal: Arc<dyn Terminal<C>>,
}

impl<C: Send + 'static> Pipeline<C> {
    pub async fn invoke(&self, ctx: &mut C) -> Result<(), HandlerError> {
        Next::new(&self.stages, self.terminal.as_ref()).run(ctx).await
    }
}

impl<C> Pipeline<C> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Every step id, anchors included, in execution order.
    pub fn step_ids(&self) -> &[String] {
        &self.step_ids
    }
}
