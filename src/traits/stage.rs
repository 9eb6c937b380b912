// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::HandlerError;
use crate::pipeline::Next;

/// One interception point in a pipeline over context `C`.
///
/// A stage does its work and then hands control to the rest of the pipeline
/// through `next`. Not calling `next` short-circuits everything after it.
/// Errors returned by `next` must be passed back unchanged.
#[async_trait]
pub trait Stage<C>: Send + Sync {
    async fn invoke(&self, ctx: &mut C, next: Next<'_, C>) -> Result<(), HandlerError>;
}

/// The host's final step, run after every stage has called `next`.
#[async_trait]
pub trait Terminal<C>: Send + Sync {
    async fn handle(&self, ctx: &mut C) -> Result<(), HandlerError>;
}
