// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline composition.
//!
//! A pipeline is an ordered list of [`Stage`](crate::traits::Stage)s ending in
//! a [`Terminal`](crate::traits::Terminal). Steps are registered with a stable
//! id and optional "insert before"/"insert after" constraints naming other
//! steps or host anchors; [`PipelineBuilder::build`] resolves those
//! constraints into one total order up front, so nothing is looked up at
//! message time.
//!
//! ```text
//! register(step A, before X) ┐
//! register(step B, after A)  ├─ build() ─ Kahn's algorithm ─▶ [A, B, X] + terminal
//! anchor(X)                  ┘
//! ```

mod builder;
mod next;
mod ordering;
mod registration;
pub mod well_known;

pub use builder::{Pipeline, PipelineBuilder};
pub use next::Next;
pub use registration::StepRegistration;
