// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for saga audit decisions that produce no audit event.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Saga audit skipped because the audit logger has Information disabled.
///
/// # Log Level
/// `trace!` - Per-message detail
pub struct SagaAuditSkipped<'a> {
    pub saga_type: &'a str,
    pub handler: &'a str,
}

impl Display for SagaAuditSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Saga audit for '{}' skipped in handler '{}': audit level disabled",
            self.saga_type, self.handler
        )
    }
}

impl StructuredLog for SagaAuditSkipped<'_> {
    fn log(&self) {
        tracing::trace!(saga_type = self.saga_type, handler = self.handler, "{}", self);
    }
}

/// Saga audit abandoned because the invocation has no message id.
///
/// # Log Level
/// `debug!` - Expected for control messages
///
/// # Example
/// ```
/// use bus_tracing::observability::messages::saga::SagaAuditAbandoned;
///
/// let msg = SagaAuditAbandoned {
///     saga_type: "OrderSaga",
///     saga_id: "s1",
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct SagaAuditAbandoned<'a> {
    pub saga_type: &'a str,
    pub saga_id: &'a str,
}

impl Display for SagaAuditAbandoned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Saga audit for '{}' ({}) abandoned: no message id header",
            self.saga_type, self.saga_id
        )
    }
}

impl StructuredLog for SagaAuditAbandoned<'_> {
    fn log(&self) {
        tracing::debug!(saga_type = self.saga_type, saga_id = self.saga_id, "{}", self);
    }
}
