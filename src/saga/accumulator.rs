// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::record::{SagaAuditRecord, SagaChangeOutput};
use crate::context::OutgoingContext;
use crate::message::{resolve_unicast_destination, MessageIntent};

/// Attach/append protocol for the saga audit record of the current send.
pub struct SagaAuditAccumulator;

impl SagaAuditAccumulator {
    /// The record open for the invocation this send belongs to, if any.
    pub fn try_get_active(ctx: &mut OutgoingContext) -> Option<&mut SagaAuditRecord> {
        ctx.saga_audit_mut()
    }

    pub fn append(record: &mut SagaAuditRecord, entry: SagaChangeOutput) {
        record.resulting_messages.push(entry);
    }

    /// Describes the outgoing message as a saga result.
    ///
    /// Control messages have no logical message and are not saga results.
    pub fn resulting_message_for(ctx: &OutgoingContext) -> Option<SagaChangeOutput> {
        let message = ctx.message()?;
        Some(SagaChangeOutput {
            resulting_message_id: ctx.message_id.clone(),
            message_type: message.message_type().to_string(),
            destination: resolve_unicast_destination(&ctx.routing_strategies),
            message_intent: MessageIntent::from_headers(&ctx.headers),
        })
    }

    /// Appends the outgoing message to the active record. No-op when no saga
    /// audit is open or the message is a control message.
    pub fn record_outgoing(ctx: &mut OutgoingContext) -> bool {
        let Some(entry) = Self::resulting_message_for(ctx) else {
            return false;
        };
        match Self::try_get_active(ctx) {
            Some(record) => {
                Self::append(record, entry);
                true
            }
            None => false,
        }
    }
}
