// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Chain Audit - Full Replay Verification
//!
//! Replays a committed history and confirms, for every record:
//! 1. Stored digest == digest recomputed from (timestamp, command stack)
//! 2. Command stack is well formed
//! 3. Transition from its predecessor is valid
//! 4. Command stack extends its predecessor's (append-only)
//!
//! Stops at the first failing record and reports its index.

use crate::error::{AuditFailure, Violation};
use crate::ledger::Ledger;
use crate::state::StateRecord;
use crate::types::Digest;
use crate::verify;

/// Summary of a clean chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditReport {
    pub records: usize,
    pub head_digest: Digest,
}

pub fn audit_chain(history: &[StateRecord]) -> Result<AuditReport, AuditFailure> {
    let Some(head) = history.last() else {
        return Err(AuditFailure {
            index: 0,
            violation: Violation::EmptyHistory,
        });
    };

    let mut previous: Option<&StateRecord> = None;
    for (index, record) in history.iter().enumerate() {
        let fail = |violation| AuditFailure { index, violation };

        if record.recompute_digest() != record.digest() {
            return Err(fail(Violation::DigestMismatch));
        }
        verify::check_state(record).map_err(fail)?;
        verify::check_transition(record, previous).map_err(fail)?;
        if let Some(prev) = previous {
            if !record.command_stack().starts_with(prev.command_stack()) {
                return Err(fail(Violation::StackRewritten {
                    previous: prev.command_stack().len(),
                }));
            }
        }

        previous = Some(record);
    }

    Ok(AuditReport {
        records: history.len(),
        head_digest: head.digest(),
    })
}

/// Audit a live ledger's history.
pub fn audit(ledger: &Ledger) -> bool {
    match audit_chain(&ledger.get_state_history()) {
        Ok(report) => {
            tracing::debug!(
                "Audit passed: {} records, head {}",
                report.records,
                report.head_digest.short(16)
            );
            true
        }
        Err(failure) => {
            tracing::warn!("Audit failed: {}", failure);
            false
        }
    }
}
