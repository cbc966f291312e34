// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Commit outcomes and the durability seam.

use crate::error::{AuditFailure, LedgerResult, Violation};
use crate::state::StateRecord;
use crate::types::Digest;
use thiserror::Error;

/// Why a submitted command was rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("verification failed: {0}")]
    Verification(Violation),

    #[error("chain integrity check failed: {0}")]
    ChainIntegrity(AuditFailure),

    #[error("persistence failed: {0}")]
    Persistence(String),
}

/// Result of a submit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Candidate became the new head.
    Committed { height: u64, digest: Digest },

    /// Candidate discarded, ledger unchanged.
    RolledBack(Rejection),
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed { .. })
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            CommitOutcome::RolledBack(reason) => Some(reason),
            CommitOutcome::Committed { .. } => None,
        }
    }
}

/// Receives each verified record before it becomes the head.
///
/// An error aborts the transition; the ledger rolls back and the record is
/// never committed in memory.
pub trait RecordSink: Send {
    fn persist(&mut self, record: &StateRecord) -> LedgerResult<()>;
}
