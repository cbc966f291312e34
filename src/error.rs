// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use crate::types::Timestamp;
use thiserror::Error;

/// Why a record or transition failed verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("command at index {index} is empty")]
    EmptyCommand { index: usize },

    #[error("command at index {index} repeats the command before it")]
    DuplicateCommand { index: usize },

    #[error("timestamp {candidate} is not after {previous}")]
    TimestampNotIncreasing {
        previous: Timestamp,
        candidate: Timestamp,
    },

    #[error("command stack did not grow ({previous} -> {candidate})")]
    StackNotGrowing { previous: usize, candidate: usize },

    #[error("digest does not exceed the rehash of its predecessor")]
    DigestOrder,

    #[error("command stack does not extend its predecessor's first {previous} commands")]
    StackRewritten { previous: usize },

    #[error("stored digest does not match recomputed digest")]
    DigestMismatch,

    #[error("history is empty")]
    EmptyHistory,
}

/// First record at which a chain audit failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("audit failed at record {index}: {violation}")]
pub struct AuditFailure {
    pub index: usize,
    pub violation: Violation,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Read before a genesis record exists.
    #[error("ledger has no committed state")]
    EmptyLedger,

    #[error("history rejected: {0}")]
    InvalidHistory(#[from] AuditFailure),

    #[error("record sink failed: {0}")]
    Persistence(String),
}

pub type LedgerResult<T> = core::result::Result<T, LedgerError>;
