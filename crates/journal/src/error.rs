// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use state_ledger::LedgerError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid journal header")]
    InvalidHeader,

    #[error("Checksum mismatch: expected {expected:016x}, found {found:016x}")]
    ChecksumMismatch { expected: u64, found: u64 },

    #[error("Sequence gap: expected entry {expected}, found {found}")]
    SequenceGap { expected: u64, found: u64 },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Journal corrupted at offset {offset}")]
    Corrupted { offset: u64 },

    #[error("Record of {len} bytes exceeds the {max} byte entry limit")]
    RecordTooLarge { len: usize, max: usize },

    #[error("Journal writer failed to discard a partial entry; reopen the journal")]
    WriterFailed,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, JournalError>;
