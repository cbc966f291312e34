// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Durable, append-only storage for committed ledger records.
//!
//! # Guarantees
//! - Records are fsync'd before the ledger commits them in memory
//! - Every entry is checksummed and sequence-numbered
//! - Recovery audits the full chain before handing back a ledger

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;
pub mod recovery;

pub use error::{JournalError, Result};
pub use format::MAX_RECORD_LEN;
pub use reader::{read_journal, scan_journal, JournalScan};
pub use recovery::recover;
pub use writer::{JournalFile, JournalWriter};
