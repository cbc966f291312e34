// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! state-ledger: a single-writer, append-only ledger of system states linked by
//! BLAKE3 digests. Every new state is verified against its predecessor before
//! it is committed.

pub mod config;
pub mod error;
pub mod types;
pub mod clock;
pub mod hash;
pub mod state;
pub mod verify;
pub mod ledger;
pub mod audit;
pub mod proof;

pub use audit::{audit, audit_chain, AuditReport};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LedgerConfig;
pub use error::{AuditFailure, LedgerError, LedgerResult, Violation};
pub use ledger::{CommitOutcome, Ledger, RecordSink, Rejection};
pub use proof::ChainProof;
pub use state::StateRecord;
pub use types::{Digest, Timestamp};

#[cfg(test)]
pub mod tests;
