// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Journal Recovery
//!
//! **The journal is the ledger.** Recovery replays it:
//! 1. Scan the journal (fail closed on corruption)
//! 2. Audit the recovered history (inside `Ledger::restore`)
//! 3. Reattach the writer so new commits keep appending
//!
//! A missing or empty journal yields a fresh ledger whose genesis record is
//! the journal's first entry.

use crate::error::Result;
use crate::writer::JournalWriter;
use state_ledger::{Clock, Ledger, LedgerConfig};
use std::path::Path;
use std::sync::Arc;

pub fn recover(
    path: impl AsRef<Path>,
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
) -> Result<Ledger> {
    let path = path.as_ref();
    tracing::info!("Recovering ledger from journal {:?}", path);

    let (writer, scan) = JournalWriter::open_with_scan(path)?;

    let ledger = if scan.records.is_empty() {
        Ledger::open(config, clock, Box::new(writer))?
    } else {
        tracing::info!("Loaded {} records from journal", scan.records.len());
        Ledger::restore(config, clock, scan.records, Some(Box::new(writer)))?
    };

    Ok(ledger)
}
