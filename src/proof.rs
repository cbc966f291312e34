// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Chain Proof Structures.

use crate::config::LEDGER_VERSION;
use crate::error::{LedgerError, LedgerResult};
use crate::hash::chain_digest;
use crate::ledger::Ledger;
use crate::state::StateRecord;
use crate::types::Digest;
use serde::{Deserialize, Serialize};

/// Compact summary of a ledger history.
///
/// Two copies of a ledger (live and recovered, or two replicas of a
/// journal) produce matching proofs iff they hold the same records, every
/// field included, in the same order (barring BLAKE3 collisions).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainProof {
    pub ledger_version: u32,

    /// Committed transitions after genesis.
    pub height: u64,

    pub head_digest: Digest,

    /// BLAKE3 over every field of every record, genesis first.
    pub chain_digest: Digest,
}

impl ChainProof {
    pub fn from_history(history: &[StateRecord]) -> LedgerResult<Self> {
        let head = history.last().ok_or(LedgerError::EmptyLedger)?;
        Ok(Self {
            ledger_version: LEDGER_VERSION,
            height: (history.len() - 1) as u64,
            head_digest: head.digest(),
            chain_digest: chain_digest(history),
        })
    }

    pub fn from_ledger(ledger: &Ledger) -> LedgerResult<Self> {
        Self::from_history(&ledger.get_state_history())
    }

    pub fn matches(&self, other: &ChainProof) -> bool {
        self == other
    }
}
