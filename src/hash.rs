// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical BLAKE3 Hashing
//!
//! Every digest stored in the ledger comes from this module.
//!
//! # Canonical Input
//! ```text
//! ledger version (u32 LE)
//! ↓
//! timestamp nanos (i64 LE)
//! ↓
//! command count (u64 LE)
//! ↓
//! For each command, SORTED by bytes:
//!   len (u64 LE)
//!   utf-8 bytes
//! ```
//!
//! Commands are sorted before hashing, so two stacks holding the same
//! commands in a different order hash identically at the same timestamp.
//! The hash-sequence rule relies on that, do not switch to insertion order.

use crate::config::LEDGER_VERSION;
use crate::state::StateRecord;
use crate::types::{Digest, Timestamp};

/// Digest of a command stack at a given freshness value.
pub fn command_digest<S: AsRef<str>>(commands: &[S], timestamp: Timestamp) -> Digest {
    let mut sorted: Vec<&str> = commands.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    hasher.update(&LEDGER_VERSION.to_le_bytes());
    hasher.update(&timestamp.as_nanos().to_le_bytes());
    hasher.update(&(sorted.len() as u64).to_le_bytes());
    for command in sorted {
        hasher.update(&(command.len() as u64).to_le_bytes());
        hasher.update(command.as_bytes());
    }

    hasher.finalize().into()
}

/// BLAKE3 over the raw bytes of an existing digest.
pub fn rehash(digest: &Digest) -> Digest {
    blake3::hash(digest.as_bytes()).into()
}

/// Digest over a whole history, genesis first.
///
/// Covers every stored field of every record, with each command stack in
/// insertion order.
pub fn chain_digest(records: &[StateRecord]) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(records.len() as u64).to_le_bytes());
    for record in records {
        hasher.update(&record.timestamp().as_nanos().to_le_bytes());
        hash_bytes(&mut hasher, record.executor().as_bytes());
        hasher.update(&(record.command_stack().len() as u64).to_le_bytes());
        for command in record.command_stack() {
            hash_bytes(&mut hasher, command.as_bytes());
        }
        hasher.update(&[record.verified() as u8, record.locked() as u8]);
        hasher.update(record.digest().as_bytes());
    }
    hasher.finalize().into()
}

fn hash_bytes(hasher: &mut blake3::Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
