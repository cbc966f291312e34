// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::hash::command_digest;
use crate::types::{Digest, Timestamp};
use serde::{Deserialize, Serialize};

/// Snapshot of the ledger after one transition.
///
/// Fields are private so a committed record cannot be changed through a
/// history copy; read them through the accessors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    timestamp: Timestamp,
    executor: String,
    command_stack: Vec<String>,
    verified: bool,
    digest: Digest,
    locked: bool,
}

impl StateRecord {
    /// Build a record, computing its digest from `timestamp` and `command_stack`.
    pub fn new(
        timestamp: Timestamp,
        executor: impl Into<String>,
        command_stack: Vec<String>,
        verified: bool,
    ) -> Self {
        let digest = command_digest(&command_stack, timestamp);
        Self {
            timestamp,
            executor: executor.into(),
            command_stack,
            verified,
            digest,
            locked: false,
        }
    }

    /// First record of a ledger: empty stack, verified.
    pub fn genesis(timestamp: Timestamp, executor: impl Into<String>) -> Self {
        Self::new(timestamp, executor, Vec::new(), true)
    }

    /// Rebuild a record with every field supplied as stored.
    ///
    /// The digest is NOT recomputed; this is for loading persisted
    /// histories, which must then be audited.
    pub fn from_parts(
        timestamp: Timestamp,
        executor: String,
        command_stack: Vec<String>,
        verified: bool,
        digest: Digest,
        locked: bool,
    ) -> Self {
        Self {
            timestamp,
            executor,
            command_stack,
            verified,
            digest,
            locked,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn executor(&self) -> &str {
        &self.executor
    }

    pub fn command_stack(&self) -> &[String] {
        &self.command_stack
    }

    /// Most recent command, `None` for genesis.
    pub fn last_command(&self) -> Option<&str> {
        self.command_stack.last().map(String::as_str)
    }

    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn digest(&self) -> Digest {
        self.digest
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Digest recomputed from the stored timestamp and stack.
    pub fn recompute_digest(&self) -> Digest {
        command_digest(&self.command_stack, self.timestamp)
    }
}
