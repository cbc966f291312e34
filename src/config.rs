// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants and per-ledger settings.

use serde::{Deserialize, Serialize};

/// Ledger protocol version. Hashed into every digest.
pub const LEDGER_VERSION: u32 = 1;

/// Executor identity used when none is configured.
pub const DEFAULT_EXECUTOR: &str = "ledger";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Identity recorded on every state this ledger produces.
    pub executor: String,
    /// Re-audit the committed history before each commit.
    pub verify_chain_on_commit: bool,
}

impl LedgerConfig {
    pub fn with_executor(executor: impl Into<String>) -> Self {
        Self {
            executor: executor.into(),
            ..Self::default()
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            executor: DEFAULT_EXECUTOR.to_string(),
            verify_chain_on_commit: false,
        }
    }
}
