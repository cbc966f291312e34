// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! State Ledger - The Commit Barrier
//!
//! Owns the committed records and the pending command stack. The only way
//! to mutate either is `submit` / `process_command`.
//!
//! # Protocol
//! ```text
//! command
//! ↓
//! 1. Buffer command on the pending stack
//! ↓
//! 2. Build candidate (clock, executor, stack, digest)
//! ↓
//! 3. State check (+ optional full chain audit)
//! ↓
//! 4. Transition check against head
//! ↓
//! 5. Persist to sink (if attached)
//! ↓
//! 6. Commit boundary: append record, promote buffer
//! ```
//!
//! Failure at any step → rollback buffer, records unchanged.
//!
//! # Invariants
//! - At least one record (genesis) exists
//! - Pending stack == head.command_stack outside a transition
//! - Transitions are serialized by one lock held for the ledger's lifetime

pub mod commit;
pub mod journal;

pub use commit::{CommitOutcome, Rejection, RecordSink};
pub use journal::CommandJournal;

use crate::audit::audit_chain;
use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::state::StateRecord;
use crate::verify;
use std::sync::{Arc, Mutex, MutexGuard};

struct LedgerInner {
    records: Vec<StateRecord>,
    journal: CommandJournal,
    sink: Option<Box<dyn RecordSink>>,
}

pub struct Ledger {
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
    inner: Mutex<LedgerInner>,
}

impl Ledger {
    /// Fresh ledger on the system clock.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Fresh ledger with a genesis record stamped by `clock`.
    pub fn with_clock(config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        let genesis = StateRecord::genesis(clock.now(), config.executor.clone());
        tracing::info!(
            "Ledger initialized by {}. Genesis digest: {}",
            config.executor,
            genesis.digest().short(16)
        );

        Self {
            config,
            clock,
            inner: Mutex::new(LedgerInner {
                records: vec![genesis],
                journal: CommandJournal::new(),
                sink: None,
            }),
        }
    }

    /// Fresh ledger whose records, genesis included, go to `sink`.
    pub fn open(
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
        mut sink: Box<dyn RecordSink>,
    ) -> LedgerResult<Self> {
        let ledger = Self::with_clock(config, clock);
        {
            let mut inner = ledger.lock_inner();
            let genesis = inner.records[0].clone();
            sink.persist(&genesis)?;
            inner.sink = Some(sink);
        }
        Ok(ledger)
    }

    /// Rebuild a ledger from a previously committed history.
    ///
    /// The history is audited first; a broken chain is refused.
    /// `sink` only receives records committed after the restore.
    pub fn restore(
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
        history: Vec<StateRecord>,
        sink: Option<Box<dyn RecordSink>>,
    ) -> LedgerResult<Self> {
        let report = audit_chain(&history).map_err(|failure| {
            tracing::error!("Refusing to restore ledger: {}", failure);
            LedgerError::from(failure)
        })?;

        let head_stack = history
            .last()
            .map(|head| head.command_stack().to_vec())
            .unwrap_or_default();

        tracing::info!(
            "Ledger restored: {} records, head digest {}",
            report.records,
            report.head_digest.short(16)
        );

        Ok(Self {
            config,
            clock,
            inner: Mutex::new(LedgerInner {
                records: history,
                journal: CommandJournal::from_committed(head_stack),
                sink,
            }),
        })
    }

    /// Submit a command and report only whether it was committed.
    pub fn process_command(&self, command: impl Into<String>) -> bool {
        self.submit(command).is_committed()
    }

    /// Submit a command (the ONLY way to mutate the ledger).
    ///
    /// Never panics or errors on bad input; every failure is a rollback.
    pub fn submit(&self, command: impl Into<String>) -> CommitOutcome {
        let command = command.into();
        let mut inner = self.lock_inner();
        self.transition(&mut inner, command)
    }

    fn transition(&self, inner: &mut LedgerInner, command: String) -> CommitOutcome {
        // Step 1: tentative append
        inner.journal.append_buffered(command);
        let stack = inner.journal.tentative_stack();

        // Step 2: candidate
        let state_check = verify::check_stack(&stack);
        let candidate = StateRecord::new(
            self.clock.now(),
            self.config.executor.clone(),
            stack,
            state_check.is_ok(),
        );

        // Step 3: state checks
        if let Err(violation) = state_check {
            return Self::rollback(inner, Rejection::Verification(violation));
        }

        if self.config.verify_chain_on_commit {
            if let Err(failure) = audit_chain(&inner.records) {
                return Self::rollback(inner, Rejection::ChainIntegrity(failure));
            }
        }

        // Step 4: transition against head
        if let Err(violation) = verify::check_transition(&candidate, inner.records.last()) {
            return Self::rollback(inner, Rejection::Verification(violation));
        }

        // Step 5: durability before the commit boundary
        if let Some(sink) = inner.sink.as_mut() {
            if let Err(e) = sink.persist(&candidate) {
                tracing::error!("Record sink failed: {}. Rolling back.", e);
                return Self::rollback(inner, Rejection::Persistence(e.to_string()));
            }
        }

        // Step 6: COMMIT BOUNDARY
        let digest = candidate.digest();
        inner.records.push(candidate);
        inner.journal.commit_buffer();

        let height = (inner.records.len() - 1) as u64;
        tracing::info!(
            "State transition committed: height={} digest={}",
            height,
            digest.short(16)
        );

        CommitOutcome::Committed { height, digest }
    }

    fn rollback(inner: &mut LedgerInner, reason: Rejection) -> CommitOutcome {
        tracing::warn!("State transition rejected: {}", reason);
        inner.journal.rollback_buffer();
        CommitOutcome::RolledBack(reason)
    }

    /// Acquire the ledger lock.
    ///
    /// A poisoned lock is recovered: records are only appended at the commit
    /// boundary, so the sole leftover a panicking holder can leave is a
    /// buffered command, which is discarded here.
    fn lock_inner(&self) -> MutexGuard<'_, LedgerInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                let mut guard = poisoned.into_inner();
                if guard.journal.has_pending_buffer() {
                    tracing::warn!("Ledger lock poisoned mid-transition. Discarding buffered command.");
                    guard.journal.rollback_buffer();
                }
                guard
            }
        }
    }

    /// Most recent committed record.
    pub fn get_current_state(&self) -> LedgerResult<StateRecord> {
        self.lock_inner()
            .records
            .last()
            .cloned()
            .ok_or(LedgerError::EmptyLedger)
    }

    /// Copy of every committed record, genesis first.
    pub fn get_state_history(&self) -> Vec<StateRecord> {
        self.lock_inner().records.clone()
    }

    /// Pending command stack.
    pub fn pending_commands(&self) -> Vec<String> {
        self.lock_inner().journal.tentative_stack()
    }

    /// Number of committed transitions after genesis.
    pub fn height(&self) -> u64 {
        self.lock_inner().records.len().saturating_sub(1) as u64
    }

    pub fn executor(&self) -> &str {
        &self.config.executor
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn tamper_with<F: FnOnce(&mut Vec<StateRecord>)>(&self, f: F) {
        f(&mut self.lock_inner().records)
    }
}
