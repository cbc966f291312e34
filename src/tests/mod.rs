pub mod ledger_tests;

use crate::clock::ManualClock;
use crate::config::LedgerConfig;
use crate::error::{LedgerResult, Violation};
use crate::ledger::{CommitOutcome, Ledger, RecordSink, Rejection};
use crate::state::StateRecord;
use crate::types::Digest;
use std::sync::{Arc, Mutex};

/// Upper bound on resubmissions of one command.
///
/// The digest-order rule rejects a fresh candidate with probability equal to
/// where `rehash(head)` falls in the digest space, so a valid command may need
/// several timestamps before it lands.
pub const MAX_ATTEMPTS: usize = 1 << 16;

pub fn manual_ledger(executor: &str) -> (Ledger, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let ledger = Ledger::with_clock(LedgerConfig::with_executor(executor), clock.clone());
    (ledger, clock)
}

/// Resubmit `command` until it commits. Every rejected attempt must be a
/// digest-order rejection that left the ledger untouched.
///
/// Returns (height, attempts).
pub fn commit_eventually(ledger: &Ledger, command: &str) -> (u64, usize) {
    for attempt in 1..=MAX_ATTEMPTS {
        let pending_before = ledger.pending_commands();
        let history_len = ledger.get_state_history().len();

        match ledger.submit(command) {
            CommitOutcome::Committed { height, .. } => return (height, attempt),
            CommitOutcome::RolledBack(reason) => {
                assert_eq!(reason, Rejection::Verification(Violation::DigestOrder));
                assert_eq!(ledger.pending_commands(), pending_before);
                assert_eq!(ledger.get_state_history().len(), history_len);
            }
        }
    }
    panic!("command {:?} never committed in {} attempts", command, MAX_ATTEMPTS);
}

/// Copy of `record` with one bit of its stored digest flipped.
pub fn flip_digest_byte(record: &StateRecord) -> StateRecord {
    let mut bytes = record.digest().0;
    bytes[0] ^= 0x01;
    StateRecord::from_parts(
        record.timestamp(),
        record.executor().to_string(),
        record.command_stack().to_vec(),
        record.verified(),
        Digest(bytes),
        record.locked(),
    )
}

/// Sink whose records stay readable after it is boxed into a ledger.
#[derive(Clone, Default)]
pub struct SharedSink(pub Arc<Mutex<Vec<StateRecord>>>);

impl SharedSink {
    pub fn records(&self) -> Vec<StateRecord> {
        self.0.lock().unwrap().clone()
    }
}

impl RecordSink for SharedSink {
    fn persist(&mut self, record: &StateRecord) -> LedgerResult<()> {
        self.0.lock().unwrap().push(record.clone());
        Ok(())
    }
}
