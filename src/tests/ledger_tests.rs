// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use super::{commit_eventually, flip_digest_byte, manual_ledger, SharedSink, MAX_ATTEMPTS};
use crate::clock::ManualClock;
use crate::config::LedgerConfig;
use crate::error::{AuditFailure, LedgerError, LedgerResult, Violation};
use crate::ledger::{CommitOutcome, Ledger, RecordSink, Rejection};
use crate::state::StateRecord;
use crate::types::Timestamp;
use std::sync::Arc;

#[test]
fn test_genesis_invariant() {
    let (ledger, _) = manual_ledger("operator");

    let history = ledger.get_state_history();
    assert_eq!(history.len(), 1);
    assert!(history[0].command_stack().is_empty());
    assert!(history[0].verified());
    assert_eq!(history[0].executor(), "operator");
    assert_eq!(ledger.height(), 0);
    assert!(ledger.pending_commands().is_empty());
    assert_eq!(ledger.get_current_state().unwrap(), history[0]);
}

#[test]
fn test_default_executor() {
    let ledger = Ledger::new(LedgerConfig::default());
    assert_eq!(ledger.executor(), "ledger");
    assert_eq!(ledger.get_current_state().unwrap().executor(), "ledger");
}

#[test]
fn test_committed_record_shape() {
    let (ledger, _) = manual_ledger("operator");
    commit_eventually(&ledger, "init");

    let head = ledger.get_current_state().unwrap();
    assert_eq!(head.command_stack(), ["init".to_string()]);
    assert_eq!(head.executor(), "operator");
    assert!(head.verified());
    assert!(!head.locked());
    assert_eq!(head.digest(), head.recompute_digest());
    assert_eq!(ledger.pending_commands(), vec!["init".to_string()]);
}

#[test]
fn test_monotonic_growth() {
    let (ledger, _) = manual_ledger("operator");
    for i in 0..10 {
        let (height, _) = commit_eventually(&ledger, &format!("cmd-{}", i));
        assert_eq!(height, i + 1);
    }

    let history = ledger.get_state_history();
    assert_eq!(history.len(), 11);
    for pair in history.windows(2) {
        assert!(pair[1].timestamp() > pair[0].timestamp());
        assert!(pair[1].command_stack().len() > pair[0].command_stack().len());
        assert_eq!(
            &pair[1].command_stack()[..pair[0].command_stack().len()],
            pair[0].command_stack()
        );
    }
}

#[test]
fn test_empty_command_rolls_back() {
    let (ledger, _) = manual_ledger("operator");
    commit_eventually(&ledger, "init");
    let before = ledger.get_state_history();

    for blank in ["", "   "] {
        let outcome = ledger.submit(blank);
        assert_eq!(
            outcome,
            CommitOutcome::RolledBack(Rejection::Verification(Violation::EmptyCommand { index: 1 }))
        );
        assert!(!ledger.process_command(blank));
    }

    assert_eq!(ledger.get_state_history(), before);
    assert_eq!(ledger.pending_commands(), vec!["init".to_string()]);
}

#[test]
fn test_repeated_command_policy() {
    let (ledger, _) = manual_ledger("operator");
    commit_eventually(&ledger, "sync");

    // Immediate repeat is rejected.
    let outcome = ledger.submit("sync");
    assert_eq!(
        outcome.rejection(),
        Some(&Rejection::Verification(Violation::DuplicateCommand { index: 1 }))
    );

    // Non-adjacent repeat is fine.
    commit_eventually(&ledger, "other");
    commit_eventually(&ledger, "sync");
    assert_eq!(
        ledger.pending_commands(),
        vec!["sync".to_string(), "other".to_string(), "sync".to_string()]
    );
}

#[test]
fn test_clock_regression_rolls_back() {
    let (ledger, clock) = manual_ledger("operator");
    commit_eventually(&ledger, "init");
    let head = ledger.get_current_state().unwrap();

    clock.set(head.timestamp().as_nanos());
    let outcome = ledger.submit("next");

    assert_eq!(
        outcome,
        CommitOutcome::RolledBack(Rejection::Verification(Violation::TimestampNotIncreasing {
            previous: head.timestamp(),
            candidate: head.timestamp(),
        }))
    );
    assert_eq!(ledger.get_current_state().unwrap(), head);
    assert_eq!(ledger.pending_commands(), vec!["init".to_string()]);
}

#[test]
fn test_rollback_atomicity_over_mixed_submissions() {
    let (ledger, _) = manual_ledger("operator");
    let inputs = ["a", "", "b", "b", "c", " ", "a", "d"];

    for input in inputs {
        let pending_before = ledger.pending_commands();
        let history_before = ledger.get_state_history();

        if !ledger.process_command(input) {
            assert_eq!(ledger.pending_commands(), pending_before);
            assert_eq!(ledger.get_state_history(), history_before);
        } else {
            assert_eq!(ledger.get_state_history().len(), history_before.len() + 1);
        }

        // Idle invariant after every call.
        assert_eq!(
            ledger.pending_commands(),
            ledger.get_current_state().unwrap().command_stack()
        );
    }
}

#[test]
fn test_history_is_a_copy() {
    let (ledger, _) = manual_ledger("operator");
    commit_eventually(&ledger, "init");

    let mut copy = ledger.get_state_history();
    copy.clear();

    assert_eq!(ledger.get_state_history().len(), 2);
}

#[test]
fn test_current_state_on_empty_ledger() {
    let (ledger, _) = manual_ledger("operator");
    ledger.tamper_with(|records| records.clear());

    assert!(matches!(
        ledger.get_current_state(),
        Err(LedgerError::EmptyLedger)
    ));
}

#[test]
fn test_open_persists_genesis_and_commits() {
    let sink = SharedSink::default();
    let clock = Arc::new(ManualClock::default());
    let ledger = Ledger::open(LedgerConfig::default(), clock, Box::new(sink.clone())).unwrap();

    assert_eq!(sink.records().len(), 1);

    commit_eventually(&ledger, "init");
    commit_eventually(&ledger, "run");

    // Rejected candidates never reach the sink.
    assert!(!ledger.process_command(""));
    assert_eq!(sink.records(), ledger.get_state_history());
}

struct FailOn(&'static str);

impl RecordSink for FailOn {
    fn persist(&mut self, record: &StateRecord) -> LedgerResult<()> {
        if record.last_command() == Some(self.0) {
            return Err(LedgerError::Persistence("disk full".to_string()));
        }
        Ok(())
    }
}

#[test]
fn test_sink_failure_rolls_back() {
    let clock = Arc::new(ManualClock::default());
    let ledger = Ledger::open(LedgerConfig::default(), clock, Box::new(FailOn("doomed"))).unwrap();
    commit_eventually(&ledger, "init");
    let before = ledger.get_state_history();

    let mut saw_persistence_failure = false;
    for _ in 0..MAX_ATTEMPTS {
        match ledger.submit("doomed") {
            CommitOutcome::RolledBack(Rejection::Persistence(msg)) => {
                assert!(msg.contains("disk full"));
                saw_persistence_failure = true;
                break;
            }
            CommitOutcome::RolledBack(Rejection::Verification(Violation::DigestOrder)) => continue,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    assert!(saw_persistence_failure);
    assert_eq!(ledger.get_state_history(), before);
    assert_eq!(ledger.pending_commands(), vec!["init".to_string()]);
}

struct PanicOn(&'static str);

impl RecordSink for PanicOn {
    fn persist(&mut self, record: &StateRecord) -> LedgerResult<()> {
        if record.last_command() == Some(self.0) {
            panic!("sink exploded");
        }
        Ok(())
    }
}

#[test]
fn test_poisoned_lock_is_recovered() {
    let clock = Arc::new(ManualClock::default());
    let ledger = Arc::new(
        Ledger::open(LedgerConfig::default(), clock, Box::new(PanicOn("boom"))).unwrap(),
    );

    let mut panicked = false;
    for _ in 0..MAX_ATTEMPTS {
        let l = ledger.clone();
        match std::thread::spawn(move || l.process_command("boom")).join() {
            Err(_) => {
                panicked = true;
                break;
            }
            Ok(committed) => assert!(!committed),
        }
    }
    assert!(panicked);

    // The buffered "boom" is gone and the ledger keeps working.
    assert!(ledger.pending_commands().is_empty());
    assert_eq!(ledger.get_state_history().len(), 1);
    commit_eventually(&ledger, "after");
    assert_eq!(ledger.pending_commands(), vec!["after".to_string()]);
}

#[test]
fn test_verify_chain_on_commit_detects_tampering() {
    let clock = Arc::new(ManualClock::default());
    let config = LedgerConfig {
        verify_chain_on_commit: true,
        ..LedgerConfig::default()
    };
    let ledger = Ledger::with_clock(config, clock);
    commit_eventually(&ledger, "a");
    commit_eventually(&ledger, "b");

    ledger.tamper_with(|records| {
        let forged = flip_digest_byte(&records[1]);
        records[1] = forged;
    });

    let outcome = ledger.submit("c");
    assert_eq!(
        outcome,
        CommitOutcome::RolledBack(Rejection::ChainIntegrity(AuditFailure {
            index: 1,
            violation: Violation::DigestMismatch,
        }))
    );
    assert_eq!(ledger.get_state_history().len(), 3);
}

#[test]
fn test_restore_continues_chain() {
    let (ledger, clock) = manual_ledger("operator");
    commit_eventually(&ledger, "a");
    commit_eventually(&ledger, "b");
    let history = ledger.get_state_history();

    let restored = Ledger::restore(LedgerConfig::default(), clock, history.clone(), None).unwrap();

    assert_eq!(restored.get_state_history(), history);
    assert_eq!(restored.pending_commands(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(restored.height(), 2);

    commit_eventually(&restored, "c");
    assert_eq!(restored.height(), 3);
    assert!(restored.get_current_state().unwrap().timestamp() > Timestamp(0));
}

#[test]
fn test_restore_refuses_empty_history() {
    let clock = Arc::new(ManualClock::default());
    let result = Ledger::restore(LedgerConfig::default(), clock, Vec::new(), None);

    assert!(matches!(
        result,
        Err(LedgerError::InvalidHistory(AuditFailure {
            index: 0,
            violation: Violation::EmptyHistory,
        }))
    ));
}
