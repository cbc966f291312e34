use state_ledger::{
    audit, ChainProof, Clock, Ledger, LedgerConfig, LedgerError, ManualClock, StateRecord,
};
use state_ledger_journal::format::{EntryHeader, JournalHeader};
use state_ledger_journal::{read_journal, recover, JournalError, JournalWriter};
use std::sync::Arc;
use tempfile::tempdir;

const MAX_ATTEMPTS: usize = 1 << 16;

/// Resubmit until committed; the digest-order rule rejects a share of
/// fresh candidates.
fn commit(ledger: &Ledger, command: &str) {
    for _ in 0..MAX_ATTEMPTS {
        if ledger.process_command(command) {
            return;
        }
    }
    panic!("{} never committed", command);
}

#[test]
fn test_fresh_journal_holds_genesis() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.journal");
    let clock = Arc::new(ManualClock::default());

    let ledger = recover(&path, LedgerConfig::with_executor("node-a"), clock).unwrap();

    let records = read_journal(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records, ledger.get_state_history());
    assert_eq!(records[0].executor(), "node-a");
}

#[test]
fn test_recovery_rebuilds_same_chain() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.journal");
    let clock = Arc::new(ManualClock::default());

    let proof_before = {
        let ledger = recover(&path, LedgerConfig::default(), clock.clone()).unwrap();
        commit(&ledger, "init");
        commit(&ledger, "load");
        // Rejected commands never reach the journal.
        assert!(!ledger.process_command(""));
        ChainProof::from_ledger(&ledger).unwrap()
    };

    let recovered = recover(&path, LedgerConfig::default(), clock.clone()).unwrap();
    assert!(ChainProof::from_ledger(&recovered).unwrap().matches(&proof_before));
    assert_eq!(
        recovered.pending_commands(),
        vec!["init".to_string(), "load".to_string()]
    );
    assert!(audit(&recovered));

    // Commits after recovery keep appending to the same file.
    commit(&recovered, "run");
    assert_eq!(read_journal(&path).unwrap(), recovered.get_state_history());
}

#[test]
fn test_recovery_refuses_broken_chain() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.journal");
    let clock = Arc::new(ManualClock::default());

    // Checksums are valid but the records do not form a chain: the second
    // record goes back in time.
    {
        let mut writer = JournalWriter::open(&path).unwrap();
        let genesis = StateRecord::genesis(clock.now(), "forger");
        let stale = StateRecord::new(genesis.timestamp(), "forger", vec!["x".into()], true);
        writer.append(&genesis).unwrap();
        writer.append(&stale).unwrap();
    }

    let result = recover(&path, LedgerConfig::default(), clock);
    match result {
        Err(JournalError::Ledger(LedgerError::InvalidHistory(failure))) => {
            assert_eq!(failure.index, 1);
        }
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("broken chain recovered"),
    }
}

#[test]
fn test_recovery_fails_closed_on_flipped_byte() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.journal");
    let clock = Arc::new(ManualClock::default());

    {
        let ledger = recover(&path, LedgerConfig::default(), clock.clone()).unwrap();
        commit(&ledger, "init");
        commit(&ledger, "load");
    }

    let mut bytes = std::fs::read(&path).unwrap();
    // Inside the genesis entry's payload.
    bytes[JournalHeader::SIZE + EntryHeader::SIZE + 2] ^= 0x40;
    std::fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        recover(&path, LedgerConfig::default(), clock),
        Err(JournalError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_recovery_keeps_journal_with_corrupted_length() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.journal");
    let clock = Arc::new(ManualClock::default());

    {
        let ledger = recover(&path, LedgerConfig::default(), clock.clone()).unwrap();
        commit(&ledger, "init");
        commit(&ledger, "load");
    }

    let mut bytes = std::fs::read(&path).unwrap();
    let len_before = bytes.len();
    // High byte of the genesis entry's payload length.
    bytes[JournalHeader::SIZE + 8 + 3] ^= 0x40;
    std::fs::write(&path, &bytes).unwrap();

    assert!(matches!(
        read_journal(&path),
        Err(JournalError::Corrupted { .. })
    ));
    assert!(matches!(
        recover(&path, LedgerConfig::default(), clock),
        Err(JournalError::Corrupted { .. })
    ));
    // Nothing was truncated.
    assert_eq!(std::fs::read(&path).unwrap().len(), len_before);
}
