// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use state_ledger::audit_chain;
use state_ledger_journal::scan_journal;
use std::path::Path;

pub fn run(journal: &Path) -> anyhow::Result<()> {
    let scan = match scan_journal(journal) {
        Ok(scan) => scan,
        Err(e) => {
            println!("\n❌ CORRUPTED\n");
            println!("Journal unreadable: {}", e);
            return Err(e.into());
        }
    };

    if scan.torn_bytes > 0 {
        println!("\n❌ CORRUPTED\n");
        println!(
            "Incomplete entry at offset {} ({} bytes)\n",
            scan.valid_len, scan.torn_bytes
        );
        anyhow::bail!(
            "journal ends with {} bytes of an incomplete entry",
            scan.torn_bytes
        );
    }

    match audit_chain(&scan.records) {
        Ok(report) => {
            println!("\n✅ VERIFIED\n");
            println!("Records:     {}", report.records);
            println!("Head Digest: {}\n", report.head_digest);
            Ok(())
        }
        Err(failure) => {
            println!("\n❌ CORRUPTED\n");
            println!("Failing Record: {}", failure.index);
            println!("Violation:      {}\n", failure.violation);
            Err(failure.into())
        }
    }
}
