// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use state_ledger::StateRecord;
use state_ledger_journal::read_journal;
use std::path::Path;

/// One table row per record: height, timestamp, executor, newest command, digest.
pub fn rows(records: &[StateRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(height, record)| {
            vec![
                height.to_string(),
                record.timestamp().to_rfc3339(),
                record.executor().to_string(),
                record.last_command().unwrap_or("(genesis)").to_string(),
                record.digest().short(16),
            ]
        })
        .collect()
}

pub fn run(journal: &Path) -> anyhow::Result<()> {
    let records = read_journal(journal)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Height", "Timestamp", "Executor", "Command", "Digest"]);

    for row in rows(&records) {
        table.add_row(row);
    }

    println!("\nLedger History\n");
    println!("{table}\n");

    Ok(())
}
