// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use state_ledger::{CommitOutcome, Ledger, LedgerConfig, SystemClock};
use state_ledger_journal::recover;
use std::path::Path;
use std::sync::Arc;

/// Submit each command in order, collecting the outcome of every one.
pub fn submit_all(ledger: &Ledger, commands: &[String]) -> Vec<CommitOutcome> {
    commands
        .iter()
        .map(|command| ledger.submit(command.as_str()))
        .collect()
}

pub fn run(
    journal: &Path,
    executor: String,
    verify_chain: bool,
    commands: &[String],
) -> anyhow::Result<()> {
    let config = LedgerConfig {
        executor,
        verify_chain_on_commit: verify_chain,
    };
    let ledger = recover(journal, config, Arc::new(SystemClock))?;
    tracing::info!("Submitting {} commands to {:?}", commands.len(), journal);
    let outcomes = submit_all(&ledger, commands);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Command", "Result", "Height", "Detail"]);

    for (command, outcome) in commands.iter().zip(&outcomes) {
        match outcome {
            CommitOutcome::Committed { height, digest } => {
                table.add_row(vec![
                    command.clone(),
                    "COMMITTED".to_string(),
                    height.to_string(),
                    digest.short(16),
                ]);
            }
            CommitOutcome::RolledBack(reason) => {
                table.add_row(vec![
                    command.clone(),
                    "ROLLED BACK".to_string(),
                    "-".to_string(),
                    reason.to_string(),
                ]);
            }
        }
    }

    let committed = outcomes.iter().filter(|o| o.is_committed()).count();
    println!("\n{table}\n");
    println!(
        "{} of {} commands committed. Ledger height: {}",
        committed,
        outcomes.len(),
        ledger.height()
    );

    Ok(())
}
