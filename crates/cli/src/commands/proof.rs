// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use state_ledger::ChainProof;
use state_ledger_journal::read_journal;
use std::path::Path;

pub fn build(journal: &Path) -> anyhow::Result<ChainProof> {
    let records = read_journal(journal)?;
    Ok(ChainProof::from_history(&records)?)
}

pub fn run(journal: &Path) -> anyhow::Result<()> {
    let proof = build(journal)?;
    println!("{}", serde_json::to_string_pretty(&proof)?);
    Ok(())
}
