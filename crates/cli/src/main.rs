// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Parser, Subcommand};
use state_ledger_cli::commands::{audit, history, proof, run};
use state_ledger_cli::telemetry;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(about = "State Ledger - append-only, digest-linked state history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit commands to the ledger stored in a journal.
    /// The journal is created (with a genesis record) if it does not exist.
    Run {
        /// Path to the journal file
        #[arg(long, short)]
        journal: PathBuf,

        /// Executor identity recorded on new states
        #[arg(long, env = "LEDGER_EXECUTOR", default_value = state_ledger::config::DEFAULT_EXECUTOR)]
        executor: String,

        /// Re-audit the whole chain before every commit
        #[arg(long)]
        verify_chain: bool,

        /// Commands to submit, in order
        #[arg(required = true)]
        commands: Vec<String>,
    },
    /// List the committed state timeline
    History {
        #[arg(long, short)]
        journal: PathBuf,
    },
    /// Replay and verify the full chain
    Audit {
        #[arg(long, short)]
        journal: PathBuf,
    },
    /// Print a chain proof as JSON
    Proof {
        #[arg(long, short)]
        journal: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            journal,
            executor,
            verify_chain,
            commands,
        } => run::run(&journal, executor, verify_chain, &commands),
        Commands::History { journal } => history::run(&journal),
        Commands::Audit { journal } => audit::run(&journal),
        Commands::Proof { journal } => proof::run(&journal),
    }
}
