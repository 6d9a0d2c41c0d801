// prdt/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug prdt run ... to see every stage
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        // --- USE CASE: RUN ---
        Commands::Run {
            input,
            outdir,
            config,
            score_cols,
            scale,
            allow_phi_export,
        } => commands::run::execute(commands::run::RunArgs {
            input,
            outdir,
            config,
            score_cols,
            scales: scale,
            allow_phi_export,
        }),

        // --- USE CASE: LIST SCALES ---
        Commands::Scales { config } => commands::scales::execute(config),

        // --- USE CASE: PHI SCAN ---
        Commands::Scan { input, config } => commands::scan::execute(input, config),
    };

    if let Err(e) = result {
        eprintln!("\n💥 {:#}", e);
        std::process::exit(1);
    }
}
