// prdt/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prdt")]
#[command(about = "Psychometric reliability, scale scoring and drift checks for survey data", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Scores scales, measures reliability and writes the run artifacts
    Run {
        /// Raw survey CSV
        #[arg(long, short)]
        input: PathBuf,

        /// Output directory (artifacts + run manifests)
        #[arg(long, short, default_value = "prdt_out")]
        outdir: PathBuf,

        /// Project file (default: prdt.yaml / prdt_project.yaml next to the input)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Columns for overall reliability and descriptives (default: the scale scores)
        #[arg(long, num_args = 1..)]
        score_cols: Vec<String>,

        /// Scales to score, repeatable (ex: --scale phq9 --scale gad7)
        #[arg(long)]
        scale: Vec<String>,

        /// Write quarantined PHI columns to phi_quarantine.csv instead of aborting
        #[arg(long)]
        allow_phi_export: bool,
    },

    /// 📏 Lists the registered scales (built-in + custom)
    Scales {
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// 🕵️‍♀️ Reports PHI findings for a CSV without writing anything
    Scan {
        #[arg(long, short)]
        input: PathBuf,

        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}
