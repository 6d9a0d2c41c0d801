// prdt/src/commands/run.rs
//
// USE CASE: Score, analyse and compare one survey export.

use std::path::PathBuf;

use anyhow::Context;
use prdt_core::application::{RunRequest, run_with_defaults};

use super::{input_dir, load_config};

pub struct RunArgs {
    pub input: PathBuf,
    pub outdir: PathBuf,
    pub config: Option<PathBuf>,
    pub score_cols: Vec<String>,
    pub scales: Vec<String>,
    pub allow_phi_export: bool,
}

pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Load the Config (Infra), CLI flags win over the file
    println!("⚙️  Loading configuration...");
    let mut config = load_config(args.config.as_deref(), &input_dir(&args.input))?;
    if !args.score_cols.is_empty() {
        config.score_cols = args.score_cols;
    }
    if !args.scales.is_empty() {
        config.scales = args.scales;
    }
    if args.allow_phi_export {
        config.phi.allow_export = true;
    }
    println!("   Project: {}", config.name);
    if !config.scales.is_empty() {
        println!("   Scales: {}", config.scales.join(", "));
    }

    // B. Run (Application Layer)
    let request = RunRequest {
        input: args.input.clone(),
        outdir: args.outdir.clone(),
        config,
    };
    let summary = run_with_defaults(&request)
        .with_context(|| format!("Run failed for {}", args.input.display()))?;

    // C. Report
    println!("📊 {} rows, {} columns", summary.rows, summary.columns);
    if !summary.phi_columns.is_empty() {
        println!("   🔒 PHI flagged: {}", summary.phi_columns.join(", "));
    }
    for scale in &summary.report.scale_scores {
        let mean = scale
            .mean
            .map(|m| format!("{:.2}", m))
            .unwrap_or_else(|| "-".to_string());
        match &scale.interpretation {
            Some(label) => println!("   • {}: mean {} ({})", scale.name, mean, label),
            None => println!("   • {}: mean {}", scale.name, mean),
        }
    }
    if summary.alerts > 0 {
        println!("⚠️  {} alert(s) raised", summary.alerts);
    }
    if !summary.drifted_scales.is_empty() {
        println!("📈 Drift vs last run: {}", summary.drifted_scales.join(", "));
    }

    println!("📝 Artifacts:");
    for path in &summary.artifacts {
        println!("   ➜ {}", path.display());
    }
    println!("\n✨ SUCCESS! Run finished in {:.2?}", start.elapsed());
    Ok(())
}
