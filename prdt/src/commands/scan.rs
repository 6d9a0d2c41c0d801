// prdt/src/commands/scan.rs
//
// USE CASE: Dry-run of the PHI scanner on a raw export.

use std::path::PathBuf;

use anyhow::Context;
use prdt_core::application::scan;
use prdt_core::infrastructure::DuckDbCsv;

use super::{input_dir, load_config};

pub fn execute(input: PathBuf, config: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config(config.as_deref(), &input_dir(&input))?;
    if !config.phi.enabled {
        println!("🔓 PHI scanning is disabled in the project configuration");
    }

    println!("🕵️‍♀️  Scanning {}...", input.display());
    let io = DuckDbCsv::in_memory().context("Failed to initialize DuckDB")?;
    let outcome = scan(&io, &input, &config)
        .with_context(|| format!("Scan failed for {}", input.display()))?;

    if outcome.findings.is_empty() {
        println!("✅ No PHI detected");
        return Ok(());
    }

    let quarantined = outcome.quarantined_columns();
    for finding in &outcome.findings {
        let status = if quarantined.contains(&finding.column.as_str()) {
            "quarantine"
        } else {
            "allowed"
        };
        let matches: Vec<String> = finding
            .matches
            .iter()
            .map(|m| format!("{} x{}", m.pattern, m.count))
            .collect();
        println!(
            "   🔒 {} [{}]: {}",
            finding.column,
            status,
            matches.join(", ")
        );
    }
    println!(
        "⚠️  {} column(s) flagged, {} would be quarantined",
        outcome.findings.len(),
        quarantined.len()
    );
    Ok(())
}
