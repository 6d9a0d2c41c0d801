// prdt-core/src/application/pipeline.rs

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::PrdtError;

// Application Services
use crate::application::analysis::{analyze, screen};
use crate::application::guard::PhiExportGuard;

// Domain
use crate::domain::compliance::{AlertEvaluator, DriftTracker};
use crate::domain::governance::PhiScanOutcome;
use crate::domain::ports::{DatasetSink, DatasetSource, ManifestStore};
use crate::domain::project::{ProjectConfig, RunManifest};
use crate::domain::report::{Report, ReportAssembler};

// Infrastructure
use crate::infrastructure::adapters::{DuckDbCsv, FsManifestStore};
use crate::infrastructure::fs::{ensure_dir, write_json};

pub const CLEAN_CSV: &str = "interim_clean.csv";
pub const REPORT_JSON: &str = "report.json";
pub const ALERTS_JSON: &str = "alerts.json";
pub const DRIFT_JSON: &str = "drift.json";
pub const QUARANTINE_CSV: &str = "phi_quarantine.csv";

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub input: PathBuf,
    pub outdir: PathBuf,
    /// Project file merged with the CLI flags.
    pub config: ProjectConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub columns: usize,
    pub alerts: usize,
    pub drifted_scales: Vec<String>,
    pub phi_columns: Vec<String>,
    /// Every file written by the run, manifest included.
    pub artifacts: Vec<PathBuf>,
    #[serde(skip)]
    pub report: Report,
}

/// One batch run: load, screen, score, measure reliability, compare with the
/// previous run and write the artifacts.
#[instrument(skip_all, fields(input = %request.input.display(), outdir = %request.outdir.display()))]
pub fn run<S, M>(io: &S, store: &M, request: &RunRequest) -> Result<RunSummary, PrdtError>
where
    S: DatasetSource + DatasetSink,
    M: ManifestStore,
{
    let config = &request.config;
    let clean_path = request.outdir.join(CLEAN_CSV);
    if same_file(&request.input, &clean_path) {
        return Err(PrdtError::UnsafePath(format!(
            "input {} would be overwritten by the cleaned output",
            request.input.display()
        )));
    }

    // 1. LOAD + SCREEN
    let raw = io.load(&request.input)?;
    info!(rows = raw.row_count(), columns = raw.column_count(), "Dataset loaded");
    let screened = screen(raw, config)?;

    let guard = PhiExportGuard::new(config.phi.allow_export);
    guard.check(&screened)?;
    let phi_columns: Vec<String> = screened
        .findings
        .iter()
        .map(|f| f.column.clone())
        .collect();

    // 2. ANALYSIS (scoring, reliability, descriptives)
    let PhiScanOutcome {
        dataset,
        findings,
        quarantine,
    } = screened;
    let analysis = analyze(&dataset, findings, config)?;

    // 3. HISTORY (the latest recorded run is the one to compare against)
    let previous = store.previous()?;
    let drift = DriftTracker::compare(&analysis.parts.scale_scores, &previous);
    let manifest = RunManifest {
        generated_at: Utc::now(),
        input: request.input.display().to_string(),
        rows: analysis.scored.row_count(),
        columns: analysis
            .scored
            .column_names()
            .into_iter()
            .map(String::from)
            .collect(),
        scales: config.scales.clone(),
        scale_scores: analysis.parts.scale_scores.clone(),
    };

    // 4. ALERTS + REPORT
    let alerts = AlertEvaluator::new(&config.alerts).evaluate(
        &analysis.parts.missing,
        &analysis.parts.overall,
        &analysis.parts.scale_reliability,
        &analysis.parts.phi_findings,
        drift.alerts.clone(),
    );
    let report = ReportAssembler::assemble(analysis.parts, alerts);

    // 5. ARTIFACTS
    ensure_dir(&request.outdir)?;
    let mut artifacts = Vec::new();

    io.write(&analysis.scored, &clean_path)?;
    artifacts.push(clean_path);

    let report_path = request.outdir.join(REPORT_JSON);
    write_json(&report_path, &report)?;
    artifacts.push(report_path);

    let alerts_path = request.outdir.join(ALERTS_JSON);
    write_json(&alerts_path, &report.alerts)?;
    artifacts.push(alerts_path);

    if drift.has_drift() {
        let drift_path = request.outdir.join(DRIFT_JSON);
        write_json(&drift_path, &drift.records)?;
        artifacts.push(drift_path);
    }

    if let Some(quarantine) = &quarantine
        && guard.allows_export()
    {
        let quarantine_path = request.outdir.join(QUARANTINE_CSV);
        io.write(quarantine, &quarantine_path)?;
        warn!(path = %quarantine_path.display(), "PHI quarantine written");
        artifacts.push(quarantine_path);
    }

    // 6. HISTORY (a run only counts once all of its artifacts exist)
    artifacts.push(store.record(&manifest)?);

    info!(
        alerts = report.alerts.len(),
        drifted = drift.records.len(),
        "Run complete"
    );

    Ok(RunSummary {
        rows: analysis.scored.row_count(),
        columns: analysis.scored.column_count(),
        alerts: report.alerts.len(),
        drifted_scales: drift.records.iter().map(|r| r.scale.clone()).collect(),
        phi_columns,
        artifacts,
        report,
    })
}

/// `run` over the DuckDB CSV adapter, keeping manifests next to the outputs.
pub fn run_with_defaults(request: &RunRequest) -> Result<RunSummary, PrdtError> {
    let io = DuckDbCsv::in_memory()?;
    let store = FsManifestStore::new(&request.outdir);
    run(&io, &store, request)
}

/// Load and screen only: what the PHI scanner would flag, nothing written.
#[instrument(skip(io, config), fields(input = %input.display()))]
pub fn scan<S: DatasetSource>(
    io: &S,
    input: &Path,
    config: &ProjectConfig,
) -> Result<PhiScanOutcome, PrdtError> {
    let raw = io.load(input)?;
    Ok(screen(raw, config)?)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::{Column, Dataset};
    use crate::domain::error::DomainError;
    use crate::domain::scales::{ScaleDefinition, ScoringMethod};
    use anyhow::Result;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// In-memory source: the dataset to load is swapped between runs.
    struct MemoryIo {
        input: RefCell<Dataset>,
        written: RefCell<HashMap<PathBuf, Dataset>>,
    }

    impl MemoryIo {
        fn new(input: Dataset) -> Self {
            Self {
                input: RefCell::new(input),
                written: RefCell::new(HashMap::new()),
            }
        }
    }

    impl DatasetSource for MemoryIo {
        fn load(&self, _path: &Path) -> Result<Dataset, PrdtError> {
            Ok(self.input.borrow().clone())
        }
    }

    impl DatasetSink for MemoryIo {
        fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), PrdtError> {
            self.written
                .borrow_mut()
                .insert(path.to_path_buf(), dataset.clone());
            Ok(())
        }
    }

    fn survey(shift: f64) -> Result<Dataset> {
        Ok(Dataset::from_columns(vec![
            Column::text("Email", &[Some("a@b.com"), Some("c@d.org"), None]),
            Column::numeric("i1", &[Some(1.0 + shift), Some(2.0 + shift), Some(3.0 + shift)]),
            Column::numeric("i2", &[Some(2.0 + shift), Some(2.0 + shift), Some(4.0 + shift)]),
        ])?)
    }

    fn request(outdir: &Path, allow_export: bool) -> Result<RunRequest> {
        let mut config = ProjectConfig {
            scales: vec!["pair".into()],
            custom_scales: vec![
                ScaleDefinition::new("pair", vec!["i1".into(), "i2".into()])?
                    .with_method(ScoringMethod::Mean),
            ],
            ..Default::default()
        };
        config.phi.allow_export = allow_export;
        Ok(RunRequest {
            input: outdir.join("input.csv"),
            outdir: outdir.to_path_buf(),
            config,
        })
    }

    #[test]
    fn test_phi_blocks_the_run_before_any_output() -> Result<()> {
        let dir = tempdir()?;
        let io = MemoryIo::new(survey(0.0)?);
        let store = FsManifestStore::new(dir.path());

        let res = run(&io, &store, &request(dir.path(), false)?);
        assert!(matches!(
            res,
            Err(PrdtError::Domain(DomainError::PhiExportBlocked { .. }))
        ));
        assert!(store.list().is_empty());
        assert!(io.written.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn test_run_writes_artifacts() -> Result<()> {
        let dir = tempdir()?;
        let io = MemoryIo::new(survey(0.0)?);
        let store = FsManifestStore::new(dir.path());

        let summary = run(&io, &store, &request(dir.path(), true)?)?;
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.phi_columns, vec!["email"]);
        assert!(summary.drifted_scales.is_empty());

        assert!(dir.path().join(REPORT_JSON).exists());
        assert!(dir.path().join(ALERTS_JSON).exists());
        assert!(!dir.path().join(DRIFT_JSON).exists());
        assert_eq!(store.list().len(), 1);
        assert_eq!(summary.artifacts.last(), store.list().last());

        let written = io.written.borrow();
        let clean = &written[&dir.path().join(CLEAN_CSV)];
        assert!(clean.contains("pair_score"));
        assert!(!clean.contains("email"));
        assert_eq!(
            written[&dir.path().join(QUARANTINE_CSV)].column_names(),
            vec!["email"]
        );
        Ok(())
    }

    #[test]
    fn test_second_run_reports_drift() -> Result<()> {
        let dir = tempdir()?;
        let io = MemoryIo::new(survey(0.0)?);
        let store = FsManifestStore::new(dir.path());
        let req = request(dir.path(), true)?;

        run(&io, &store, &req)?;
        *io.input.borrow_mut() = survey(2.0)?;
        let summary = run(&io, &store, &req)?;

        assert_eq!(summary.drifted_scales, vec!["pair"]);
        let drift: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(DRIFT_JSON))?)?;
        assert_eq!(drift[0]["scale"], "pair");
        assert!((drift[0]["delta"].as_f64().unwrap() - 2.0).abs() < 1e-9);
        assert!(summary.report.alerts.iter().any(|a| a.kind() == "drift"));
        Ok(())
    }

    /// Loads fine, fails on every write.
    struct FailingSink(Dataset);

    impl DatasetSource for FailingSink {
        fn load(&self, _path: &Path) -> Result<Dataset, PrdtError> {
            Ok(self.0.clone())
        }
    }

    impl DatasetSink for FailingSink {
        fn write(&self, _dataset: &Dataset, path: &Path) -> Result<(), PrdtError> {
            Err(PrdtError::InternalError(format!("disk full: {}", path.display())))
        }
    }

    #[test]
    fn test_failed_write_records_no_manifest() -> Result<()> {
        let dir = tempdir()?;
        let store = FsManifestStore::new(dir.path());
        let req = request(dir.path(), true)?;

        let res = run(&FailingSink(survey(0.0)?), &store, &req);
        assert!(matches!(res, Err(PrdtError::InternalError(_))));
        assert!(store.list().is_empty());
        assert!(!dir.path().join(REPORT_JSON).exists());

        // the failed run is not the baseline for the next one
        let io = MemoryIo::new(survey(2.0)?);
        let summary = run(&io, &store, &req)?;
        assert!(summary.drifted_scales.is_empty());
        assert_eq!(store.list().len(), 1);
        Ok(())
    }

    #[test]
    fn test_input_cannot_be_the_clean_output() -> Result<()> {
        let dir = tempdir()?;
        let io = MemoryIo::new(survey(0.0)?);
        let store = FsManifestStore::new(dir.path());
        let mut req = request(dir.path(), true)?;
        req.input = dir.path().join(CLEAN_CSV);

        let res = run(&io, &store, &req);
        assert!(matches!(res, Err(PrdtError::UnsafePath(_))));
        Ok(())
    }

    #[test]
    fn test_scan_writes_nothing() -> Result<()> {
        let io = MemoryIo::new(survey(0.0)?);
        let outcome = scan(&io, Path::new("input.csv"), &ProjectConfig::default())?;
        assert_eq!(outcome.quarantined_columns(), vec!["email"]);
        assert!(io.written.borrow().is_empty());
        Ok(())
    }
}
