// prdt-core/src/application/analysis.rs

use tracing::{info, instrument, warn};

use crate::domain::compliance::OVERALL_TARGET;
use crate::domain::dataset::{Dataset, basic_clean};
use crate::domain::error::DomainError;
use crate::domain::governance::{PhiFinding, PhiScanOutcome, PhiScanner};
use crate::domain::ordered::OrderedMap;
use crate::domain::project::ProjectConfig;
use crate::domain::reliability::ReliabilityAnalyzer;
use crate::domain::report::ReportParts;
use crate::domain::scales::{ScaleRegistry, ScaleScorer, summarize_scores};
use crate::domain::stats::{describe_columns, missing_summary, pearson_corr};

/// Cleans the raw table and moves PHI columns out of it.
#[instrument(skip_all)]
pub fn screen(raw: Dataset, config: &ProjectConfig) -> Result<PhiScanOutcome, DomainError> {
    let cleaned = basic_clean(raw, config.drop_duplicates);
    info!(
        rows = cleaned.row_count(),
        columns = cleaned.column_count(),
        "Dataset cleaned"
    );
    let scanner = PhiScanner::new(&config.phi)?;
    Ok(scanner.scan(&cleaned))
}

/// The registry a project sees: built-ins plus its custom scales.
pub fn registry_for(config: &ProjectConfig) -> Result<ScaleRegistry, DomainError> {
    ScaleRegistry::builtin().with_custom(config.custom_scales.iter().cloned())
}

#[derive(Debug, Clone)]
pub struct Analysis {
    /// The screened dataset with one column per scored scale.
    pub scored: Dataset,
    pub parts: ReportParts,
}

/// Missingness, scoring, reliability and descriptives over a screened dataset.
///
/// Missingness is measured before the score columns are added.
#[instrument(skip_all, fields(scales = config.scales.len()))]
pub fn analyze(
    dataset: &Dataset,
    findings: Vec<PhiFinding>,
    config: &ProjectConfig,
) -> Result<Analysis, DomainError> {
    let missing = missing_summary(dataset);

    let registry = registry_for(config)?;
    let (scored, scale_metadata) = ScaleScorer::new(&registry).score(dataset, &config.scales)?;

    let score_cols: Vec<String> = if config.score_cols.is_empty() {
        scale_metadata.iter().map(|m| m.output_column.clone()).collect()
    } else {
        config.score_cols.clone()
    };

    let overall = ReliabilityAnalyzer::analyze(&scored, OVERALL_TARGET, &score_cols)?;

    let mut scale_reliability = OrderedMap::new();
    for meta in &scale_metadata {
        let metrics = ReliabilityAnalyzer::analyze(&scored, &meta.name, &meta.items)?;
        scale_reliability.insert(meta.name.clone(), metrics);
    }
    for (group, items) in config.reliability_groups.iter() {
        if scale_reliability.contains_key(group) {
            warn!(group = %group, "Reliability group shadows a scored scale, skipping it");
            continue;
        }
        let metrics = ReliabilityAnalyzer::analyze(&scored, group, items)?;
        scale_reliability.insert(group.clone(), metrics);
    }

    let scale_scores = summarize_scores(&scored, &scale_metadata);
    info!(
        scales = scale_metadata.len(),
        groups = config.reliability_groups.len(),
        "Reliability computed"
    );

    Ok(Analysis {
        parts: ReportParts {
            descriptives: describe_columns(&scored, &score_cols),
            pearson_corr: pearson_corr(&scored, &score_cols),
            overall,
            missing,
            scale_reliability,
            scale_metadata,
            scale_scores,
            phi_findings: findings,
        },
        scored,
    })
}
