// prdt-core/src/domain/report.rs

use crate::domain::compliance::Alert;
use crate::domain::governance::PhiFinding;
use crate::domain::ordered::OrderedMap;
use crate::domain::reliability::{ItemMetric, ReliabilityMetrics};
use crate::domain::scales::{Cutoffs, ScaleMetadata, ScaleScoreSummary};
use crate::domain::stats::{CorrelationMatrix, Descriptive, MissingSummary};
use serde::{Deserialize, Serialize};

/// Reliability of one scale or item group, with the scale's cutoffs alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleReliability {
    pub items: Vec<String>,
    pub cronbach_alpha: Option<f64>,
    pub mcdonald_omega: Option<f64>,
    pub item_total_correlations: Option<ItemMetric>,
    pub alpha_if_item_dropped: Option<ItemMetric>,
    pub cutoffs: Option<Cutoffs>,
}

impl ScaleReliability {
    pub fn new(metrics: ReliabilityMetrics, cutoffs: Option<Cutoffs>) -> Self {
        Self {
            items: metrics.items,
            cronbach_alpha: metrics.cronbach_alpha,
            mcdonald_omega: metrics.mcdonald_omega,
            item_total_correlations: metrics.item_total_correlations,
            alpha_if_item_dropped: metrics.alpha_if_item_dropped,
            cutoffs,
        }
    }
}

/// The `report.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub descriptives: Vec<Descriptive>,
    pub pearson_corr: CorrelationMatrix,
    pub cronbach_alpha: Option<f64>,
    pub mcdonald_omega: Option<f64>,
    pub missing: MissingSummary,
    pub scale_reliability: OrderedMap<ScaleReliability>,
    pub scale_scores: Vec<ScaleScoreSummary>,
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub phi_findings: Vec<PhiFinding>,
}

/// Inputs of a report, gathered by the analysis stage.
#[derive(Debug, Clone, Default)]
pub struct ReportParts {
    pub descriptives: Vec<Descriptive>,
    pub pearson_corr: CorrelationMatrix,
    pub overall: ReliabilityMetrics,
    pub missing: MissingSummary,
    /// Scales in run order, then item groups.
    pub scale_reliability: OrderedMap<ReliabilityMetrics>,
    pub scale_metadata: Vec<ScaleMetadata>,
    pub scale_scores: Vec<ScaleScoreSummary>,
    pub phi_findings: Vec<PhiFinding>,
}

pub struct ReportAssembler;

impl ReportAssembler {
    pub fn assemble(parts: ReportParts, alerts: Vec<Alert>) -> Report {
        let cutoffs_of = |name: &str| {
            parts
                .scale_metadata
                .iter()
                .find(|m| m.name == name)
                .and_then(|m| m.cutoffs.clone())
        };

        let scale_reliability = parts
            .scale_reliability
            .iter()
            .map(|(name, metrics)| {
                (
                    name.clone(),
                    ScaleReliability::new(metrics.clone(), cutoffs_of(name)),
                )
            })
            .collect();

        Report {
            descriptives: parts.descriptives,
            pearson_corr: parts.pearson_corr,
            cronbach_alpha: parts.overall.cronbach_alpha,
            mcdonald_omega: parts.overall.mcdonald_omega,
            missing: parts.missing,
            scale_reliability,
            scale_scores: parts.scale_scores,
            alerts,
            phi_findings: parts.phi_findings,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::scales::ScoringMethod;
    use anyhow::Result;

    fn metrics(items: &[&str], alpha: Option<f64>) -> ReliabilityMetrics {
        ReliabilityMetrics {
            cronbach_alpha: alpha,
            ..ReliabilityMetrics::absent(items.iter().map(|s| s.to_string()).collect())
        }
    }

    fn parts() -> ReportParts {
        ReportParts {
            overall: metrics(&["a", "b"], Some(0.8)),
            scale_reliability: OrderedMap::from([
                ("phq9".to_string(), metrics(&["a"], None)),
                ("sleep".to_string(), metrics(&["b"], None)),
            ]),
            scale_metadata: vec![ScaleMetadata {
                name: "phq9".into(),
                output_column: "phq9_score".into(),
                method: ScoringMethod::Sum,
                cutoffs: Some(Cutoffs::new([("minimal", "0-4")])),
                items: vec!["a".into()],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_cutoffs_are_merged_into_scale_blocks() {
        let report = ReportAssembler::assemble(parts(), vec![]);
        assert_eq!(report.cronbach_alpha, Some(0.8));
        assert_eq!(report.mcdonald_omega, None);
        assert!(report.scale_reliability["phq9"].cutoffs.is_some());
        // item groups carry no cutoffs
        assert!(report.scale_reliability["sleep"].cutoffs.is_none());
    }

    #[test]
    fn test_report_json_keys() -> Result<()> {
        let report = ReportAssembler::assemble(parts(), vec![]);
        let json = serde_json::to_value(&report)?;
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "descriptives",
            "pearson_corr",
            "cronbach_alpha",
            "mcdonald_omega",
            "missing",
            "scale_reliability",
            "scale_scores",
            "alerts",
            "phi_findings",
        ] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(json["scale_reliability"]["phq9"]["cutoffs"]["minimal"], "0-4");
        assert!(json["mcdonald_omega"].is_null());
        Ok(())
    }
}
