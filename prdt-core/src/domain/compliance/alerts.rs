// prdt-core/src/domain/compliance/alerts.rs

use crate::domain::governance::{PatternMatch, PhiFinding};
use crate::domain::ordered::OrderedMap;
use crate::domain::reliability::ReliabilityMetrics;
use crate::domain::stats::MissingSummary;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

pub const OVERALL_TARGET: &str = "overall";
pub const PHI_ALERT_MESSAGE: &str = "Potential PHI detected; review before sharing outputs";

/// Alert thresholds. A threshold left unset disables its alert.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default, PartialEq)]
pub struct AlertRuleSet {
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(default)]
    pub missing_pct: Option<f64>,

    #[validate(range(max = 1.0))]
    #[serde(default)]
    pub cronbach_alpha_min: Option<f64>,

    #[validate(range(max = 1.0))]
    #[serde(default)]
    pub mcdonald_omega_min: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alert {
    Missingness {
        column: String,
        percent: f64,
        threshold: f64,
    },
    Reliability {
        target: String,
        metric: String,
        value: f64,
        threshold: f64,
    },
    Phi {
        column: String,
        matches: Vec<PatternMatch>,
        message: String,
    },
    Drift {
        scale: String,
        previous_mean: f64,
        current_mean: f64,
        delta: f64,
        message: String,
    },
}

impl Alert {
    pub fn kind(&self) -> &'static str {
        match self {
            Alert::Missingness { .. } => "missingness",
            Alert::Reliability { .. } => "reliability",
            Alert::Phi { .. } => "phi",
            Alert::Drift { .. } => "drift",
        }
    }
}

pub struct AlertEvaluator<'a> {
    rules: &'a AlertRuleSet,
}

impl<'a> AlertEvaluator<'a> {
    pub fn new(rules: &'a AlertRuleSet) -> Self {
        Self { rules }
    }

    /// Columns whose missing percentage reaches the threshold (inclusive).
    pub fn missingness(&self, missing: &MissingSummary) -> Vec<Alert> {
        let Some(threshold) = self.rules.missing_pct else {
            return vec![];
        };
        missing
            .detail
            .iter()
            .filter(|d| d.missing_pct >= threshold)
            .map(|d| Alert::Missingness {
                column: d.variable.clone(),
                percent: d.missing_pct,
                threshold,
            })
            .collect()
    }

    /// Overall metrics first, then each scale in the order given. Absent metrics
    /// never alert.
    pub fn reliability(
        &self,
        overall: &ReliabilityMetrics,
        scales: &OrderedMap<ReliabilityMetrics>,
    ) -> Vec<Alert> {
        std::iter::once((OVERALL_TARGET, overall))
            .chain(scales.iter().map(|(name, m)| (name.as_str(), m)))
            .flat_map(|(target, metrics)| self.reliability_for(target, metrics))
            .collect()
    }

    fn reliability_for(&self, target: &str, metrics: &ReliabilityMetrics) -> Vec<Alert> {
        [
            ("cronbach_alpha", metrics.cronbach_alpha, self.rules.cronbach_alpha_min),
            ("mcdonald_omega", metrics.mcdonald_omega, self.rules.mcdonald_omega_min),
        ]
        .into_iter()
        .filter_map(|(metric, value, threshold)| {
            let (value, threshold) = (value?, threshold?);
            (value < threshold).then(|| Alert::Reliability {
                target: target.to_string(),
                metric: metric.to_string(),
                value,
                threshold,
            })
        })
        .collect()
    }

    pub fn phi(&self, findings: &[PhiFinding]) -> Vec<Alert> {
        findings
            .iter()
            .map(|f| Alert::Phi {
                column: f.column.clone(),
                matches: f.matches.clone(),
                message: PHI_ALERT_MESSAGE.to_string(),
            })
            .collect()
    }

    /// Missingness, reliability, PHI, then the drift alerts, in that order.
    pub fn evaluate(
        &self,
        missing: &MissingSummary,
        overall: &ReliabilityMetrics,
        scales: &OrderedMap<ReliabilityMetrics>,
        findings: &[PhiFinding],
        drift: Vec<Alert>,
    ) -> Vec<Alert> {
        let mut alerts = self.missingness(missing);
        alerts.extend(self.reliability(overall, scales));
        alerts.extend(self.phi(findings));
        alerts.extend(drift);

        for alert in &alerts {
            warn!(kind = alert.kind(), "Alert raised");
        }
        alerts
    }
}
