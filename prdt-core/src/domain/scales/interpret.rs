// prdt-core/src/domain/scales/interpret.rs

use super::definition::Cutoffs;
use tracing::debug;

/// One parsed cutoff band. `upper == None` is an open-ended `"N+"` band.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub label: String,
    pub lower: f64,
    pub upper: Option<f64>,
}

impl Band {
    pub fn contains(&self, value: f64) -> bool {
        match self.upper {
            Some(upper) => value >= self.lower && value <= upper,
            None => value >= self.lower,
        }
    }
}

/// Parses `"low-high"`, `"low+"` or a single value `"v"` (matching exactly `v`).
pub fn parse_range(range: &str) -> Option<(f64, Option<f64>)> {
    let range = range.trim();
    if let Some(lower) = range.strip_suffix('+') {
        return lower.trim().parse::<f64>().ok().map(|l| (l, None));
    }

    // skip the first char so a leading minus sign is not taken as the separator
    let split_at = range
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '-')
        .map(|(i, _)| i);

    match split_at {
        Some(i) => {
            let lower = range[..i].trim().parse::<f64>().ok()?;
            let upper = range[i + 1..].trim().parse::<f64>().ok()?;
            Some((lower, Some(upper)))
        }
        None => range.parse::<f64>().ok().map(|v| (v, Some(v))),
    }
}

/// Cutoff bands parsed once, evaluated first-match-wins.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    bands: Vec<Band>,
}

impl Interpreter {
    pub fn new(cutoffs: &Cutoffs) -> Self {
        let bands = cutoffs
            .iter()
            .filter_map(|(label, range)| match parse_range(range) {
                Some((lower, upper)) => Some(Band {
                    label: label.to_string(),
                    lower,
                    upper,
                }),
                None => {
                    debug!(band = label, range, "Skipping malformed cutoff range");
                    None
                }
            })
            .collect();
        Self { bands }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn label_for(&self, value: f64) -> Option<&str> {
        self.bands
            .iter()
            .find(|b| b.contains(value))
            .map(|b| b.label.as_str())
    }

    /// Convenience for optional inputs: no cutoffs or no value means no interpretation.
    pub fn interpret(value: Option<f64>, cutoffs: Option<&Cutoffs>) -> Option<String> {
        let (value, cutoffs) = (value?, cutoffs?);
        Self::new(cutoffs).label_for(value).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contiguous() -> Cutoffs {
        Cutoffs::new([
            ("minimal", "0-4"),
            ("mild", "5-9"),
            ("moderate", "10-14"),
            ("severe", "15+"),
        ])
    }

    #[test]
    fn test_parse_range_forms() {
        assert_eq!(parse_range("0-4"), Some((0.0, Some(4.0))));
        assert_eq!(parse_range(" 15+ "), Some((15.0, None)));
        assert_eq!(parse_range("7"), Some((7.0, Some(7.0))));
        assert_eq!(parse_range("-2-3"), Some((-2.0, Some(3.0))));
        assert_eq!(parse_range("2.5-3.99"), Some((2.5, Some(3.99))));
        assert_eq!(parse_range("high"), None);
        assert_eq!(parse_range("1-x"), None);
    }

    #[test]
    fn test_boundaries_are_inclusive_and_first_match_wins() {
        let interpreter = Interpreter::new(&contiguous());
        assert_eq!(interpreter.label_for(4.0), Some("minimal"));
        assert_eq!(interpreter.label_for(5.0), Some("mild"));
        assert_eq!(interpreter.label_for(14.0), Some("moderate"));
        assert_eq!(interpreter.label_for(100.0), Some("severe"));
        // gap between bands
        assert_eq!(interpreter.label_for(4.5), None);
    }

    #[test]
    fn test_overlapping_bands_use_declaration_order() {
        let cutoffs = Cutoffs::new([("wide", "0-10"), ("narrow", "3-4")]);
        assert_eq!(Interpreter::new(&cutoffs).label_for(3.5), Some("wide"));
    }

    #[test]
    fn test_malformed_band_is_skipped() {
        let cutoffs = Cutoffs::new([("broken", "a-b"), ("ok", "0-10")]);
        let interpreter = Interpreter::new(&cutoffs);
        assert_eq!(interpreter.bands().len(), 1);
        assert_eq!(interpreter.label_for(2.0), Some("ok"));
    }

    #[test]
    fn test_absent_inputs() {
        assert_eq!(Interpreter::interpret(None, Some(&contiguous())), None);
        assert_eq!(Interpreter::interpret(Some(3.0), None), None);
        assert_eq!(
            Interpreter::interpret(Some(3.0), Some(&contiguous())),
            Some("minimal".to_string())
        );
    }
}
