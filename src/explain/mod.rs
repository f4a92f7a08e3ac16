//! # Attribution Engine
//!
//! Explains a score set as signed percentage contributions around a
//! baseline. Positive = supporting (above baseline), negative = limiting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{ContributionReport, FacetWeights, ScoreSet};

/// Baseline a facet has to beat to count as supporting.
pub const BASELINE_DEFAULT: f64 = 70.0;

/// Attribution parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionParams {
    pub baseline: f64,
    pub weights: Option<FacetWeights>,
    /// Length of each of the supporting/limiting lists.
    pub top_k: usize,
}

impl Default for AttributionParams {
    fn default() -> Self {
        Self { baseline: BASELINE_DEFAULT, weights: None, top_k: 3 }
    }
}

/// Signed percentage contribution of each facet.
///
/// `(score − baseline) × weight`, divided by the sum of absolute weighted
/// deviations and scaled to 100. Non-finite scores or weights count as `0`.
/// An all-baseline input divides by `1.0` and yields all zeros.
pub fn relative_contributions(
    scores: &ScoreSet,
    baseline: f64,
    weights: Option<&FacetWeights>,
) -> BTreeMap<String, f64> {
    let weighted: Vec<(&String, f64)> = scores
        .iter()
        .map(|(facet, &score)| {
            let w = weights.map_or(1.0, |w| w.get(facet));
            (facet, (finite_or_zero(score) - baseline) * finite_or_zero(w))
        })
        .collect();

    let total_abs: f64 = weighted.iter().map(|(_, v)| v.abs()).sum();
    let divisor = if total_abs == 0.0 { 1.0 } else { total_abs };

    weighted
        .into_iter()
        .map(|(facet, v)| (facet.clone(), v / divisor * 100.0))
        .collect()
}

/// Top `k` supporting factors (largest first) and top `k` limiting factors
/// (most negative first). Ties go to the alphabetically first facet.
pub fn top_factors(
    contributions: &BTreeMap<String, f64>,
    k: usize,
) -> (Vec<(String, f64)>, Vec<(String, f64)>) {
    let mut positives: Vec<(String, f64)> = contributions
        .iter()
        .filter(|(_, v)| **v > 0.0)
        .map(|(f, v)| (f.clone(), *v))
        .collect();
    let mut negatives: Vec<(String, f64)> = contributions
        .iter()
        .filter(|(_, v)| **v < 0.0)
        .map(|(f, v)| (f.clone(), *v))
        .collect();

    // Stable sorts over alphabetical input keep the name tie-break.
    positives.sort_by(|a, b| b.1.total_cmp(&a.1));
    negatives.sort_by(|a, b| a.1.total_cmp(&b.1));
    positives.truncate(k);
    negatives.truncate(k);
    (positives, negatives)
}

/// Full contribution report with a one-line summary.
pub fn explain_summary(scores: &ScoreSet, params: &AttributionParams) -> ContributionReport {
    let contributions = relative_contributions(scores, params.baseline, params.weights.as_ref());
    let (top_supporting, top_limiting) = top_factors(&contributions, params.top_k);

    let summary = format!(
        "Top supporting → {} | Top limiting → {}",
        format_factors(&top_supporting),
        format_factors(&top_limiting),
    );

    ContributionReport {
        baseline: params.baseline,
        contributions_pct: contributions,
        top_supporting,
        top_limiting,
        summary,
    }
}

fn format_factors(items: &[(String, f64)]) -> String {
    items
        .iter()
        .map(|(name, value)| format!("{name}: {value:+.1}%"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() { x } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scores(pairs: &[(&str, f64)]) -> ScoreSet {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_contributions_sign_and_scale() {
        let c = relative_contributions(&scores(&[("Mind", 40.0), ("Body", 80.0)]), 70.0, None);
        // deviations -30 and +10 → -75% and +25%
        assert_eq!(c["Mind"], -75.0);
        assert_eq!(c["Body"], 25.0);
    }

    #[test]
    fn test_all_baseline_is_zero() {
        let c = relative_contributions(&scores(&[("A", 70.0), ("B", 70.0)]), 70.0, None);
        assert!(c.values().all(|&v| v == 0.0));
    }

    #[test]
    fn test_weights_scale_deviation() {
        let w = FacetWeights::new().with("A", 3.0);
        let c = relative_contributions(&scores(&[("A", 80.0), ("B", 60.0)]), 70.0, Some(&w));
        assert_eq!(c["A"], 75.0);
        assert_eq!(c["B"], -25.0);
    }

    #[test]
    fn test_non_finite_score_treated_as_zero() {
        let c = relative_contributions(&scores(&[("A", f64::NAN), ("B", 70.0)]), 70.0, None);
        assert_eq!(c["A"], -100.0);
    }

    #[test]
    fn test_top_factors_order() {
        let c: BTreeMap<String, f64> = [("A", 10.0), ("B", 30.0), ("C", -5.0), ("D", -40.0), ("E", 0.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let (pos, neg) = top_factors(&c, 1);
        assert_eq!(pos, vec![("B".to_string(), 30.0)]);
        assert_eq!(neg, vec![("D".to_string(), -40.0)]);
    }

    #[test]
    fn test_summary_format() {
        let report = explain_summary(&scores(&[("Mind", 40.0), ("Body", 80.0)]), &AttributionParams::default());
        assert_eq!(report.summary, "Top supporting → Body: +25.0% | Top limiting → Mind: -75.0%");
        assert_eq!(report.baseline, 70.0);
    }

    #[test]
    fn test_summary_with_empty_lists() {
        let report = explain_summary(&scores(&[("A", 70.0)]), &AttributionParams::default());
        assert_eq!(report.summary, "Top supporting →  | Top limiting → ");
        assert!(report.top_supporting.is_empty());
    }
}
