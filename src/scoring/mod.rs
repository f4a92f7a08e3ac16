//! # Score Normalizer
//!
//! Clamps raw facet values into `[0, 100]` and aggregates them into the
//! balance index. Every function here is total: empty inputs and zero weight
//! sums produce `0.0`, never an error. The only fallible entry point is
//! [`validate_scores`], used on loosely-typed user input.

use std::collections::BTreeMap;

use crate::model::{BalanceBand, FacetWeights, IEPI_FACETS, ProfileReport, ScoreSet, clamp_score};
use crate::{Error, Result};

/// Clamp every value of `scores` into `[0, 100]`.
pub fn normalize_scores(scores: &ScoreSet) -> ScoreSet {
    scores
        .iter()
        .map(|(facet, &v)| (facet.clone(), clamp_score(v)))
        .collect()
}

/// Weighted mean of `scores`.
///
/// Without weights this is the plain mean. Facets missing from `weights`
/// weigh `1.0`. An empty set or a zero weight sum yields `0.0`.
pub fn weighted_mean(scores: &ScoreSet, weights: Option<&FacetWeights>) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let Some(weights) = weights.filter(|w| !w.is_empty()) else {
        return scores.values().sum::<f64>() / scores.len() as f64;
    };

    let (num, den) = scores.iter().fold((0.0, 0.0), |(num, den), (facet, &v)| {
        let w = weights.get(facet);
        (num + v * w, den + w)
    });
    if den == 0.0 { 0.0 } else { num / den }
}

/// Balance index and the normalized score set it was computed from.
///
/// The index is the weighted mean of the normalized scores, rounded to two
/// decimals.
pub fn balance_index(scores: &ScoreSet, weights: Option<&FacetWeights>) -> (f64, ScoreSet) {
    let normalized = normalize_scores(scores);
    let index = round2(weighted_mean(&normalized, weights));
    (index, normalized)
}

/// Round to two decimal places.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ============================================================================
// Enlightenment profile (IEPI)
// ============================================================================

/// Facets scoring below this get an improvement tip in a profile report.
pub const PROFILE_TIP_THRESHOLD: f64 = 70.0;

const IEPI_TIPS: [(&str, &str); 8] = [
    ("Iman", "Anchor meaning through daily reflection and a prayer of reliance."),
    ("Niyyah", "Renew your intention before each task and set one clear goal."),
    ("Ibadah", "Keep a fixed plan for obligatory and voluntary worship, tracked weekly."),
    ("Dhikr", "Hold a 10-minute remembrance and reflection session every day."),
    ("Akhlaq", "Focus on one virtue per week, such as honesty or forbearance."),
    ("Ilm", "Read for 15 minutes a day and apply one simple idea from it."),
    ("Mizan", "Schedule your time between yourself, your family, your work and your spirit."),
    ("Ummah", "Set aside one hour a week for community service."),
];

/// IEPI score of `scores`, rounded to two decimals.
///
/// Only the eight [`IEPI_FACETS`] count. A profile facet missing from
/// `scores` drops out of both the weighted sum and the weight total.
pub fn iepi_score(scores: &ScoreSet) -> f64 {
    round2(weighted_mean(&iepi_subset(scores), Some(&FacetWeights::iepi())))
}

/// IEPI score, its band, and a tip for every profile facet below
/// [`PROFILE_TIP_THRESHOLD`] after clamping.
pub fn iepi_profile_report(scores: &ScoreSet) -> ProfileReport {
    let score = iepi_score(scores);
    let band = BalanceBand::from_index(score);
    let improvement_tips: BTreeMap<String, String> = IEPI_TIPS
        .iter()
        .filter(|(facet, _)| {
            scores.get(*facet).is_some_and(|&v| clamp_score(v) < PROFILE_TIP_THRESHOLD)
        })
        .map(|(facet, tip)| (facet.to_string(), tip.to_string()))
        .collect();

    ProfileReport { score, band, summary: band.summary().to_string(), improvement_tips }
}

fn iepi_subset(scores: &ScoreSet) -> ScoreSet {
    normalize_scores(scores)
        .into_iter()
        .filter(|(facet, _)| IEPI_FACETS.contains(&facet.as_str()))
        .collect()
}

// ============================================================================
// Input validation
// ============================================================================

/// Keep the numeric entries of a loosely-typed score collection.
///
/// JSON numbers, strings that parse as finite numbers and booleans (as `0`/`1`)
/// are kept, everything else is dropped. Fails with [`Error::Validation`] when nothing survives.
pub fn validate_scores(values: &[serde_json::Value]) -> Result<Vec<f64>> {
    let parsed: Vec<f64> = values.iter().filter_map(parse_number).collect();
    if parsed.is_empty() {
        return Err(Error::Validation("score list is empty or invalid".into()));
    }
    Ok(parsed)
}

fn parse_number(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scores(pairs: &[(&str, f64)]) -> ScoreSet {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_normalize_clamps() {
        let n = normalize_scores(&scores(&[("Mind", -10.0), ("Body", 140.0), ("Work", 55.5)]));
        assert_eq!(n["Mind"], 0.0);
        assert_eq!(n["Body"], 100.0);
        assert_eq!(n["Work"], 55.5);
    }

    #[test]
    fn test_balance_index_uniform() {
        let (idx, _) = balance_index(&scores(&[("Mind", 30.0), ("Heart", 90.0), ("Body", 90.0)]), None);
        assert_eq!(idx, 70.0);
    }

    #[test]
    fn test_balance_index_rounds() {
        let (idx, _) = balance_index(&scores(&[("A", 10.0), ("B", 10.0), ("C", 0.0)]), None);
        assert_eq!(idx, 6.67);
    }

    #[test]
    fn test_balance_index_clamps_before_mean() {
        let (idx, normalized) = balance_index(&scores(&[("A", 200.0), ("B", 0.0)]), None);
        assert_eq!(idx, 50.0);
        assert_eq!(normalized["A"], 100.0);
    }

    #[test]
    fn test_weighted_mean_zero_weight_sum() {
        let w = FacetWeights::new().with("A", 0.0).with("B", 0.0);
        assert_eq!(weighted_mean(&scores(&[("A", 50.0), ("B", 80.0)]), Some(&w)), 0.0);
    }

    #[test]
    fn test_weighted_mean_missing_weight_defaults_to_one() {
        let w = FacetWeights::new().with("A", 3.0);
        // (90*3 + 10*1) / 4
        assert_eq!(weighted_mean(&scores(&[("A", 90.0), ("B", 10.0)]), Some(&w)), 70.0);
    }

    #[test]
    fn test_empty_scores() {
        assert_eq!(balance_index(&ScoreSet::new(), None).0, 0.0);
    }

    fn profile(values: [f64; 8]) -> ScoreSet {
        IEPI_FACETS.iter().map(|f| f.to_string()).zip(values).collect()
    }

    #[test]
    fn test_iepi_score_weighted() {
        // 0.20 × 100 + 0.80 × 50
        let s = profile([100.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0]);
        assert_eq!(iepi_score(&s), 60.0);
    }

    #[test]
    fn test_iepi_ignores_other_facets() {
        let mut s = profile([80.0; 8]);
        s.insert("Mind".to_string(), 0.0);
        assert_eq!(iepi_score(&s), 80.0);
    }

    #[test]
    fn test_iepi_profile_report() {
        let s = profile([90.0, 65.0, 80.0, 40.0, 85.0, 70.0, 75.0, 150.0]);
        let report = iepi_profile_report(&s);
        // 18 + 9.75 + 12 + 4 + 12.75 + 7 + 7.5 + 5
        assert_eq!(report.score, 76.0);
        assert_eq!(report.band, BalanceBand::Good);
        assert_eq!(report.summary, BalanceBand::Good.summary());
        let weak: Vec<&str> = report.improvement_tips.keys().map(String::as_str).collect();
        assert_eq!(weak, vec!["Dhikr", "Niyyah"]);
        assert!(report.needs_improvement("Dhikr"));
        assert!(!report.needs_improvement("Ilm"));
    }

    #[test]
    fn test_iepi_empty_profile() {
        let report = iepi_profile_report(&ScoreSet::new());
        assert_eq!(report.score, 0.0);
        assert_eq!(report.band, BalanceBand::Low);
        assert!(report.improvement_tips.is_empty());
    }

    #[test]
    fn test_validate_scores_filters() {
        let vals = validate_scores(&[json!(10), json!("20.5"), json!("abc"), json!(null)]).unwrap();
        assert_eq!(vals, vec![10.0, 20.5]);
    }

    #[test]
    fn test_validate_scores_rejects_empty() {
        assert!(matches!(validate_scores(&[]), Err(Error::Validation(_))));
        assert!(matches!(validate_scores(&[json!("x"), json!([])]), Err(Error::Validation(_))));
    }
}
