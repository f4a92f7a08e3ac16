//! Facet scores, score sets and weight maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lower bound of a facet score.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of a facet score.
pub const SCORE_MAX: f64 = 100.0;

/// The six facets of the standard questionnaire.
pub const DEFAULT_FACETS: [&str; 6] = ["Mind", "Heart", "Body", "Spirit", "Relations", "Work"];

/// The eight facets of the enlightenment profile (IEPI).
pub const IEPI_FACETS: [&str; 8] = ["Iman", "Niyyah", "Ibadah", "Dhikr", "Akhlaq", "Ilm", "Mizan", "Ummah"];

/// Default answer for a facet the user has not rated yet.
pub const DEFAULT_FILL: f64 = 70.0;

/// Facet name → score.
///
/// Ordered so that every iteration (and therefore every tie-break) is
/// alphabetical and reproducible.
pub type ScoreSet = BTreeMap<String, f64>;

/// Facet name → structural importance (non-negative).
pub type CentralityMap = BTreeMap<String, f64>;

/// Clamp a raw value into `[SCORE_MIN, SCORE_MAX]`. NaN maps to `SCORE_MIN`.
pub fn clamp_score(x: f64) -> f64 {
    if x.is_nan() {
        SCORE_MIN
    } else {
        x.clamp(SCORE_MIN, SCORE_MAX)
    }
}

/// Build a score set with every facet set to `fill`.
pub fn default_scores<I, S>(facets: I, fill: f64) -> ScoreSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    facets.into_iter().map(|f| (f.into(), fill)).collect()
}

// ============================================================================
// FacetWeights
// ============================================================================

/// Per-facet weights. Facets without an entry weigh `1.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetWeights(BTreeMap<String, f64>);

impl FacetWeights {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Weights of the psycho-spiritual index (PSI) over the default facets.
    pub fn psi() -> Self {
        [
            ("Mind", 0.25),
            ("Heart", 0.20),
            ("Body", 0.15),
            ("Spirit", 0.20),
            ("Relations", 0.10),
            ("Work", 0.10),
        ]
        .into_iter()
        .collect()
    }

    /// Weights of the enlightenment profile index (IEPI) over [`IEPI_FACETS`].
    pub fn iepi() -> Self {
        [
            ("Iman", 0.20),
            ("Niyyah", 0.15),
            ("Ibadah", 0.15),
            ("Dhikr", 0.10),
            ("Akhlaq", 0.15),
            ("Ilm", 0.10),
            ("Mizan", 0.10),
            ("Ummah", 0.05),
        ]
        .into_iter()
        .collect()
    }

    pub fn with(mut self, facet: impl Into<String>, weight: f64) -> Self {
        self.0.insert(facet.into(), weight);
        self
    }

    pub fn insert(&mut self, facet: impl Into<String>, weight: f64) {
        self.0.insert(facet.into(), weight);
    }

    /// Weight of `facet`, `1.0` when unspecified.
    pub fn get(&self, facet: &str) -> f64 {
        self.0.get(facet).copied().unwrap_or(1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FacetWeights {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, w)| (k.into(), w)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 100.0);
    }

    #[test]
    fn test_default_scores() {
        let scores = default_scores(DEFAULT_FACETS, DEFAULT_FILL);
        assert_eq!(scores.len(), 6);
        assert!(scores.values().all(|&v| v == 70.0));
    }

    #[test]
    fn test_weights_default_to_one() {
        let w = FacetWeights::new().with("Mind", 2.0);
        assert_eq!(w.get("Mind"), 2.0);
        assert_eq!(w.get("Body"), 1.0);
    }

    #[test]
    fn test_psi_weights_sum_to_one() {
        let w = FacetWeights::psi();
        let total: f64 = DEFAULT_FACETS.iter().map(|f| w.get(f)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_iepi_weights_cover_profile_facets() {
        let w = FacetWeights::iepi();
        assert_eq!(w.len(), IEPI_FACETS.len());
        let total: f64 = IEPI_FACETS.iter().map(|f| w.get(f)).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(w.get("Ummah"), 0.05);
    }
}
