//! Derived, per-run reports: balance bands and contribution breakdowns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Balance band (interpretation of the balance index)
// ============================================================================

/// Qualitative band of a balance index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceBand {
    /// Below 50: large gaps that need prompt attention.
    Low,
    /// 50 to below 70: partial balance, specific facets need reinforcing.
    Medium,
    /// 70 to below 85: acceptable balance with visible progress.
    Good,
    /// 85 and above: high coherence across facets.
    Excellent,
}

impl BalanceBand {
    pub fn from_index(index: f64) -> Self {
        if index < 50.0 {
            BalanceBand::Low
        } else if index < 70.0 {
            BalanceBand::Medium
        } else if index < 85.0 {
            BalanceBand::Good
        } else {
            BalanceBand::Excellent
        }
    }

    /// One-line reading of the band.
    pub fn summary(&self) -> &'static str {
        match self {
            BalanceBand::Low => "Large gaps that need prompt intervention.",
            BalanceBand::Medium => "Some balance, but specific facets need reinforcing.",
            BalanceBand::Good => "Acceptable balance with visible progress; keep extending what works.",
            BalanceBand::Excellent => "High harmony across the psychological and spiritual facets.",
        }
    }
}

impl std::fmt::Display for BalanceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceBand::Low => write!(f, "Low"),
            BalanceBand::Medium => write!(f, "Medium"),
            BalanceBand::Good => write!(f, "Good"),
            BalanceBand::Excellent => write!(f, "Excellent"),
        }
    }
}

// ============================================================================
// Contribution report
// ============================================================================

/// Signed decomposition of a score set around a baseline.
///
/// Positive percentages support the outcome (above baseline), negative ones
/// limit it. When at least one facet differs from the baseline the absolute
/// values sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionReport {
    pub baseline: f64,
    pub contributions_pct: BTreeMap<String, f64>,
    /// Most supporting first.
    pub top_supporting: Vec<(String, f64)>,
    /// Most limiting (most negative) first.
    pub top_limiting: Vec<(String, f64)>,
    pub summary: String,
}

impl ContributionReport {
    pub fn contribution(&self, facet: &str) -> Option<f64> {
        self.contributions_pct.get(facet).copied()
    }
}

// ============================================================================
// Profile report
// ============================================================================

/// Weighted profile score with its band and a tip per weak facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub score: f64,
    pub band: BalanceBand,
    pub summary: String,
    /// Facet → improvement tip, for facets below the tip threshold.
    pub improvement_tips: BTreeMap<String, String>,
}

impl ProfileReport {
    pub fn needs_improvement(&self, facet: &str) -> bool {
        self.improvement_tips.contains_key(facet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(BalanceBand::from_index(0.0), BalanceBand::Low);
        assert_eq!(BalanceBand::from_index(49.99), BalanceBand::Low);
        assert_eq!(BalanceBand::from_index(50.0), BalanceBand::Medium);
        assert_eq!(BalanceBand::from_index(70.0), BalanceBand::Good);
        assert_eq!(BalanceBand::from_index(84.99), BalanceBand::Good);
        assert_eq!(BalanceBand::from_index(85.0), BalanceBand::Excellent);
    }

    #[test]
    fn test_band_display() {
        assert_eq!(BalanceBand::Good.to_string(), "Good");
        assert!(!BalanceBand::Low.summary().is_empty());
    }
}
