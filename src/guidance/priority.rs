//! Facet Prioritizer — need weighted by structural centrality.
//!
//! ```text
//! need(f)     = max(0, 100 − score(f))
//! c_norm(f)   = min-max normalized centrality over the whole map
//! priority(f) = need(f) · (1 + centrality_boost · c_norm(f))
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{CentralityMap, ScoreSet, SCORE_MAX};

/// Prioritizer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityParams {
    /// Number of facets returned.
    pub top_k: usize,
    /// Maximum relative boost for the most central facet.
    pub centrality_boost: f64,
}

impl Default for PriorityParams {
    fn default() -> Self {
        Self { top_k: 3, centrality_boost: 0.2 }
    }
}

/// The `top_k` facets most in need of intervention, highest priority first.
///
/// The min-max range is taken over every entry of `centrality`, including
/// graph nodes that have no score. Facets missing from the map count as
/// centrality `0`. When the whole map holds one value the boost vanishes.
/// Equal priorities are ordered by facet name.
pub fn weakest_facets(
    scores: &ScoreSet,
    centrality: Option<&CentralityMap>,
    params: &PriorityParams,
) -> Vec<(String, f64)> {
    if scores.is_empty() {
        return Vec::new();
    }

    let range = centrality.filter(|c| !c.is_empty()).map(|c| {
        let min = c.values().copied().fold(f64::INFINITY, f64::min);
        let max = c.values().copied().fold(f64::NEG_INFINITY, f64::max);
        (c, min, max - min)
    });
    let c_norm = |facet: &str| match range {
        Some((c, min, span)) if span != 0.0 => (c.get(facet).copied().unwrap_or(0.0) - min) / span,
        _ => 0.0,
    };

    let mut priorities: Vec<(String, f64)> = scores
        .iter()
        .map(|(facet, &score)| {
            let need = (SCORE_MAX - score).max(0.0);
            let boost = 1.0 + params.centrality_boost * c_norm(facet);
            (facet.clone(), need * boost)
        })
        .collect();

    priorities.sort_by(|a, b| b.1.total_cmp(&a.1));
    priorities.truncate(params.top_k);
    priorities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> ScoreSet {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_empty_scores() {
        assert!(weakest_facets(&ScoreSet::new(), None, &PriorityParams::default()).is_empty());
    }

    #[test]
    fn test_need_only() {
        let ranked = weakest_facets(&scores(&[("A", 80.0), ("B", 20.0), ("C", 50.0)]), None, &PriorityParams::default());
        assert_eq!(ranked, vec![("B".into(), 80.0), ("C".into(), 50.0), ("A".into(), 20.0)]);
    }

    #[test]
    fn test_centrality_breaks_equal_need() {
        let c: CentralityMap = [("A".to_string(), 0.2), ("B".to_string(), 1.0)].into_iter().collect();
        let ranked = weakest_facets(&scores(&[("A", 50.0), ("B", 50.0)]), Some(&c), &PriorityParams::default());
        assert_eq!(ranked[0].0, "B");
        assert!((ranked[0].1 - 60.0).abs() < 1e-9);
        assert_eq!(ranked[1].1, 50.0);
    }

    #[test]
    fn test_equal_centrality_gives_no_boost() {
        let c: CentralityMap = [("A".to_string(), 0.5), ("B".to_string(), 0.5)].into_iter().collect();
        let ranked = weakest_facets(&scores(&[("A", 40.0), ("B", 40.0)]), Some(&c), &PriorityParams::default());
        assert_eq!(ranked, vec![("A".into(), 60.0), ("B".into(), 60.0)]);
    }

    #[test]
    fn test_centrality_range_spans_unscored_nodes() {
        let c: CentralityMap = [("A", 0.4), ("B", 0.6), ("Hub", 1.0), ("Leaf", 0.2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let ranked = weakest_facets(&scores(&[("A", 50.0), ("B", 50.0)]), Some(&c), &PriorityParams::default());
        // c_norm: A = 0.25, B = 0.5 over the range [0.2, 1.0]
        assert_eq!(ranked[0].0, "B");
        assert!((ranked[0].1 - 55.0).abs() < 1e-9);
        assert_eq!(ranked[1].0, "A");
        assert!((ranked[1].1 - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_scores_above_max_have_no_need() {
        let ranked = weakest_facets(&scores(&[("A", 120.0)]), None, &PriorityParams::default());
        assert_eq!(ranked, vec![("A".into(), 0.0)]);
    }

    #[test]
    fn test_top_k_truncates() {
        let params = PriorityParams { top_k: 1, ..Default::default() };
        let ranked = weakest_facets(&scores(&[("A", 10.0), ("B", 20.0)]), None, &params);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].0, "A");
    }
}
