//! Diffusion Engine — p-Laplacian smoothing of facet scores over the graph.
//!
//! Each iteration updates every node from the *previous* iterate only:
//!
//! ```text
//! new_x[n] = x[n] + alpha * Σ_nb w(n,nb) · φ(x[nb] − x[n]) / |Nb(n)|
//!
//! φ(d) = d                       p == 2   (linear Laplacian averaging)
//! φ(d) = sign(d) · |d|^(p − 1)   p != 2   (non-linear variant)
//! ```
//!
//! The engine runs exactly `iterations` passes. There is no convergence test
//! and no parameter validation: large `alpha` or `p` far from 2 can diverge,
//! and keeping them stable is the caller's contract.
//!
//! Facets without a graph node pass through unchanged. Graph nodes without a
//! score are neither updated nor counted as neighbours.
//! A self-loop makes a node its own neighbour: it adds nothing to the sum but
//! counts towards `|Nb(n)|`, damping that node's step.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::model::ScoreSet;
use super::RelationshipGraph;

/// Smoothing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionParams {
    /// Exponent of the p-Laplacian. `2.0` is ordinary averaging.
    pub p: f64,
    /// Step size.
    pub alpha: f64,
    pub iterations: usize,
}

impl Default for DiffusionParams {
    fn default() -> Self {
        Self { p: 2.0, alpha: 0.5, iterations: 5 }
    }
}

impl DiffusionParams {
    pub fn new(p: f64, alpha: f64, iterations: usize) -> Self {
        Self { p, alpha, iterations }
    }
}

/// Smooth `scores` across `graph`.
pub fn laplacian_smoothing(
    graph: &RelationshipGraph,
    scores: &ScoreSet,
    params: &DiffusionParams,
) -> ScoreSet {
    let n = graph.node_count();
    let mut x: Vec<Option<f64>> = (0..n).map(|i| scores.get(graph.name(i)).copied()).collect();

    for iteration in 0..params.iterations {
        let next: Vec<Option<f64>> = (0..n)
            .map(|i| {
                let xi = x[i]?;
                let (sum, count) = graph
                    .adjacency(i)
                    .iter()
                    .filter_map(|&(j, w)| x[j].map(|xj| w * diff_term(xj - xi, params.p)))
                    .fold((0.0, 0usize), |(s, c), t| (s + t, c + 1));
                Some(if count == 0 { xi } else { xi + params.alpha * sum / count as f64 })
            })
            .collect();

        trace!(
            iteration,
            max_step = max_step(&x, &next),
            "diffusion pass"
        );
        x = next;
    }

    let mut out = scores.clone();
    for (i, value) in x.into_iter().enumerate() {
        if let Some(v) = value {
            out.insert(graph.name(i).to_string(), v);
        }
    }

    if out.values().any(|v| !v.is_finite()) {
        warn!(p = params.p, alpha = params.alpha, "diffusion diverged to non-finite scores");
    }
    out
}

/// φ(d) from the module docs. `d == 0` contributes nothing for any `p`.
fn diff_term(d: f64, p: f64) -> f64 {
    if p == 2.0 {
        d
    } else if d == 0.0 {
        0.0
    } else {
        d.signum() * d.abs().powf(p - 1.0)
    }
}

fn max_step(prev: &[Option<f64>], next: &[Option<f64>]) -> f64 {
    prev.iter()
        .zip(next)
        .filter_map(|(a, b)| Some((b.as_ref()? - a.as_ref()?).abs()))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> ScoreSet {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn pair() -> RelationshipGraph {
        RelationshipGraph::builder().edge("A", "B").build()
    }

    #[test]
    fn test_single_step_linear() {
        let out = laplacian_smoothing(&pair(), &scores(&[("A", 0.0), ("B", 100.0)]), &DiffusionParams::new(2.0, 0.5, 1));
        assert_eq!(out["A"], 50.0);
        assert_eq!(out["B"], 50.0);
    }

    #[test]
    fn test_updates_are_simultaneous() {
        // A sequential update would move B towards the already-updated A.
        let g = RelationshipGraph::builder().edge("A", "B").edge("B", "C").build();
        let out = laplacian_smoothing(&g, &scores(&[("A", 0.0), ("B", 60.0), ("C", 0.0)]), &DiffusionParams::new(2.0, 0.5, 1));
        assert_eq!(out["A"], 30.0);
        assert_eq!(out["B"], 30.0);
        assert_eq!(out["C"], 30.0);
    }

    #[test]
    fn test_zero_alpha_is_fixed_point() {
        let input = scores(&[("A", 10.0), ("B", 90.0)]);
        let out = laplacian_smoothing(&pair(), &input, &DiffusionParams::new(2.0, 0.0, 25));
        assert_eq!(out, input);
    }

    #[test]
    fn test_isolated_and_unscored_nodes() {
        let g = RelationshipGraph::builder().node("Lonely").edge("A", "Ghost").build();
        let input = scores(&[("Lonely", 40.0), ("A", 80.0), ("Extra", 5.0)]);
        let out = laplacian_smoothing(&g, &input, &DiffusionParams::default());
        assert_eq!(out, input);
        assert!(!out.contains_key("Ghost"));
    }

    #[test]
    fn test_weight_scales_step() {
        let g = RelationshipGraph::builder().weighted_edge("A", "B", 0.5).build();
        let out = laplacian_smoothing(&g, &scores(&[("A", 0.0), ("B", 100.0)]), &DiffusionParams::new(2.0, 1.0, 1));
        assert_eq!(out["A"], 50.0);
        assert_eq!(out["B"], 50.0);
    }

    #[test]
    fn test_nonlinear_exponent() {
        // p = 3: φ(d) = sign(d)·d², d = 10 → 100; alpha 0.01 → step 1.
        let out = laplacian_smoothing(&pair(), &scores(&[("A", 40.0), ("B", 50.0)]), &DiffusionParams::new(3.0, 0.01, 1));
        assert!((out["A"] - 41.0).abs() < 1e-9);
        assert!((out["B"] - 49.0).abs() < 1e-9);
    }

    #[test]
    fn test_sublinear_exponent_damps_large_gaps() {
        // p = 1.5: φ(64) = √64 = 8; alpha 0.5 → step 4 instead of the linear 32.
        let input = scores(&[("A", 36.0), ("B", 100.0)]);
        let out = laplacian_smoothing(&pair(), &input, &DiffusionParams::new(1.5, 0.5, 1));
        assert!((out["A"] - 40.0).abs() < 1e-9);
        assert!((out["B"] - 96.0).abs() < 1e-9);

        let linear = laplacian_smoothing(&pair(), &input, &DiffusionParams::new(2.0, 0.5, 1));
        assert!(out["A"] - 36.0 < linear["A"] - 36.0);
    }

    #[test]
    fn test_self_loop_counts_as_neighbour() {
        let g = RelationshipGraph::builder().edge("A", "B").edge("A", "A").build();
        let out = laplacian_smoothing(&g, &scores(&[("A", 0.0), ("B", 100.0)]), &DiffusionParams::new(2.0, 0.5, 1));
        // A: (100 + 0) / 2 neighbours · 0.5
        assert_eq!(out["A"], 25.0);
        assert_eq!(out["B"], 50.0);
    }

    #[test]
    fn test_nonlinear_equal_scores_stay_finite() {
        let input = scores(&[("A", 50.0), ("B", 50.0)]);
        let out = laplacian_smoothing(&pair(), &input, &DiffusionParams::new(1.5, 0.5, 3));
        assert_eq!(out, input);
    }

    #[test]
    fn test_zero_iterations() {
        let input = scores(&[("A", 0.0), ("B", 100.0)]);
        assert_eq!(laplacian_smoothing(&pair(), &input, &DiffusionParams::new(2.0, 0.5, 0)), input);
    }
}
