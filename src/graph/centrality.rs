//! Centrality Estimator — structural importance of each facet.
//!
//! Stateless: results depend only on the graph, so callers may cache them
//! for as long as the graph lives.

use crate::model::CentralityMap;
use super::RelationshipGraph;

/// Degree centrality: `degree / (N - 1)`.
///
/// Graphs with at most one node map every node to `0.0`. A self-loop adds two
/// to the degree, so a looped node can score above `1.0`.
pub fn degree_centrality(graph: &RelationshipGraph) -> CentralityMap {
    let n = graph.node_count();
    graph
        .nodes()
        .map(|node| {
            let c = if n <= 1 { 0.0 } else { graph.degree(node) as f64 / (n - 1) as f64 };
            (node.to_string(), c)
        })
        .collect()
}

/// Sum of incident edge weights per node. A self-loop counts twice.
pub fn weighted_degree(graph: &RelationshipGraph) -> CentralityMap {
    graph
        .nodes()
        .map(|node| {
            let total = graph
                .neighbors(node)
                .map(|(nb, w)| if nb == node { 2.0 * w } else { w })
                .sum();
            (node.to_string(), total)
        })
        .collect()
}
