//! # Relationship Graph
//!
//! An undirected, weighted graph over facet names, built once from a
//! declarative node and edge list and read-only afterwards.
//!
//! ## Layout
//!
//! Nodes are interned into a dense index; adjacency is a per-node list of
//! `(neighbour index, weight)`. Node order is declaration order, so every
//! traversal is deterministic.
//!
//! ## Config tolerance
//!
//! Edge rows are either `["u", "v"]` (weight 1.0) or `["u", "v", w]`. Rows of
//! any other shape are dropped with a `debug` log, never an error. Edges that
//! mention an undeclared node declare it. Declaring the same pair twice keeps
//! the last weight.
//!
//! A self-loop `["u", "u"]` is kept. It lists `u` among its own neighbours
//! and counts twice towards the degree of `u`.

pub mod centrality;
pub mod diffusion;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

pub use centrality::{degree_centrality, weighted_degree};
pub use diffusion::{DiffusionParams, laplacian_smoothing};

/// Weight of an edge declared without one.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

// ============================================================================
// Configuration
// ============================================================================

/// Declarative graph configuration, as found in `graph.json`-style documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub nodes: Vec<String>,
    /// Raw edge rows; each is parsed with [`EdgeSpec::from_row`].
    #[serde(default)]
    pub edges: Vec<serde_json::Value>,
}

impl GraphConfig {
    /// Parse a configuration document.
    ///
    /// Only the outer shape is checked here. Individual malformed edge rows
    /// are tolerated and skipped at build time.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(format!("graph config: {e}")))
    }
}

/// One parsed edge row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub u: String,
    pub v: String,
    pub weight: f64,
}

impl EdgeSpec {
    pub fn new(u: impl Into<String>, v: impl Into<String>, weight: f64) -> Self {
        Self { u: u.into(), v: v.into(), weight }
    }

    /// Parse `["u", "v"]` or `["u", "v", w]`. Anything else is `None`.
    pub fn from_row(row: &serde_json::Value) -> Option<Self> {
        let items = row.as_array()?;
        let (u, v, w) = match items.as_slice() {
            [u, v] => (u, v, None),
            [u, v, w] => (u, v, Some(w)),
            _ => return None,
        };
        let weight = match w {
            None => DEFAULT_EDGE_WEIGHT,
            Some(serde_json::Value::Number(n)) => n.as_f64()?,
            Some(serde_json::Value::String(s)) => s.trim().parse().ok()?,
            Some(_) => return None,
        };
        if !weight.is_finite() {
            return None;
        }
        Some(Self::new(u.as_str()?, v.as_str()?, weight))
    }
}

// ============================================================================
// RelationshipGraph
// ============================================================================

/// Undirected weighted graph of facets.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl RelationshipGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Build from a parsed configuration, skipping malformed edge rows.
    pub fn from_config(config: &GraphConfig) -> Self {
        let mut builder = GraphBuilder::default();
        for node in &config.nodes {
            builder = builder.node(node.as_str());
        }
        for (i, row) in config.edges.iter().enumerate() {
            match EdgeSpec::from_row(row) {
                Some(spec) => builder = builder.edge_spec(spec),
                None => debug!(row = i, value = %row, "skipping malformed edge row"),
            }
        }
        builder.build()
    }

    /// Parse and build in one step.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self::from_config(&GraphConfig::from_json(text)?))
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        (0..self.node_count()).map(|i| self.degree_at(i)).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Node names in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    /// Neighbours of `node` with edge weights. Unknown nodes have none.
    pub fn neighbors<'a>(&'a self, node: &str) -> impl Iterator<Item = (&'a str, f64)> + use<'a> {
        let adj: &'a [(usize, f64)] = match self.index.get(node) {
            Some(&i) => &self.adjacency[i],
            None => &[],
        };
        adj.iter().map(move |&(j, w)| (self.names[j].as_str(), w))
    }

    /// Number of incident edges. A self-loop counts twice.
    pub fn degree(&self, node: &str) -> usize {
        self.index.get(node).map_or(0, |&i| self.degree_at(i))
    }

    fn degree_at(&self, i: usize) -> usize {
        let adj = &self.adjacency[i];
        adj.len() + adj.iter().filter(|&&(j, _)| j == i).count()
    }

    /// Weight of the edge between `u` and `v`, if present.
    pub fn weight(&self, u: &str, v: &str) -> Option<f64> {
        let (&i, &j) = (self.index.get(u)?, self.index.get(v)?);
        self.adjacency[i].iter().find(|&&(n, _)| n == j).map(|&(_, w)| w)
    }

    /// Every undirected edge exactly once, as `(u, v, weight)`. Self-loops
    /// appear as `(u, u, weight)`.
    pub fn edges(&self) -> Vec<(&str, &str, f64)> {
        let mut out = Vec::with_capacity(self.edge_count());
        for (i, adj) in self.adjacency.iter().enumerate() {
            for &(j, w) in adj {
                if i <= j {
                    out.push((self.names[i].as_str(), self.names[j].as_str(), w));
                }
            }
        }
        out
    }

    pub(crate) fn name(&self, i: usize) -> &str {
        &self.names[i]
    }

    pub(crate) fn adjacency(&self, i: usize) -> &[(usize, f64)] {
        &self.adjacency[i]
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates nodes and edges; [`GraphBuilder::build`] freezes them.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: RelationshipGraph,
}

impl GraphBuilder {
    pub fn node(mut self, name: impl Into<String>) -> Self {
        self.intern(name.into());
        self
    }

    pub fn nodes(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for name in names {
            self.intern(name.into());
        }
        self
    }

    /// Edge with the default weight.
    pub fn edge(self, u: impl Into<String>, v: impl Into<String>) -> Self {
        self.weighted_edge(u, v, DEFAULT_EDGE_WEIGHT)
    }

    pub fn weighted_edge(self, u: impl Into<String>, v: impl Into<String>, weight: f64) -> Self {
        self.edge_spec(EdgeSpec::new(u, v, weight))
    }

    pub fn edge_spec(mut self, spec: EdgeSpec) -> Self {
        let i = self.intern(spec.u);
        let j = self.intern(spec.v);
        self.set_weight(i, j, spec.weight);
        if i != j {
            self.set_weight(j, i, spec.weight);
        }
        self
    }

    pub fn build(self) -> RelationshipGraph {
        self.graph
    }

    fn intern(&mut self, name: String) -> usize {
        if let Some(&i) = self.graph.index.get(&name) {
            return i;
        }
        let i = self.graph.names.len();
        self.graph.index.insert(name.clone(), i);
        self.graph.names.push(name);
        self.graph.adjacency.push(Vec::new());
        i
    }

    fn set_weight(&mut self, from: usize, to: usize, weight: f64) {
        let adj = &mut self.graph.adjacency[from];
        match adj.iter_mut().find(|(n, _)| *n == to) {
            Some(entry) => entry.1 = weight,
            None => adj.push((to, weight)),
        }
    }
}
