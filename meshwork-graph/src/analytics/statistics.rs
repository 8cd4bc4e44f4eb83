//! Global structural statistics.
//!
//! One record of scalar metrics describing the whole directed graph:
//! degree averages, density, diameter, average shortest path length,
//! clustering, transitivity, degree assortativity and in-degree
//! centralization.
//!
//! Shortest-path metrics collect every BFS distance from each source
//! to each of its reachable targets (self distances included); the
//! diameter is the maximum of that multiset and the average path
//! length its mean. On a graph that is not strongly connected this is
//! the reachable-pairs policy; set
//! [`StatisticsConfig::require_connected`] to fail with
//! [`EngineError::DisconnectedGraph`] instead.
//!
//! All scalars are returned unrounded; rounding for the response
//! contract is the presentation layer's concern.

use crate::error::{EngineError, EngineResult};
use crate::model::Graph;
use crate::traversal::{distances_from, Direction};

/// Configuration for structural statistics.
#[derive(Debug, Clone, Default)]
pub struct StatisticsConfig {
    /// Fail with [`EngineError::DisconnectedGraph`] when the graph is
    /// not strongly connected, instead of computing diameter and
    /// average path length over reachable pairs only.
    /// Default: false
    pub require_connected: bool,
}

impl StatisticsConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether full pairwise reachability is required.
    #[must_use]
    pub const fn with_require_connected(mut self, require_connected: bool) -> Self {
        self.require_connected = require_connected;
        self
    }
}

/// Global structural statistics of a directed graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphStatistics {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of directed edges.
    pub edge_count: usize,
    /// Mean in-degree.
    pub avg_in_degree: f64,
    /// Mean out-degree.
    pub avg_out_degree: f64,
    /// Edges over possible ordered pairs: `E / (N·(N−1))`.
    pub density: f64,
    /// Longest shortest directed path over reachable ordered pairs.
    pub diameter: usize,
    /// Mean shortest directed path length over reachable pairs.
    pub avg_shortest_path_length: f64,
    /// Mean local clustering coefficient (undirected projection).
    pub avg_clustering: f64,
    /// Closed over connected triplets (undirected projection).
    pub transitivity: f64,
    /// Degree Pearson correlation over directed edges; `None` when the
    /// degree variance is zero on either axis.
    pub assortativity: Option<f64>,
    /// In-degree centralization: `(N·max_in − Σin) / (N−1)²`.
    pub degree_centralization: f64,
}

/// Structural statistics computation.
pub struct Statistics;

impl Statistics {
    /// Compute the statistics record for a graph.
    ///
    /// # Errors
    ///
    /// [`EngineError::DivisionByZero`] on graphs with fewer than two
    /// nodes; [`EngineError::DisconnectedGraph`] when connectivity is
    /// required but absent, or when no ordered pair is reachable at
    /// all.
    pub fn compute(graph: &Graph, config: &StatisticsConfig) -> EngineResult<GraphStatistics> {
        let n = graph.node_count();
        if n <= 1 {
            return Err(EngineError::DivisionByZero(
                "structural statistics need at least two nodes".to_owned(),
            ));
        }
        let nf = n as f64;
        let edge_count = graph.edge_count();

        let sum_in: usize = (0..n).map(|v| graph.in_degree(v)).sum();
        let sum_out: usize = (0..n).map(|v| graph.out_degree(v)).sum();
        let avg_in_degree = sum_in as f64 / nf;
        let avg_out_degree = sum_out as f64 / nf;
        let density = edge_count as f64 / (nf * (nf - 1.0));

        // One BFS per source; collect the distance multiset.
        let mut diameter = 0usize;
        let mut path_sum = 0u64;
        let mut path_count = 0u64;
        let mut fully_reachable = true;
        for source in 0..n {
            for d in distances_from(graph, source, Direction::Outgoing) {
                if d < 0 {
                    fully_reachable = false;
                    continue;
                }
                diameter = diameter.max(d as usize);
                path_sum += d as u64;
                path_count += 1;
            }
        }
        if config.require_connected && !fully_reachable {
            return Err(EngineError::DisconnectedGraph);
        }
        if path_count == n as u64 {
            // Only the self pairs were reachable: no path exists at all.
            return Err(EngineError::DisconnectedGraph);
        }
        let avg_shortest_path_length = path_sum as f64 / path_count as f64;

        let und = graph.undirected();
        let avg_clustering = (0..n).map(|v| und.local_clustering(v)).sum::<f64>() / nf;
        let mut closed_triplets = 0usize;
        let mut triplets = 0usize;
        for v in 0..n {
            closed_triplets += und.triangles_through(v);
            let k = und.degree(v);
            triplets += k * (k - 1) / 2;
        }
        let transitivity =
            if triplets == 0 { 0.0 } else { closed_triplets as f64 / triplets as f64 };

        let max_in = (0..n).map(|v| graph.in_degree(v)).max().unwrap_or(0);
        let degree_centralization =
            (nf * max_in as f64 - sum_in as f64) / ((nf - 1.0) * (nf - 1.0));

        Ok(GraphStatistics {
            node_count: n,
            edge_count,
            avg_in_degree,
            avg_out_degree,
            density,
            diameter,
            avg_shortest_path_length,
            avg_clustering,
            transitivity,
            assortativity: Self::degree_assortativity(graph),
            degree_centralization,
        })
    }

    /// Pearson correlation of (out-degree of source, in-degree of
    /// target) over the directed edges.
    fn degree_assortativity(graph: &Graph) -> Option<f64> {
        let n = graph.node_count();
        let mut xs = Vec::with_capacity(graph.edge_count());
        let mut ys = Vec::with_capacity(graph.edge_count());
        for u in 0..n {
            for &v in graph.out_neighbors(u) {
                xs.push(graph.out_degree(u) as f64);
                ys.push(graph.in_degree(v) as f64);
            }
        }
        pearson(&xs, &ys)
    }
}

/// Pearson correlation coefficient; `None` on empty input or zero
/// variance on either axis.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x) * (x - mean_x);
        var_y += (y - mean_y) * (y - mean_y);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}
