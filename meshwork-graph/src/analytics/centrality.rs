//! Node centrality measures and top-K rankings.
//!
//! Four measures over the directed graph as given:
//!
//! - **Degree**: `(in + out) / (N−1)` per node.
//! - **Closeness**: `(reachable − 1) / Σ distance` with distances
//!   following edge direction; nodes that reach nothing score zero.
//! - **Betweenness**: Brandes' algorithm (2001): single-source
//!   shortest-path counting plus dependency accumulation, directed,
//!   endpoints excluded, normalised by `(N−1)(N−2)`.
//! - **Eigenvector**: power iteration with scores flowing along edge
//!   direction, L2-normalised per step; bounded by
//!   [`EigenvectorConfig::max_iterations`] and failing with
//!   [`EngineError::Convergence`] past it.
//!
//! Rankings select the [`TOP_K`] best nodes per measure, descending by
//! score with ties broken by ascending node id so reruns on an
//! unchanged graph are identical.
//!
//! # Example
//!
//! ```ignore
//! use meshwork_graph::analytics::{Centrality, EigenvectorConfig};
//!
//! let rankings = Centrality::rankings(&graph, &EigenvectorConfig::default())?;
//! for ranking in &rankings {
//!     println!("{}: {:?}", ranking.measure, ranking.entries);
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;

use meshwork_core::NodeId;

use crate::error::{EngineError, EngineResult};
use crate::model::Graph;
use crate::traversal::{distances_from, Direction};

/// Number of nodes reported per ranking.
pub const TOP_K: usize = 5;

/// The measures the ranker computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CentralityMeasure {
    /// Normalised total degree.
    Degree,
    /// Inverse mean distance to reachable targets.
    Closeness,
    /// Shortest-path brokerage (Brandes).
    Betweenness,
    /// Dominant-eigenvector importance.
    Eigenvector,
}

impl CentralityMeasure {
    /// Every measure, in reporting order.
    pub const ALL: [Self; 4] = [Self::Degree, Self::Closeness, Self::Betweenness, Self::Eigenvector];

    /// The measure's wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Degree => "degree_centrality",
            Self::Closeness => "closeness_centrality",
            Self::Betweenness => "betweenness_centrality",
            Self::Eigenvector => "eigenvector_centrality",
        }
    }
}

impl fmt::Display for CentralityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for eigenvector power iteration.
#[derive(Debug, Clone)]
pub struct EigenvectorConfig {
    /// Maximum number of iterations before failing.
    /// Default: 100
    pub max_iterations: usize,

    /// Convergence tolerance: the iteration stops once the summed
    /// absolute score change drops below `N · tolerance`.
    /// Default: 1e-6
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self { max_iterations: 100, tolerance: 1e-6 }
    }
}

impl EigenvectorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of iterations.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Scores for every node under one measure.
#[derive(Debug, Clone)]
pub struct CentralityResult {
    /// Centrality scores for each node.
    pub scores: HashMap<NodeId, f64>,
}

impl CentralityResult {
    /// Get the score for a specific node.
    #[must_use]
    pub fn score(&self, node: NodeId) -> Option<f64> {
        self.scores.get(&node).copied()
    }

    /// Nodes sorted descending by score, ties broken by ascending node
    /// id so reruns yield identical orderings.
    #[must_use]
    pub fn sorted(&self) -> Vec<(NodeId, f64)> {
        let mut pairs: Vec<_> = self.scores.iter().map(|(&id, &score)| (id, score)).collect();
        pairs.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.cmp(&b.0))
        });
        pairs
    }

    /// The top N nodes by score.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<(NodeId, f64)> {
        self.sorted().into_iter().take(n).collect()
    }
}

/// One ranking record: the measure plus up to [`TOP_K`] (node, score)
/// pairs in descending score order.
#[derive(Debug, Clone)]
pub struct CentralityRanking {
    /// The measure the entries are ranked by.
    pub measure: CentralityMeasure,
    /// Up to [`TOP_K`] (node, score) pairs, descending.
    pub entries: Vec<(NodeId, f64)>,
}

/// Centrality algorithm implementations.
pub struct Centrality;

impl Centrality {
    /// Degree centrality: `(in_degree + out_degree) / (N−1)`.
    ///
    /// # Errors
    ///
    /// [`EngineError::DivisionByZero`] on graphs with fewer than two
    /// nodes.
    pub fn degree(graph: &Graph) -> EngineResult<CentralityResult> {
        let n = graph.node_count();
        if n < 2 {
            return Err(EngineError::DivisionByZero(
                "degree centrality needs at least two nodes".to_owned(),
            ));
        }
        let scale = 1.0 / (n - 1) as f64;
        let scores = (0..n)
            .map(|v| (graph.node_id(v), graph.total_degree(v) as f64 * scale))
            .collect();
        Ok(CentralityResult { scores })
    }

    /// Closeness centrality on the directed graph as given.
    ///
    /// For each node: `(reachable − 1) / Σ distance` over the targets
    /// it reaches following edge direction. A node reaching nothing
    /// scores zero.
    #[must_use]
    pub fn closeness(graph: &Graph) -> CentralityResult {
        let n = graph.node_count();
        let mut scores = HashMap::with_capacity(n);
        for v in 0..n {
            let mut reachable = 0u64;
            let mut total = 0u64;
            for d in distances_from(graph, v, Direction::Outgoing) {
                if d >= 0 {
                    reachable += 1;
                    total += d as u64;
                }
            }
            let score = if total > 0 { (reachable - 1) as f64 / total as f64 } else { 0.0 };
            scores.insert(graph.node_id(v), score);
        }
        CentralityResult { scores }
    }

    /// Betweenness centrality via Brandes' algorithm, directed.
    ///
    /// Runs one BFS shortest-path counting pass per source followed by
    /// dependency accumulation; endpoints are excluded and scores are
    /// normalised by `(N−1)(N−2)` when `N > 2`.
    #[must_use]
    pub fn betweenness(graph: &Graph) -> CentralityResult {
        let n = graph.node_count();
        let mut centrality: Vec<f64> = vec![0.0; n];

        for s in 0..n {
            // Single-source shortest-path counting
            let mut stack: Vec<usize> = Vec::new();
            let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut sigma: Vec<f64> = vec![0.0; n];
            sigma[s] = 1.0;
            let mut dist: Vec<i64> = vec![-1; n];
            dist[s] = 0;

            let mut queue: VecDeque<usize> = VecDeque::new();
            queue.push_back(s);

            while let Some(v) = queue.pop_front() {
                stack.push(v);

                for &w in graph.out_neighbors(v) {
                    // Path discovery
                    if dist[w] < 0 {
                        dist[w] = dist[v] + 1;
                        queue.push_back(w);
                    }

                    // Path counting
                    if dist[w] == dist[v] + 1 {
                        sigma[w] += sigma[v];
                        predecessors[w].push(v);
                    }
                }
            }

            // Accumulation phase
            let mut delta: Vec<f64> = vec![0.0; n];

            while let Some(w) = stack.pop() {
                for &v in &predecessors[w] {
                    delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
                }
                if w != s {
                    centrality[w] += delta[w];
                }
            }
        }

        if n > 2 {
            let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
            for score in &mut centrality {
                *score *= scale;
            }
        }

        let scores = (0..n).map(|v| (graph.node_id(v), centrality[v])).collect();
        CentralityResult { scores }
    }

    /// Eigenvector centrality by power iteration.
    ///
    /// Scores flow along edge direction: a node is important when
    /// important nodes point at it. The iteration carries the identity
    /// shift (`x ← x + Aᵀx`, then L2 normalisation), which leaves the
    /// dominant eigenvector unchanged while letting periodic
    /// structures converge.
    ///
    /// # Errors
    ///
    /// [`EngineError::Convergence`] when the summed score change does
    /// not drop below `N · tolerance` within the iteration bound.
    pub fn eigenvector(
        graph: &Graph,
        config: &EigenvectorConfig,
    ) -> EngineResult<CentralityResult> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(CentralityResult { scores: HashMap::new() });
        }

        let mut x: Vec<f64> = vec![1.0 / n as f64; n];
        let mut next: Vec<f64> = vec![0.0; n];

        for _ in 0..config.max_iterations {
            for v in 0..n {
                let mut sum = x[v];
                for &u in graph.in_neighbors(v) {
                    sum += x[u];
                }
                next[v] = sum;
            }

            let norm = next.iter().map(|s| s * s).sum::<f64>().sqrt();
            if norm > 0.0 {
                for s in &mut next {
                    *s /= norm;
                }
            }

            let delta: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
            std::mem::swap(&mut x, &mut next);

            if delta < n as f64 * config.tolerance {
                let scores = (0..n).map(|v| (graph.node_id(v), x[v])).collect();
                return Ok(CentralityResult { scores });
            }
        }

        Err(EngineError::Convergence { iterations: config.max_iterations })
    }

    /// Compute every measure and report the top [`TOP_K`] nodes per
    /// measure, in [`CentralityMeasure::ALL`] order.
    pub fn rankings(
        graph: &Graph,
        config: &EigenvectorConfig,
    ) -> EngineResult<Vec<CentralityRanking>> {
        let mut rankings = Vec::with_capacity(CentralityMeasure::ALL.len());
        for measure in CentralityMeasure::ALL {
            let result = match measure {
                CentralityMeasure::Degree => Self::degree(graph)?,
                CentralityMeasure::Closeness => Self::closeness(graph),
                CentralityMeasure::Betweenness => Self::betweenness(graph),
                CentralityMeasure::Eigenvector => Self::eigenvector(graph, config)?,
            };
            rankings.push(CentralityRanking { measure, entries: result.top_n(TOP_K) });
        }
        Ok(rankings)
    }
}
