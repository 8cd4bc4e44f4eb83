//! Community detection by Louvain modularity optimisation.
//!
//! The graph is projected to its undirected simple form with unit
//! weights, then partitioned greedily: seeded-shuffled local move
//! passes relocate nodes to the neighbouring community with the best
//! modularity gain until no move helps, the community graph is
//! coarsened into super-nodes, and the two phases repeat until a level
//! stops improving modularity.
//!
//! # Determinism
//!
//! The only randomness is the node visiting order, drawn from a
//! `StdRng` seeded with [`CommunityConfig::seed`]. Identical seed and
//! graph give the identical partition, which keeps results testable;
//! callers wanting a different greedy draw pass a different seed.
//!
//! # Example
//!
//! ```ignore
//! use meshwork_graph::analytics::{CommunityDetection, CommunityConfig};
//!
//! let result = CommunityDetection::louvain(&graph, &CommunityConfig::default());
//! for bucket in result.size_distribution() {
//!     println!("{} communities of size {}", bucket.count, bucket.size);
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use meshwork_core::NodeId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::model::Graph;

/// Configuration for Louvain community detection.
#[derive(Debug, Clone)]
pub struct CommunityConfig {
    /// Seed for the node-order shuffle, fixed so runs are reproducible.
    /// Default: 42
    pub seed: u64,

    /// Maximum local-move passes per level.
    /// Default: 100
    pub max_passes: usize,

    /// Minimum modularity gain for a move or a level to count as an
    /// improvement.
    /// Default: 1e-9
    pub min_gain: f64,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self { seed: 42, max_passes: 100, min_gain: 1e-9 }
    }
}

impl CommunityConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shuffle seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum local-move passes per level.
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Set the minimum modularity gain threshold.
    #[must_use]
    pub const fn with_min_gain(mut self, min_gain: f64) -> Self {
        self.min_gain = min_gain;
        self
    }
}

/// One (community size, number of communities) bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBucket {
    /// Community size in nodes.
    pub size: usize,
    /// Number of communities with that size.
    pub count: usize,
}

/// Result of community detection.
#[derive(Debug, Clone)]
pub struct CommunityResult {
    /// Community assignments: node -> community id, contiguous from 0.
    pub assignments: HashMap<NodeId, u64>,

    /// Number of distinct communities found.
    pub num_communities: usize,

    /// Modularity of the final partition.
    pub modularity: f64,

    /// Number of coarsening levels performed.
    pub levels: usize,
}

impl CommunityResult {
    /// Get the community id for a specific node.
    #[must_use]
    pub fn community(&self, node: NodeId) -> Option<u64> {
        self.assignments.get(&node).copied()
    }

    /// Community sizes keyed by community id.
    #[must_use]
    pub fn community_sizes(&self) -> HashMap<u64, usize> {
        let mut sizes: HashMap<u64, usize> = HashMap::new();
        for &community in self.assignments.values() {
            *sizes.entry(community).or_insert(0) += 1;
        }
        sizes
    }

    /// (size, number of communities with that size) buckets, ascending
    /// by size.
    #[must_use]
    pub fn size_distribution(&self) -> Vec<SizeBucket> {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for size in self.community_sizes().into_values() {
            *counts.entry(size).or_insert(0) += 1;
        }
        counts.into_iter().map(|(size, count)| SizeBucket { size, count }).collect()
    }
}

/// Louvain community detection.
pub struct CommunityDetection;

impl CommunityDetection {
    /// Partition the graph into modularity communities.
    ///
    /// Operates on the undirected projection with unit edge weights.
    /// Nodes without any undirected edge each form their own
    /// community.
    #[must_use]
    pub fn louvain(graph: &Graph, config: &CommunityConfig) -> CommunityResult {
        let n = graph.node_count();
        if n == 0 {
            return CommunityResult {
                assignments: HashMap::new(),
                num_communities: 0,
                modularity: 0.0,
                levels: 0,
            };
        }

        let und = graph.undirected();
        // Level state: weighted neighbour lists plus folded internal
        // weight per super-node (each internal edge counted once).
        let mut neighbors: Vec<Vec<(usize, f64)>> =
            (0..n).map(|v| und.neighbors(v).map(|w| (w, 1.0)).collect()).collect();
        let mut loops: Vec<f64> = vec![0.0; n];

        let two_m: f64 = neighbors.iter().flatten().map(|&(_, w)| w).sum();
        if two_m == 0.0 {
            // No edges: every node is its own community.
            let assignments =
                graph.nodes().iter().enumerate().map(|(i, &id)| (id, i as u64)).collect();
            return CommunityResult {
                assignments,
                num_communities: n,
                modularity: 0.0,
                levels: 0,
            };
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut membership: Vec<usize> = (0..n).collect();
        let mut modularity = Self::partition_modularity(&neighbors, &loops, two_m);
        let mut levels = 0;

        loop {
            let (assignment, moved) =
                Self::local_move(&neighbors, &loops, two_m, config, &mut rng);
            if !moved {
                break;
            }

            for community in &mut membership {
                *community = assignment[*community];
            }

            let count = assignment.iter().copied().max().map_or(0, |max| max + 1);
            let (next_neighbors, next_loops) =
                Self::aggregate(&neighbors, &loops, &assignment, count);
            let next_modularity = Self::partition_modularity(&next_neighbors, &next_loops, two_m);
            neighbors = next_neighbors;
            loops = next_loops;
            levels += 1;

            if next_modularity - modularity <= config.min_gain {
                modularity = next_modularity;
                break;
            }
            modularity = next_modularity;
        }

        // Renumber communities contiguously in node insertion order.
        let mut remap: HashMap<usize, u64> = HashMap::new();
        let mut next_id = 0u64;
        let assignments = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let community = *remap.entry(membership[i]).or_insert_with(|| {
                    let fresh = next_id;
                    next_id += 1;
                    fresh
                });
                (id, community)
            })
            .collect();

        CommunityResult { assignments, num_communities: remap.len(), modularity, levels }
    }

    /// One level of greedy local moves. Returns the contiguous
    /// community assignment per current node and whether any node
    /// moved.
    fn local_move(
        neighbors: &[Vec<(usize, f64)>],
        loops: &[f64],
        two_m: f64,
        config: &CommunityConfig,
        rng: &mut StdRng,
    ) -> (Vec<usize>, bool) {
        let n = neighbors.len();
        let degree: Vec<f64> = (0..n)
            .map(|v| neighbors[v].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * loops[v])
            .collect();

        let mut community: Vec<usize> = (0..n).collect();
        let mut sigma_tot: Vec<f64> = degree.clone();
        let mut order: Vec<usize> = (0..n).collect();
        let mut moved_any = false;

        for _ in 0..config.max_passes {
            order.shuffle(rng);
            let mut moved_this_pass = false;

            for &v in &order {
                let current = community[v];
                sigma_tot[current] -= degree[v];

                // Edge weight from v into each neighbouring community,
                // in deterministic community order.
                let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
                for &(w, weight) in &neighbors[v] {
                    if w != v {
                        *weights.entry(community[w]).or_insert(0.0) += weight;
                    }
                }

                let own_weight = weights.get(&current).copied().unwrap_or(0.0);
                let mut best = current;
                let mut best_gain = own_weight - sigma_tot[current] * degree[v] / two_m;
                for (&candidate, &weight) in &weights {
                    if candidate == current {
                        continue;
                    }
                    let gain = weight - sigma_tot[candidate] * degree[v] / two_m;
                    if gain > best_gain + config.min_gain {
                        best_gain = gain;
                        best = candidate;
                    }
                }

                sigma_tot[best] += degree[v];
                if best != current {
                    community[v] = best;
                    moved_this_pass = true;
                    moved_any = true;
                }
            }

            if !moved_this_pass {
                break;
            }
        }

        // Renumber contiguously.
        let mut remap: HashMap<usize, usize> = HashMap::new();
        let mut next_id = 0usize;
        let assignment = community
            .iter()
            .map(|&c| {
                *remap.entry(c).or_insert_with(|| {
                    let fresh = next_id;
                    next_id += 1;
                    fresh
                })
            })
            .collect();
        (assignment, moved_any)
    }

    /// Coarsen communities into super-nodes, summing edge weights.
    fn aggregate(
        neighbors: &[Vec<(usize, f64)>],
        loops: &[f64],
        assignment: &[usize],
        count: usize,
    ) -> (Vec<Vec<(usize, f64)>>, Vec<f64>) {
        let mut next_loops = vec![0.0; count];
        let mut maps: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];

        for (v, targets) in neighbors.iter().enumerate() {
            let cv = assignment[v];
            next_loops[cv] += loops[v];
            for &(w, weight) in targets {
                let cw = assignment[w];
                if cv == cw {
                    // Each undirected edge shows up from both sides;
                    // fold it into the loop weight once.
                    if v < w {
                        next_loops[cv] += weight;
                    }
                } else {
                    *maps[cv].entry(cw).or_insert(0.0) += weight;
                }
            }
        }

        (maps.into_iter().map(|map| map.into_iter().collect()).collect(), next_loops)
    }

    /// Modularity of the partition where every current node is one
    /// community.
    fn partition_modularity(
        neighbors: &[Vec<(usize, f64)>],
        loops: &[f64],
        two_m: f64,
    ) -> f64 {
        let m = two_m / 2.0;
        (0..neighbors.len())
            .map(|c| {
                let degree =
                    neighbors[c].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * loops[c];
                loops[c] / m - (degree / two_m) * (degree / two_m)
            })
            .sum()
    }
}
