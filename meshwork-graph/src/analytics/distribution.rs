//! Degree-frequency distributions.
//!
//! Groups node total degrees (in + out) into `(degree, frequency)`
//! buckets sorted ascending by degree, either over every node or
//! restricted to the nodes carrying one label. The frequency sum must
//! equal the number of nodes considered; a mismatch is logged as a
//! diagnostic and only fails the call in strict mode.

use std::collections::BTreeMap;

use meshwork_core::Label;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::model::Graph;

/// Configuration for degree distributions.
#[derive(Debug, Clone, Default)]
pub struct DistributionConfig {
    /// Turn the frequency-sum diagnostic into a hard
    /// [`EngineError::InvariantViolation`] failure.
    /// Default: false
    pub strict: bool,
}

impl DistributionConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the frequency-sum invariant aborts the call.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// One (degree value, node frequency) bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeBucket {
    /// Total degree value.
    pub degree: usize,
    /// Number of considered nodes with that degree.
    pub frequency: usize,
}

/// Degree histogram over a set of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeDistribution {
    /// Buckets sorted ascending by degree.
    pub buckets: Vec<DegreeBucket>,
    /// Number of nodes the histogram covers.
    pub node_count: usize,
}

impl DegreeDistribution {
    /// Sum of the bucket frequencies.
    #[must_use]
    pub fn frequency_sum(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.frequency).sum()
    }
}

/// Degree distribution computation.
pub struct Distribution;

impl Distribution {
    /// Total-degree histogram over every node.
    pub fn degree(graph: &Graph, config: &DistributionConfig) -> EngineResult<DegreeDistribution> {
        Self::histogram(graph, (0..graph.node_count()).collect(), config)
    }

    /// Total-degree histogram restricted to the nodes carrying `label`.
    ///
    /// Degrees are still computed over the full graph's adjacency;
    /// only the set of counted nodes shrinks.
    pub fn degree_for_label(
        graph: &Graph,
        label: Label,
        config: &DistributionConfig,
    ) -> EngineResult<DegreeDistribution> {
        Self::histogram(graph, graph.nodes_with_label(label), config)
    }

    fn histogram(
        graph: &Graph,
        indices: Vec<usize>,
        config: &DistributionConfig,
    ) -> EngineResult<DegreeDistribution> {
        let node_count = indices.len();
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for index in indices {
            *counts.entry(graph.total_degree(index)).or_insert(0) += 1;
        }
        let buckets = counts
            .into_iter()
            .map(|(degree, frequency)| DegreeBucket { degree, frequency })
            .collect();

        let distribution = DegreeDistribution { buckets, node_count };
        let actual = distribution.frequency_sum();
        if actual != node_count {
            warn!(expected = node_count, actual, "degree distribution frequency sum mismatch");
            if config.strict {
                return Err(EngineError::InvariantViolation { expected: node_count, actual });
            }
        }
        Ok(distribution)
    }
}
