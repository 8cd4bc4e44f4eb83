//! Label-conditioned analyses.
//!
//! Three related views over the node labels:
//!
//! - **Population**: percentage of all nodes per label present in the
//!   data; percentages sum to 100.
//! - **Clustering**: mean local clustering coefficient per label over
//!   the **fixed** recognised set ([`Label::ALL`]); a fixed label
//!   with zero nodes is a reported [`EngineError::DivisionByZero`],
//!   not a skip.
//! - **Degree summary**: average/min/max total degree per label
//!   **derived from the data**, ascending by label name.
//!
//! The two enumeration contracts are deliberate and documented; the
//! fixed-set path is the one that can hit the degenerate empty bucket.

use std::collections::BTreeMap;

use meshwork_core::Label;

use crate::error::{EngineError, EngineResult};
use crate::model::Graph;

/// Share of the node population carrying one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelShare {
    /// The label.
    pub label: Label,
    /// Percentage of all nodes: `count / total · 100`.
    pub percentage: f64,
}

/// Mean local clustering coefficient of the nodes carrying one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelClustering {
    /// The label.
    pub label: Label,
    /// Mean triangle-based local clustering over its nodes.
    pub avg_clustering: f64,
}

/// Total-degree summary of the nodes carrying one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDegreeSummary {
    /// The label.
    pub label: Label,
    /// Mean total degree.
    pub avg_degree: f64,
    /// Minimum total degree.
    pub min_degree: usize,
    /// Maximum total degree.
    pub max_degree: usize,
}

/// Label-conditioned analyses.
pub struct LabelAnalysis;

impl LabelAnalysis {
    /// Percentage of all nodes per label present in the data, in
    /// ascending label order.
    ///
    /// # Errors
    ///
    /// [`EngineError::DivisionByZero`] on an empty graph.
    pub fn population(graph: &Graph) -> EngineResult<Vec<LabelShare>> {
        let total = graph.node_count();
        if total == 0 {
            return Err(EngineError::DivisionByZero(
                "label population on an empty graph".to_owned(),
            ));
        }
        let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
        for index in 0..total {
            *counts.entry(graph.label(index)).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(label, count)| LabelShare {
                label,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .collect())
    }

    /// Mean local clustering coefficient per label over the fixed
    /// recognised set, computed on the undirected projection.
    ///
    /// # Errors
    ///
    /// [`EngineError::DivisionByZero`] naming the first fixed label
    /// with zero nodes.
    pub fn clustering(graph: &Graph) -> EngineResult<Vec<LabelClustering>> {
        let und = graph.undirected();
        let mut out = Vec::with_capacity(Label::ALL.len());
        for label in Label::ALL {
            let members = graph.nodes_with_label(label);
            if members.is_empty() {
                return Err(EngineError::DivisionByZero(format!(
                    "no nodes carry label {label}"
                )));
            }
            let total: f64 = members.iter().map(|&index| und.local_clustering(index)).sum();
            out.push(LabelClustering { label, avg_clustering: total / members.len() as f64 });
        }
        Ok(out)
    }

    /// Average/min/max total degree per label derived from the data,
    /// ascending by label name.
    #[must_use]
    pub fn degree_summary(graph: &Graph) -> Vec<LabelDegreeSummary> {
        // (count, degree sum, min, max) accumulator per label.
        let mut accumulators: BTreeMap<Label, (usize, usize, usize, usize)> = BTreeMap::new();
        for index in 0..graph.node_count() {
            let degree = graph.total_degree(index);
            let entry =
                accumulators.entry(graph.label(index)).or_insert((0, 0, usize::MAX, 0));
            entry.0 += 1;
            entry.1 += degree;
            entry.2 = entry.2.min(degree);
            entry.3 = entry.3.max(degree);
        }
        accumulators
            .into_iter()
            .map(|(label, (count, sum, min, max))| LabelDegreeSummary {
                label,
                avg_degree: sum as f64 / count as f64,
                min_degree: min,
                max_degree: max,
            })
            .collect()
    }
}
