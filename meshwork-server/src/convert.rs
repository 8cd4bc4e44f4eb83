//! Engine records to response DTOs.
//!
//! The engine returns unrounded scalars; the response contract rounds
//! every float to six decimal digits here, and splits epidemic traces
//! into the per-compartment rows the charting client consumes.

use meshwork_graph::analytics::{
    CentralityRanking, DegreeDistribution, GraphStatistics, LabelClustering, LabelDegreeSummary,
    LabelShare, SizeBucket,
};
use meshwork_graph::epidemic::{SirSample, SisSample};
use serde::Serialize;

/// Round to six decimal digits, per the response contract.
#[must_use]
pub fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Structural statistics response record.
#[derive(Debug, Serialize)]
pub struct StatisticsDto {
    pub nodes_count: usize,
    pub edges_count: usize,
    pub avg_in_degree: f64,
    pub avg_out_degree: f64,
    pub density: f64,
    pub diameter: usize,
    pub avg_shortest_path_length: f64,
    pub avg_cc: f64,
    pub transitivity: f64,
    pub assortativity: Option<f64>,
    pub degree_centralization: f64,
}

impl From<&GraphStatistics> for StatisticsDto {
    fn from(stats: &GraphStatistics) -> Self {
        Self {
            nodes_count: stats.node_count,
            edges_count: stats.edge_count,
            avg_in_degree: round6(stats.avg_in_degree),
            avg_out_degree: round6(stats.avg_out_degree),
            density: round6(stats.density),
            diameter: stats.diameter,
            avg_shortest_path_length: round6(stats.avg_shortest_path_length),
            avg_cc: round6(stats.avg_clustering),
            transitivity: round6(stats.transitivity),
            assortativity: stats.assortativity.map(round6),
            degree_centralization: round6(stats.degree_centralization),
        }
    }
}

/// One (node, score) ranking entry.
#[derive(Debug, Serialize)]
pub struct RankingEntryDto {
    pub node: u64,
    pub score: f64,
}

/// One top-K table for a centrality measure.
#[derive(Debug, Serialize)]
pub struct RankingDto {
    pub measure: &'static str,
    pub nodes: Vec<RankingEntryDto>,
}

impl From<&CentralityRanking> for RankingDto {
    fn from(ranking: &CentralityRanking) -> Self {
        Self {
            measure: ranking.measure.as_str(),
            nodes: ranking
                .entries
                .iter()
                .map(|&(node, score)| RankingEntryDto {
                    node: node.as_u64(),
                    score: round6(score),
                })
                .collect(),
        }
    }
}

/// One degree histogram row.
#[derive(Debug, Serialize)]
pub struct DegreeBucketDto {
    pub degree: usize,
    pub frequency: usize,
}

/// Degree histogram rows from an engine distribution.
#[must_use]
pub fn degree_rows(distribution: &DegreeDistribution) -> Vec<DegreeBucketDto> {
    distribution
        .buckets
        .iter()
        .map(|bucket| DegreeBucketDto { degree: bucket.degree, frequency: bucket.frequency })
        .collect()
}

/// One community-size histogram row.
#[derive(Debug, Serialize)]
pub struct SizeBucketDto {
    pub size: usize,
    pub communities: usize,
}

impl From<&SizeBucket> for SizeBucketDto {
    fn from(bucket: &SizeBucket) -> Self {
        Self { size: bucket.size, communities: bucket.count }
    }
}

/// One label population row.
#[derive(Debug, Serialize)]
pub struct LabelShareDto {
    pub label: &'static str,
    pub percentage: f64,
}

impl From<&LabelShare> for LabelShareDto {
    fn from(share: &LabelShare) -> Self {
        Self { label: share.label.as_str(), percentage: round6(share.percentage) }
    }
}

/// One label clustering row.
#[derive(Debug, Serialize)]
pub struct LabelClusteringDto {
    pub label: &'static str,
    pub avg_clustering: f64,
}

impl From<&LabelClustering> for LabelClusteringDto {
    fn from(entry: &LabelClustering) -> Self {
        Self { label: entry.label.as_str(), avg_clustering: round6(entry.avg_clustering) }
    }
}

/// One label degree-summary row.
#[derive(Debug, Serialize)]
pub struct LabelDegreesDto {
    pub label: &'static str,
    pub avg_degree: f64,
    pub min_degree: usize,
    pub max_degree: usize,
}

impl From<&LabelDegreeSummary> for LabelDegreesDto {
    fn from(summary: &LabelDegreeSummary) -> Self {
        Self {
            label: summary.label.as_str(),
            avg_degree: round6(summary.avg_degree),
            min_degree: summary.min_degree,
            max_degree: summary.max_degree,
        }
    }
}

/// One per-compartment charting row.
#[derive(Debug, Serialize)]
pub struct CompartmentPointDto {
    pub time: f64,
    pub compartment: &'static str,
    pub count: usize,
}

/// Split downsampled SIS samples into susceptible/infected rows.
#[must_use]
pub fn sis_rows(samples: &[SisSample]) -> Vec<CompartmentPointDto> {
    let mut rows = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        let time = round6(sample.time);
        rows.push(CompartmentPointDto {
            time,
            compartment: "susceptible",
            count: sample.susceptible,
        });
        rows.push(CompartmentPointDto { time, compartment: "infected", count: sample.infected });
    }
    rows
}

/// Split downsampled SIR samples into susceptible/infected/recovered
/// rows.
#[must_use]
pub fn sir_rows(samples: &[SirSample]) -> Vec<CompartmentPointDto> {
    let mut rows = Vec::with_capacity(samples.len() * 3);
    for sample in samples {
        let time = f64::from(sample.time);
        rows.push(CompartmentPointDto {
            time,
            compartment: "susceptible",
            count: sample.susceptible,
        });
        rows.push(CompartmentPointDto { time, compartment: "infected", count: sample.infected });
        rows.push(CompartmentPointDto {
            time,
            compartment: "recovered",
            count: sample.recovered,
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round6_truncates_to_the_contract() {
        assert_eq!(round6(1.0 / 3.0), 0.333333);
        assert_eq!(round6(2.0 / 3.0), 0.666667);
        assert_eq!(round6(1.5), 1.5);
        assert_eq!(round6(0.0), 0.0);
    }

    #[test]
    fn undefined_assortativity_serialises_as_null() {
        let stats = GraphStatistics {
            node_count: 4,
            edge_count: 4,
            avg_in_degree: 1.0,
            avg_out_degree: 1.0,
            density: 1.0 / 3.0,
            diameter: 3,
            avg_shortest_path_length: 1.5,
            avg_clustering: 0.0,
            transitivity: 0.0,
            assortativity: None,
            degree_centralization: 0.0,
        };
        let json = serde_json::to_value(StatisticsDto::from(&stats)).unwrap();
        assert_eq!(json["assortativity"], serde_json::Value::Null);
        assert_eq!(json["density"], serde_json::json!(0.333333));
        assert_eq!(json["nodes_count"], serde_json::json!(4));
    }

    #[test]
    fn sis_rows_split_per_compartment() {
        let samples = [SisSample { time: 0.0, susceptible: 3, infected: 1 }];
        let rows = sis_rows(&samples);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].compartment, "susceptible");
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[1].compartment, "infected");
        assert_eq!(rows[1].count, 1);
    }

    #[test]
    fn sir_rows_split_per_compartment() {
        let samples = [SirSample { time: 2, susceptible: 2, infected: 1, recovered: 1 }];
        let rows = sir_rows(&samples);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].compartment, "recovered");
        assert_eq!(rows[2].count, 1);
        assert_eq!(rows[0].time, 2.0);
    }
}
