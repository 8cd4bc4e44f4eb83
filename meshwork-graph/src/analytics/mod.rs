//! Graph analytics algorithms.
//!
//! Every analysis is a pure function of the immutable [`Graph`] and a
//! configuration value, returning a flat result record:
//!
//! - [`Statistics`] - Global structural statistics
//! - [`Centrality`] - Four node-importance measures and top-K rankings
//! - [`Distribution`] - Degree-frequency histograms, global or per label
//! - [`CommunityDetection`] - Louvain modularity communities
//! - [`LabelAnalysis`] - Label population, clustering and degree summaries
//!
//! [`Graph`]: crate::model::Graph

mod centrality;
mod community;
mod distribution;
mod labels;
mod statistics;

pub use centrality::{
    Centrality, CentralityMeasure, CentralityRanking, CentralityResult, EigenvectorConfig, TOP_K,
};
pub use community::{CommunityConfig, CommunityDetection, CommunityResult, SizeBucket};
pub use distribution::{DegreeBucket, DegreeDistribution, Distribution, DistributionConfig};
pub use labels::{LabelAnalysis, LabelClustering, LabelDegreeSummary, LabelShare};
pub use statistics::{GraphStatistics, Statistics, StatisticsConfig};
