//! HTTP handlers: one per dashboard query.
//!
//! Every handler is a pure read of the shared immutable graph; the
//! engine does the work and the DTO layer rounds for the wire. Query
//! parameters override the documented engine defaults where a knob
//! exists (community seed, epidemic rates).

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use meshwork_core::Label;
use meshwork_graph::analytics::{
    Centrality, CommunityConfig, CommunityDetection, Distribution, DistributionConfig,
    EigenvectorConfig, LabelAnalysis, Statistics, StatisticsConfig,
};
use meshwork_graph::epidemic::{
    SirConfig, SirSimulation, SisConfig, SisSimulation, MIN_SAMPLE_GAP,
};
use meshwork_graph::Graph;
use serde::Deserialize;

use crate::convert::{
    degree_rows, sir_rows, sis_rows, CompartmentPointDto, DegreeBucketDto, LabelClusteringDto,
    LabelDegreesDto, LabelShareDto, RankingDto, SizeBucketDto, StatisticsDto,
};
use crate::error::ServerError;

/// Shared state: the graph loaded once at startup, read concurrently.
#[derive(Clone)]
pub struct AppState {
    /// The immutable analysis substrate.
    pub graph: Arc<Graph>,
}

/// `GET /api/statistics`
pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsDto>, ServerError> {
    let stats = Statistics::compute(&state.graph, &StatisticsConfig::default())?;
    Ok(Json(StatisticsDto::from(&stats)))
}

/// `GET /api/rankings`
pub async fn rankings(
    State(state): State<AppState>,
) -> Result<Json<Vec<RankingDto>>, ServerError> {
    let rankings = Centrality::rankings(&state.graph, &EigenvectorConfig::default())?;
    Ok(Json(rankings.iter().map(RankingDto::from).collect()))
}

/// `GET /api/degree-distribution`
pub async fn degree_distribution(
    State(state): State<AppState>,
) -> Result<Json<Vec<DegreeBucketDto>>, ServerError> {
    let distribution = Distribution::degree(&state.graph, &DistributionConfig::default())?;
    Ok(Json(degree_rows(&distribution)))
}

/// `GET /api/degree-distribution/{label}`
pub async fn label_degree_distribution(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Json<Vec<DegreeBucketDto>>, ServerError> {
    let label = Label::parse(&label)?;
    let distribution =
        Distribution::degree_for_label(&state.graph, label, &DistributionConfig::default())?;
    Ok(Json(degree_rows(&distribution)))
}

/// Query parameters for community detection.
#[derive(Debug, Deserialize)]
pub struct CommunityParams {
    /// Override for the documented default shuffle seed.
    pub seed: Option<u64>,
}

/// `GET /api/communities`
pub async fn communities(
    State(state): State<AppState>,
    Query(params): Query<CommunityParams>,
) -> Json<Vec<SizeBucketDto>> {
    let mut config = CommunityConfig::default();
    if let Some(seed) = params.seed {
        config = config.with_seed(seed);
    }
    let result = CommunityDetection::louvain(&state.graph, &config);
    Json(result.size_distribution().iter().map(SizeBucketDto::from).collect())
}

/// `GET /api/labels`
pub async fn label_population(
    State(state): State<AppState>,
) -> Result<Json<Vec<LabelShareDto>>, ServerError> {
    let shares = LabelAnalysis::population(&state.graph)?;
    Ok(Json(shares.iter().map(LabelShareDto::from).collect()))
}

/// `GET /api/labels/clustering`
pub async fn label_clustering(
    State(state): State<AppState>,
) -> Result<Json<Vec<LabelClusteringDto>>, ServerError> {
    let clustering = LabelAnalysis::clustering(&state.graph)?;
    Ok(Json(clustering.iter().map(LabelClusteringDto::from).collect()))
}

/// `GET /api/labels/degrees`
pub async fn label_degrees(State(state): State<AppState>) -> Json<Vec<LabelDegreesDto>> {
    let summary = LabelAnalysis::degree_summary(&state.graph);
    Json(summary.iter().map(LabelDegreesDto::from).collect())
}

/// Query parameters for the SIS simulation.
#[derive(Debug, Deserialize)]
pub struct SisParams {
    /// Recovery rate γ.
    pub gamma: Option<f64>,
    /// Transmission rate τ.
    pub tau: Option<f64>,
    /// Time horizon.
    pub t_max: Option<f64>,
    /// Seed label of the initially infected set.
    pub seed_label: Option<String>,
    /// Random source seed.
    pub seed: Option<u64>,
}

/// `GET /api/epidemic/sis`
pub async fn epidemic_sis(
    State(state): State<AppState>,
    Query(params): Query<SisParams>,
) -> Result<Json<Vec<CompartmentPointDto>>, ServerError> {
    let mut config = SisConfig::default();
    if let Some(gamma) = params.gamma {
        config.recovery_rate = gamma;
    }
    if let Some(tau) = params.tau {
        config.transmission_rate = tau;
    }
    if let Some(t_max) = params.t_max {
        config.t_max = t_max;
    }
    if let Some(label) = &params.seed_label {
        config.seed_label = Label::parse(label)?;
    }
    if let Some(seed) = params.seed {
        config.rng_seed = seed;
    }
    let trace = SisSimulation::run(&state.graph, &config);
    Ok(Json(sis_rows(&trace.downsample(MIN_SAMPLE_GAP))))
}

/// Query parameters for the SIR simulation.
#[derive(Debug, Deserialize)]
pub struct SirParams {
    /// Per-contact infection probability.
    pub p: Option<f64>,
    /// Per-node recovery probability.
    pub r: Option<f64>,
    /// Step horizon.
    pub t_max: Option<u32>,
    /// Seed label of the initially infected set.
    pub seed_label: Option<String>,
    /// Random source seed.
    pub seed: Option<u64>,
}

/// `GET /api/epidemic/sir`
pub async fn epidemic_sir(
    State(state): State<AppState>,
    Query(params): Query<SirParams>,
) -> Result<Json<Vec<CompartmentPointDto>>, ServerError> {
    let mut config = SirConfig::default();
    if let Some(p) = params.p {
        config.infection_probability = p;
    }
    if let Some(r) = params.r {
        config.recovery_probability = r;
    }
    if let Some(t_max) = params.t_max {
        config.t_max = t_max;
    }
    if let Some(label) = &params.seed_label {
        config.seed_label = Label::parse(label)?;
    }
    if let Some(seed) = params.seed {
        config.rng_seed = seed;
    }
    let trace = SirSimulation::run(&state.graph, &config);
    Ok(Json(sir_rows(&trace.downsample(MIN_SAMPLE_GAP))))
}
