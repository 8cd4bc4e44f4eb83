//! Meshwork Graph
//!
//! The graph analytics engine: an immutable in-memory directed graph
//! model and the algorithms that answer descriptive and dynamic
//! questions about it: structural statistics, centrality rankings,
//! degree distributions, community structure, label-conditioned
//! statistics and epidemic-spread simulation.
//!
//! Every analysis is a pure function of `(graph, parameters)`; the
//! graph is never mutated after construction, so concurrent analyses
//! may share one instance without locking.
//!
//! # Modules
//!
//! - [`model`] - The directed graph model and its undirected projection
//! - [`traversal`] - Direction and shortest-path primitives
//! - [`analytics`] - Statistics, centrality, distributions, communities, labels
//! - [`epidemic`] - SIS and SIR spread simulations
//! - [`error`] - Engine error types

pub mod analytics;
pub mod epidemic;
pub mod error;
pub mod model;
pub mod traversal;

pub use error::{EngineError, EngineResult};
pub use model::{Graph, GraphBuilder, UndirectedGraph};
