//! Dataset ingestion: tabular node/edge files into a graph.
//!
//! The node file carries a `NodeId,Labels` header and the edge file a
//! `sourceNodeId,targetNodeId` header, matching the dataset the
//! dashboard is built on. Validation happens here, not in the engine:
//! unknown labels, duplicate ids and dangling endpoints are ingestion
//! failures.

use std::fs::File;
use std::io;
use std::path::Path;

use meshwork_core::{Label, NodeId};
use meshwork_graph::{EngineError, Graph};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading the dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A dataset file could not be read.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A dataset row could not be parsed.
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset violates a graph invariant.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// One row of the node file.
#[derive(Debug, Deserialize)]
struct NodeRecord {
    #[serde(rename = "NodeId")]
    node_id: u64,
    #[serde(rename = "Labels")]
    label: String,
}

/// One row of the edge file.
#[derive(Debug, Deserialize)]
struct EdgeRecord {
    #[serde(rename = "sourceNodeId")]
    source: u64,
    #[serde(rename = "targetNodeId")]
    target: u64,
}

/// Load a graph from a node CSV and an edge CSV.
pub fn load_graph(nodes_path: &Path, edges_path: &Path) -> Result<Graph, IngestError> {
    let mut builder = Graph::builder();

    let mut reader = csv::Reader::from_reader(File::open(nodes_path)?);
    for row in reader.deserialize() {
        let record: NodeRecord = row?;
        let label = Label::parse(&record.label).map_err(EngineError::from)?;
        builder.add_node(NodeId::new(record.node_id), label)?;
    }

    let mut reader = csv::Reader::from_reader(File::open(edges_path)?);
    for row in reader.deserialize() {
        let record: EdgeRecord = row?;
        builder.add_edge(NodeId::new(record.source), NodeId::new(record.target))?;
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_small_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_file(&dir, "nodes.csv", "NodeId,Labels\n1,L1\n2,L1\n3,L2\n");
        let edges =
            write_file(&dir, "edges.csv", "sourceNodeId,targetNodeId\n1,2\n2,3\n3,1\n");

        let graph = load_graph(&nodes, &edges).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        let index = graph.index_of(NodeId::new(3)).unwrap();
        assert_eq!(graph.label(index), Label::L2);
    }

    #[test]
    fn rejects_unknown_labels() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_file(&dir, "nodes.csv", "NodeId,Labels\n1,NotALabel\n");
        let edges = write_file(&dir, "edges.csv", "sourceNodeId,targetNodeId\n");

        let err = load_graph(&nodes, &edges).unwrap_err();
        assert!(matches!(err, IngestError::Engine(EngineError::UnknownLabel(_))));
    }

    #[test]
    fn rejects_dangling_edges() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_file(&dir, "nodes.csv", "NodeId,Labels\n1,L1\n");
        let edges = write_file(&dir, "edges.csv", "sourceNodeId,targetNodeId\n1,99\n");

        let err = load_graph(&nodes, &edges).unwrap_err();
        assert!(matches!(err, IngestError::Engine(EngineError::UnknownNode(_))));
    }

    #[test]
    fn rejects_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = dir.path().join("absent.csv");
        let edges = dir.path().join("also-absent.csv");
        let err = load_graph(&nodes, &edges).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
