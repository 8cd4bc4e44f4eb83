//! Meshwork analytics server binary.
//!
//! Loads the node/edge dataset once and serves the analytics API.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "meshwork-server")]
#[command(about = "REST analytics API over a node/edge dataset")]
struct Args {
    /// Path to the node CSV (NodeId,Labels)
    nodes: PathBuf,

    /// Path to the edge CSV (sourceNodeId,targetNodeId)
    edges: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "4000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("meshwork_server=info".parse()?),
        )
        .init();

    let args = Args::parse();
    meshwork_server::server::run(&args.nodes, &args.edges, &args.host, args.port).await
}
