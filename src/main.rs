//! coze-plugin-server: asynchronous analysis task API.
//!
//! Submit a query with `POST /coze-plugin/query`, poll
//! `GET /coze-plugin/result/{task_id}` until the analysis completes.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use coze_plugin_server::server::{Server, ServerConfig};

/// Asynchronous analysis task API: submit a query, poll for the result
#[derive(Parser)]
#[command(name = "coze-plugin-server")]
#[command(about = "Asynchronous analysis task API", long_about = None)]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coze_plugin_server=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = ServerConfig {
        port: cli.port,
        ..ServerConfig::default()
    };

    Server::start(config).await
}
