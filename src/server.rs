//! Analysis server implementation

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::analysis::{StubAnalyzer, DEFAULT_ANALYSIS_DELAY};
use crate::handlers;
use crate::runner::TaskRunner;
use crate::store::TaskStore;

/// Configuration for the analysis server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the analysis server
    pub port: u16,
    /// Simulated analysis duration used by the stub analyzer
    pub analysis_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            analysis_delay: DEFAULT_ANALYSIS_DELAY,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Arc<TaskStore>,
    pub runner: TaskRunner,
}

impl AppState {
    /// Build state with the stub analyzer configured from `config`.
    ///
    /// The store is created here and injected into the runner and handlers;
    /// there is no module-level global.
    pub fn new(config: &ServerConfig) -> Arc<Self> {
        let store = Arc::new(TaskStore::new());
        let analyzer = Arc::new(StubAnalyzer::with_delay(config.analysis_delay));
        let runner = TaskRunner::new(analyzer, Arc::clone(&store));

        Arc::new(Self { store, runner })
    }
}

/// Build the application router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::health))
        // Task API
        .route("/coze-plugin/query", post(handlers::api::submit_query))
        .route(
            "/coze-plugin/result/{task_id}",
            get(handlers::api::get_result),
        )
        .layer(cors)
        .with_state(state)
}

/// Analysis task server
pub struct Server;

impl Server {
    /// Start the server and serve until the process is stopped.
    pub async fn start(config: ServerConfig) -> Result<()> {
        let state = AppState::new(&config);
        let app = router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await?;

        info!("analysis server listening on http://{}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Bind an ephemeral local listener and spawn the serve loop.
    ///
    /// Returns the bound socket address and a join handle for the spawned
    /// server task. Integration tests use this to drive the server over
    /// real HTTP; `start` is the production path.
    pub async fn spawn(config: ServerConfig) -> Result<(SocketAddr, JoinHandle<()>)> {
        let state = AppState::new(&config);
        let app = router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok((addr, handle))
    }
}
