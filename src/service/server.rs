use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use super::api::{self, AppState, SharedState};
use super::catalog::TaskCatalog;

/// Configuration for the task service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON task file; the sample board is served when unset.
    pub tasks_file: Option<PathBuf>,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            tasks_file: None,
            dev_mode: false,
        }
    }
}

impl ServerConfig {
    /// Dev mode listens on all interfaces.
    pub fn bind_addr(&self) -> String {
        let host = if self.dev_mode { "0.0.0.0" } else { self.host.as_str() };
        format!("{}:{}", host, self.port)
    }
}

/// Build the full application router: board page, task list, health.
pub fn build_router(state: SharedState, dev_mode: bool) -> Router {
    let app = api::api_router().fallback(api::not_found).with_state(state);
    if dev_mode {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Load the catalog named by `config`, or the sample board.
pub fn load_catalog(config: &ServerConfig) -> Result<TaskCatalog> {
    match &config.tasks_file {
        Some(path) => TaskCatalog::from_file(path)
            .with_context(|| format!("Failed to load tasks from {}", path.display())),
        None => Ok(TaskCatalog::sample()),
    }
}

/// Serve `catalog` on an already bound listener until Ctrl+C.
pub async fn serve(listener: TcpListener, catalog: TaskCatalog, config: &ServerConfig) -> Result<()> {
    let state = Arc::new(AppState::new(catalog));
    let app = build_router(state, config.dev_mode);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Bind the configured address.
pub async fn bind(config: &ServerConfig) -> Result<(TcpListener, SocketAddr)> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    let local_addr = listener.local_addr()?;
    Ok((listener, local_addr))
}

/// Start the task service.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    // Fail on a bad task file before taking the port.
    let catalog = load_catalog(&config)?;
    info!(tasks = catalog.len(), "Task catalog loaded");

    let (listener, local_addr) = bind(&config).await?;
    println!("Kanban board running at http://{}", local_addr);
    info!(%local_addr, dev_mode = config.dev_mode, "Listening");

    serve(listener, catalog, &config).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
