//! Task service command: `kanban serve`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use kanban::service::server::{ServerConfig, start_server};

use super::load_config;

/// Flags given on the command line; each overrides the config file.
pub struct ServeArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub tasks_file: Option<PathBuf>,
    pub dev: bool,
    pub open: bool,
}

pub async fn cmd_serve(project_dir: &Path, config_path: &Path, args: ServeArgs) -> Result<()> {
    let toml = load_config(config_path)?;
    let config = resolve(toml.server_config(project_dir), &args);

    // Skip in dev mode (no browser inside containers)
    if args.open && !config.dev_mode {
        let url = format!("http://localhost:{}", config.port);
        tokio::spawn(async move {
            // Small delay to let the server start binding
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
            if let Err(e) = open::that(&url) {
                eprintln!("Failed to open browser: {}", e);
            }
        });
    }

    start_server(config).await
}

fn resolve(mut config: ServerConfig, args: &ServeArgs) -> ServerConfig {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(tasks_file) = &args.tasks_file {
        config.tasks_file = Some(tasks_file.clone());
    }
    config.dev_mode |= args.dev;
    config
}
