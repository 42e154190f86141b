//! Configuration view and validation commands: `kanban config`.

use std::path::Path;

use anyhow::{Context, Result};
use kanban::config::{KanbanToml, PORT_ENV, URL_ENV};

use super::super::ConfigCommands;
use super::load_config;

pub fn cmd_config(
    project_dir: &Path,
    config_path: &Path,
    command: Option<ConfigCommands>,
) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Kanban Configuration");
            println!("====================");
            println!();

            let toml = if config_path.exists() {
                println!("Config file: {}", config_path.display());
                KanbanToml::load(config_path)?
            } else {
                println!("No kanban.toml found at {}", config_path.display());
                println!("Using default configuration.");
                KanbanToml::default()
            };
            println!();
            print_sections(&toml);

            // Show effective values (including env overrides)
            let effective = load_config(config_path)?;
            println!("Effective values (with {}/{} overrides):", URL_ENV, PORT_ENV);
            println!("  server.port = {}", effective.server.port);
            println!("  client.url = \"{}\"", effective.client.url);
            println!();

            if !config_path.exists() {
                println!("Run 'kanban config init' to create a kanban.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No kanban.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = KanbanToml::load(config_path)?;
            let warnings = toml.validate(project_dir);

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("kanban.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if let Some(dir) = config_path.parent() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }

            KanbanToml::default().save(config_path)?;

            println!("Created kanban.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [server] host, port, tasks_file, dev");
            println!("  - [client] url, timeout_secs, unknown_status");
            println!();
        }
    }

    Ok(())
}

fn print_sections(toml: &KanbanToml) {
    println!("[server]");
    println!("  host = \"{}\"", toml.server.host);
    println!("  port = {}", toml.server.port);
    if let Some(tasks_file) = &toml.server.tasks_file {
        println!("  tasks_file = \"{}\"", tasks_file.display());
    }
    println!("  dev = {}", toml.server.dev);
    println!();

    println!("[client]");
    println!("  url = \"{}\"", toml.client.url);
    if let Some(timeout) = toml.client.timeout_secs {
        println!("  timeout_secs = {}", timeout);
    }
    println!("  unknown_status = \"{}\"", toml.client.unknown_status);
    println!();
}
