use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(version, about = "Three-column kanban board over a task list endpoint")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Path to kanban.toml. Defaults to <project-dir>/kanban.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the task list and the rendered board over HTTP
    Serve {
        /// Port to serve on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// JSON task file to serve. Defaults to <project-dir>/.kanban, else the sample board
        #[arg(long)]
        tasks_file: Option<PathBuf>,

        /// Enable dev mode (CORS permissive, bind on all interfaces)
        #[arg(long)]
        dev: bool,

        /// Open the board in a browser after the server starts
        #[arg(long)]
        open: bool,
    },
    /// Load the board from a task service and print it
    Show {
        /// Base URL of the task service
        #[arg(long)]
        url: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Fail on tasks with an unknown status instead of skipping them
        #[arg(long)]
        strict: bool,

        /// Wrap width for text output
        #[arg(long, default_value = "72")]
        width: usize,
    },
    /// Validate a task file and print per-status counts
    Check {
        file: PathBuf,
    },
    /// View, validate or create configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration
    Validate,
    /// Create a default kanban.toml
    Init,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| kanban::config::config_path(&project_dir));

    match cli.command {
        Commands::Serve {
            port,
            host,
            tasks_file,
            dev,
            open,
        } => {
            cmd::cmd_serve(
                &project_dir,
                &config_path,
                cmd::ServeArgs {
                    port,
                    host,
                    tasks_file,
                    dev,
                    open,
                },
            )
            .await?
        }
        Commands::Show {
            url,
            format,
            strict,
            width,
        } => cmd::cmd_show(&config_path, url, format, strict, width).await?,
        Commands::Check { file } => cmd::cmd_check(&file)?,
        Commands::Config { command } => cmd::cmd_config(&project_dir, &config_path, command)?,
    }

    Ok(())
}
