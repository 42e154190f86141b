//! CLI command implementations.
//!
//! | Module   | Commands handled |
//! |----------|------------------|
//! | `serve`  | `Serve`          |
//! | `show`   | `Show`           |
//! | `check`  | `Check`          |
//! | `config` | `Config`         |

pub mod check;
pub mod config;
pub mod serve;
pub mod show;

use std::path::Path;

use anyhow::Result;
use kanban::config::KanbanToml;

pub use check::cmd_check;
pub use config::cmd_config;
pub use serve::{ServeArgs, cmd_serve};
pub use show::cmd_show;

/// Config file (if present) with environment overrides applied.
pub fn load_config(config_path: &Path) -> Result<KanbanToml> {
    let mut toml = if config_path.exists() {
        KanbanToml::load(config_path)?
    } else {
        KanbanToml::default()
    };
    toml.apply_env()?;
    Ok(toml)
}
