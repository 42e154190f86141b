//! Task file validation: `kanban check`.

use std::path::Path;

use anyhow::{Context, Result};
use kanban::service::TaskCatalog;

pub fn cmd_check(file: &Path) -> Result<()> {
    let catalog = TaskCatalog::from_file(file)
        .with_context(|| format!("Invalid task file {}", file.display()))?;

    println!("{}: {} task(s)", file.display(), catalog.len());
    for (status, count) in catalog.count_by_status() {
        println!("  {:<12} {}", status.as_str(), count);
    }
    Ok(())
}
