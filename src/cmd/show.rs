//! One board load from a running task service: `kanban show`.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use kanban::board::{BoardLoader, Document, HttpTaskSource, LoadReport, UnknownStatusPolicy};

use super::load_config;
use crate::OutputFormat;

pub async fn cmd_show(
    config_path: &Path,
    url: Option<String>,
    format: OutputFormat,
    strict: bool,
    width: usize,
) -> Result<()> {
    let toml = load_config(config_path)?;
    let base_url = url.unwrap_or_else(|| toml.client.url.clone());
    let policy = if strict {
        UnknownStatusPolicy::Reject
    } else {
        toml.client.unknown_status
    };

    let source = HttpTaskSource::new(&base_url, toml.client_timeout())?;
    let endpoint = source.endpoint().to_string();
    let loader = BoardLoader::new(source).with_policy(policy);

    let mut document = Document::new();
    let report = loader
        .load(&mut document)
        .await
        .with_context(|| format!("Failed to load board from {}", endpoint))?;

    print!("{}", render(&document, format, width)?);
    print_skipped(&report);
    Ok(())
}

fn render(document: &Document, format: OutputFormat, width: usize) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => document.to_text(width),
        OutputFormat::Html => format!("{}\n", document.to_page()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&document.view())
                .context("Failed to serialize board")?;
            format!("{}\n", json)
        }
    })
}

fn print_skipped(report: &LoadReport) {
    if report.skipped.is_empty() {
        return;
    }
    eprintln!(
        "{} {} task(s) with an unknown status were not shown:",
        style("warning:").yellow().bold(),
        report.skipped.len()
    );
    for skipped in &report.skipped {
        eprintln!(
            "  #{} {} (status \"{}\")",
            skipped.index, skipped.name, skipped.status
        );
    }
}
