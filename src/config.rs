//! Configuration for the kanban board, read from `kanban.toml` in the project
//! directory.
//!
//! Values are layered: file → environment → CLI flags. The file is optional;
//! every field has a default. Without a configured `tasks_file`, the server
//! reads the project's `.kanban` task file when one exists.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//! tasks_file = "tasks.json"
//! dev = false
//!
//! [client]
//! url = "http://127.0.0.1:5000"
//! timeout_secs = 10
//! unknown_status = "skip"
//! ```
//!
//! Environment overrides: `KANBAN_URL` (client url), `KANBAN_PORT` (server port).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::board::loader::UnknownStatusPolicy;
use crate::service::server::ServerConfig;

pub const CONFIG_FILE: &str = "kanban.toml";
/// Default task file, a JSON array of tasks.
pub const TASKS_FILE: &str = ".kanban";

pub const URL_ENV: &str = "KANBAN_URL";
pub const PORT_ENV: &str = "KANBAN_PORT";

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// JSON task file, relative to the project directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_file: Option<PathBuf>,
    /// Permissive CORS and bind on all interfaces.
    #[serde(default)]
    pub dev: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tasks_file: None,
            dev: false,
        }
    }
}

/// `[client]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSection {
    /// Base URL of the task service
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout; unset waits indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub unknown_status: UnknownStatusPolicy,
}

fn default_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
            unknown_status: UnknownStatusPolicy::default(),
        }
    }
}

/// Contents of `kanban.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KanbanToml {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub client: ClientSection,
}

impl KanbanToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse kanban.toml")
    }

    /// Load from `<project_dir>/kanban.toml`, or defaults if absent.
    pub fn load_or_default(project_dir: &Path) -> Result<Self> {
        let config_path = config_path(project_dir);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize kanban.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply `KANBAN_URL` / `KANBAN_PORT` on top of the file values.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(
            std::env::var(URL_ENV).ok(),
            std::env::var(PORT_ENV).ok(),
        )
    }

    fn apply_overrides(&mut self, url: Option<String>, port: Option<String>) -> Result<()> {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.client.url = url;
        }
        if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value '{}'", PORT_ENV, port))?;
        }
        Ok(())
    }

    pub fn client_timeout(&self) -> Option<Duration> {
        self.client.timeout_secs.map(Duration::from_secs)
    }

    /// Server settings, with `tasks_file` resolved against `project_dir`.
    ///
    /// Falls back to `<project_dir>/.kanban` when that is a file.
    pub fn server_config(&self, project_dir: &Path) -> ServerConfig {
        let tasks_file = match &self.server.tasks_file {
            Some(path) => Some(project_dir.join(path)),
            None => Some(tasks_path(project_dir)).filter(|p| p.is_file()),
        };
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            tasks_file,
            dev_mode: self.server.dev,
        }
    }

    /// Check for values that parse but will not work as intended.
    pub fn validate(&self, project_dir: &Path) -> Vec<String> {
        let mut warnings = Vec::new();

        match url::Url::parse(&self.client.url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => warnings.push(format!(
                "client.url uses unsupported scheme '{}'",
                url.scheme()
            )),
            Err(e) => warnings.push(format!("client.url '{}' is invalid: {}", self.client.url, e)),
        }

        if self.client.timeout_secs == Some(0) {
            warnings.push("client.timeout_secs = 0 fails every request".to_string());
        }

        if self.server.port == 0 {
            warnings.push("server.port = 0 binds a random port".to_string());
        }

        if let Some(tasks_file) = &self.server.tasks_file {
            let path = project_dir.join(tasks_file);
            if !path.exists() {
                warnings.push(format!("server.tasks_file {} does not exist", path.display()));
            }
        }

        warnings
    }
}

/// Path of the config file inside `project_dir`.
pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE)
}

/// Path of the default task file inside `project_dir`.
pub fn tasks_path(project_dir: &Path) -> PathBuf {
    project_dir.join(TASKS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = KanbanToml::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.tasks_file.is_none());
        assert!(!config.server.dev);
        assert_eq!(config.client.url, "http://127.0.0.1:5000");
        assert_eq!(config.client.timeout_secs, None);
        assert_eq!(config.client.unknown_status, UnknownStatusPolicy::Skip);
        assert!(config.client_timeout().is_none());
    }

    #[test]
    fn test_parse_empty_file_uses_defaults() {
        let config = KanbanToml::parse("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.client.url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_parse_full_file() {
        let config = KanbanToml::parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            tasks_file = "board/tasks.json"
            dev = true

            [client]
            url = "http://board.local:8080"
            timeout_secs = 3
            unknown_status = "reject"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.server.tasks_file.as_deref(),
            Some(Path::new("board/tasks.json"))
        );
        assert!(config.server.dev);
        assert_eq!(config.client.url, "http://board.local:8080");
        assert_eq!(config.client_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.client.unknown_status, UnknownStatusPolicy::Reject);
    }

    #[test]
    fn test_parse_rejects_bad_policy() {
        let err = KanbanToml::parse("[client]\nunknown_status = \"explode\"").unwrap_err();
        assert!(format!("{:#}", err).contains("kanban.toml"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = KanbanToml::default();
        config.server.port = 7000;
        config.client.unknown_status = UnknownStatusPolicy::Reject;
        config.save(&path).unwrap();

        let loaded = KanbanToml::load(&path).unwrap();
        assert_eq!(loaded.server.port, 7000);
        assert_eq!(loaded.client.unknown_status, UnknownStatusPolicy::Reject);
        assert!(loaded.server.tasks_file.is_none());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = TempDir::new().unwrap();
        let config = KanbanToml::load_or_default(dir.path()).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_or_default_reads_project_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(config_path(dir.path()), "[server]\nport = 6001\n").unwrap();

        let config = KanbanToml::load_or_default(dir.path()).unwrap();
        assert_eq!(config.server.port, 6001);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = KanbanToml::default();
        config
            .apply_overrides(Some("http://other:9000".to_string()), Some("9000".to_string()))
            .unwrap();
        assert_eq!(config.client.url, "http://other:9000");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let mut config = KanbanToml::default();
        config
            .apply_overrides(Some("  ".to_string()), Some(String::new()))
            .unwrap();
        assert_eq!(config.client.url, "http://127.0.0.1:5000");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_invalid_port_override_is_an_error() {
        let mut config = KanbanToml::default();
        let err = config
            .apply_overrides(None, Some("eighty".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(PORT_ENV));
    }

    #[test]
    fn test_server_config_resolves_tasks_file() {
        let mut config = KanbanToml::default();
        config.server.tasks_file = Some(PathBuf::from("tasks.json"));

        let server = config.server_config(Path::new("/srv/board"));
        assert_eq!(server.tasks_file, Some(PathBuf::from("/srv/board/tasks.json")));
        assert_eq!(server.port, 5000);
    }

    #[test]
    fn test_server_config_uses_kanban_task_file() {
        let dir = TempDir::new().unwrap();
        let config = KanbanToml::default();
        assert!(config.server_config(dir.path()).tasks_file.is_none());

        std::fs::write(tasks_path(dir.path()), "[]").unwrap();
        assert_eq!(
            config.server_config(dir.path()).tasks_file,
            Some(dir.path().join(".kanban"))
        );
    }

    #[test]
    fn test_kanban_directory_is_not_a_task_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(tasks_path(dir.path())).unwrap();
        assert!(KanbanToml::default().server_config(dir.path()).tasks_file.is_none());
    }

    #[test]
    fn test_config_file_sits_beside_task_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(tasks_path(dir.path()), "[]").unwrap();

        KanbanToml::default().save(&config_path(dir.path())).unwrap();
        assert!(config_path(dir.path()).is_file());
        assert_eq!(std::fs::read_to_string(tasks_path(dir.path())).unwrap(), "[]");
    }

    #[test]
    fn test_validate_default_is_clean() {
        let dir = TempDir::new().unwrap();
        assert!(KanbanToml::default().validate(dir.path()).is_empty());
    }

    #[test]
    fn test_validate_flags_problems() {
        let dir = TempDir::new().unwrap();
        let mut config = KanbanToml::default();
        config.client.url = "ftp://files.example.com".to_string();
        config.client.timeout_secs = Some(0);
        config.server.port = 0;
        config.server.tasks_file = Some(PathBuf::from("missing.json"));

        let warnings = config.validate(dir.path());
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].contains("ftp"));
        assert!(warnings[3].contains("missing.json"));
    }
}
