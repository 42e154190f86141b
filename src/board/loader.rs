//! Board loader: one fetch of the task list, one render pass into a
//! [`Document`].

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use super::document::{Document, TaskCard};
use super::models::{Task, TaskStatus};
use crate::errors::LoadError;

/// Fixed path of the task list endpoint.
pub const TASKS_PATH: &str = "/tasks";

/// Something that can produce the task list for one load.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, LoadError>;
}

#[async_trait]
impl<T: TaskSource + ?Sized> TaskSource for Arc<T> {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, LoadError> {
        (**self).fetch_tasks().await
    }
}

/// Reads `GET {base}/tasks` over HTTP.
pub struct HttpTaskSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTaskSource {
    /// `timeout` of `None` waits for the server indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(TASKS_PATH))
            .map_err(|source| LoadError::InvalidUrl {
                url: base_url.to_string(),
                source,
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| LoadError::Network {
            url: endpoint.to_string(),
            source,
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TaskSource for HttpTaskSource {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, LoadError> {
        let url = self.endpoint.to_string();
        debug!(%url, "Fetching task list");

        let resp = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| LoadError::Network {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|source| LoadError::Network { url, source })?;
        parse_tasks(&body)
    }
}

/// Parse a response body as a sequence of task records.
pub fn parse_tasks(body: &[u8]) -> Result<Vec<Task>, LoadError> {
    serde_json::from_slice(body).map_err(LoadError::Parse)
}

/// What to do with a task whose status is not one of the three columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownStatusPolicy {
    /// Leave the task out, log a warning, keep rendering the rest.
    #[default]
    Skip,
    /// Fail the load before touching the document.
    Reject,
}

impl std::fmt::Display for UnknownStatusPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for UnknownStatusPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "reject" => Ok(Self::Reject),
            _ => anyhow::bail!(
                "Invalid unknown-status policy '{}'. Valid values: skip, reject",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTask {
    pub index: usize,
    pub name: String,
    pub status: String,
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rendered: usize,
    pub skipped: Vec<SkippedTask>,
}

pub struct BoardLoader<S> {
    source: S,
    policy: UnknownStatusPolicy,
}

impl<S: TaskSource> BoardLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: UnknownStatusPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownStatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch the task list once and render it into `document`.
    ///
    /// On any error the document is left exactly as it was. On success the
    /// previous cards are replaced by the new list.
    pub async fn load(&self, document: &mut Document) -> Result<LoadReport, LoadError> {
        let tasks = self.source.fetch_tasks().await?;
        let report = render_tasks(&tasks, document, self.policy)?;
        info!(
            rendered = report.rendered,
            skipped = report.skipped.len(),
            "Board loaded"
        );
        Ok(report)
    }
}

/// Partition `tasks` by status and append a card per task, in input order.
pub fn render_tasks(
    tasks: &[Task],
    document: &mut Document,
    policy: UnknownStatusPolicy,
) -> Result<LoadReport, LoadError> {
    // Resolve every status first so a rejected list never half-renders.
    let mut placements: Vec<(TaskStatus, &Task)> = Vec::with_capacity(tasks.len());
    let mut skipped = Vec::new();
    for (index, task) in tasks.iter().enumerate() {
        match task.column() {
            Ok(status) => placements.push((status, task)),
            Err(_) if policy == UnknownStatusPolicy::Reject => {
                return Err(LoadError::UnknownStatus {
                    index,
                    status: task.status.clone(),
                });
            }
            Err(_) => {
                warn!(index, status = %task.status, name = %task.name, "Skipping task with unknown status");
                skipped.push(SkippedTask {
                    index,
                    name: task.name.clone(),
                    status: task.status.clone(),
                });
            }
        }
    }

    document.clear();
    for (status, task) in &placements {
        document.column_mut(*status).append(TaskCard::from_task(task));
    }

    Ok(LoadReport {
        rendered: placements.len(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::models::UNASSIGNED;

    struct StaticSource(Result<Vec<Task>, String>);

    #[async_trait]
    impl TaskSource for StaticSource {
        async fn fetch_tasks(&self) -> Result<Vec<Task>, LoadError> {
            match &self.0 {
                Ok(tasks) => Ok(tasks.clone()),
                Err(body) => parse_tasks(body.as_bytes()),
            }
        }
    }

    fn titles(doc: &Document, status: TaskStatus) -> Vec<String> {
        doc.column(status)
            .cards()
            .iter()
            .map(|c| c.title.clone())
            .collect()
    }

    fn example_tasks() -> Vec<Task> {
        parse_tasks(
            br#"[
                {"name":"Write spec","description":"Draft doc","priority":"High","assignee":"","status":"To Do"},
                {"name":"Review PR","description":"Check diff","priority":"Low","assignee":"Sam","status":"Done"}
            ]"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_example() {
        let loader = BoardLoader::new(StaticSource(Ok(example_tasks())));
        let mut doc = Document::new();
        let report = loader.load(&mut doc).await.unwrap();

        assert_eq!(report.rendered, 2);
        assert!(report.skipped.is_empty());

        let todo = doc.column(TaskStatus::ToDo).cards();
        assert_eq!(todo.len(), 1);
        assert_eq!(todo[0].title, "Write spec");
        assert_eq!(todo[0].assignee_line, "Assignee: Unassigned");

        let done = doc.column(TaskStatus::Done).cards();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "Review PR");
        assert_eq!(done[0].assignee_line, "Assignee: Sam");

        assert!(doc.column(TaskStatus::InProgress).is_empty());
    }

    #[test]
    fn test_partitioning_and_order_preservation() {
        let tasks = vec![
            Task::new("a", "", "Low", None, TaskStatus::Done),
            Task::new("b", "", "Low", None, TaskStatus::ToDo),
            Task::new("c", "", "Low", None, TaskStatus::Done),
            Task::new("d", "", "Low", None, TaskStatus::InProgress),
            Task::new("e", "", "Low", None, TaskStatus::ToDo),
            Task::new("f", "", "Low", None, TaskStatus::Done),
        ];
        let mut doc = Document::new();
        render_tasks(&tasks, &mut doc, UnknownStatusPolicy::Skip).unwrap();

        assert_eq!(titles(&doc, TaskStatus::ToDo), vec!["b", "e"]);
        assert_eq!(titles(&doc, TaskStatus::InProgress), vec!["d"]);
        assert_eq!(titles(&doc, TaskStatus::Done), vec!["a", "c", "f"]);
    }

    #[test]
    fn test_field_echo_is_verbatim() {
        let task = Task::new(
            "  Spaces kept  ",
            "Line one\nLine two <tag>",
            "Sky-high!",
            Some("Ana María"),
            TaskStatus::InProgress,
        );
        let mut doc = Document::new();
        render_tasks(std::slice::from_ref(&task), &mut doc, UnknownStatusPolicy::Skip).unwrap();

        let card = &doc.column(TaskStatus::InProgress).cards()[0];
        assert_eq!(card.title, task.name);
        assert_eq!(card.description, task.description);
        assert_eq!(card.priority_line, "Priority: Sky-high!");
        assert_eq!(card.assignee_line, "Assignee: Ana María");
    }

    #[test]
    fn test_missing_assignee_uses_placeholder() {
        let tasks = parse_tasks(br#"[{"name":"x","status":"To Do"}]"#).unwrap();
        let mut doc = Document::new();
        render_tasks(&tasks, &mut doc, UnknownStatusPolicy::Skip).unwrap();
        assert_eq!(
            doc.column(TaskStatus::ToDo).cards()[0].assignee_line,
            format!("Assignee: {}", UNASSIGNED)
        );
    }

    #[tokio::test]
    async fn test_reload_replaces_previous_content() {
        let mut doc = Document::new();
        BoardLoader::new(StaticSource(Ok(example_tasks())))
            .load(&mut doc)
            .await
            .unwrap();
        assert_eq!(doc.len(), 2);

        let second = vec![
            Task::new("New one", "", "Medium", None, TaskStatus::InProgress),
            Task::new("New two", "", "Medium", None, TaskStatus::InProgress),
        ];
        BoardLoader::new(StaticSource(Ok(second)))
            .load(&mut doc)
            .await
            .unwrap();

        assert_eq!(doc.len(), 2);
        assert!(doc.column(TaskStatus::ToDo).is_empty());
        assert!(doc.column(TaskStatus::Done).is_empty());
        assert_eq!(titles(&doc, TaskStatus::InProgress), vec!["New one", "New two"]);
    }

    #[tokio::test]
    async fn test_parse_failure_leaves_document_untouched() {
        let mut doc = Document::new();
        render_tasks(&example_tasks(), &mut doc, UnknownStatusPolicy::Skip).unwrap();
        let before = doc.clone();

        for body in ["not json", "{\"name\":\"x\"}", "[1, 2]"] {
            let err = BoardLoader::new(StaticSource(Err(body.to_string())))
                .load(&mut doc)
                .await
                .unwrap_err();
            assert!(matches!(err, LoadError::Parse(_)), "body {:?}", body);
            assert_eq!(doc, before);
        }
    }

    #[test]
    fn test_unknown_status_skipped_by_default() {
        let tasks = vec![
            Task::new("before", "", "Low", None, TaskStatus::ToDo),
            Task {
                name: "odd".to_string(),
                status: "Blocked".to_string(),
                ..Task::default()
            },
            Task::new("after", "", "Low", None, TaskStatus::ToDo),
        ];
        let mut doc = Document::new();
        let report = render_tasks(&tasks, &mut doc, UnknownStatusPolicy::Skip).unwrap();

        assert_eq!(report.rendered, 2);
        assert_eq!(
            report.skipped,
            vec![SkippedTask {
                index: 1,
                name: "odd".to_string(),
                status: "Blocked".to_string(),
            }]
        );
        assert_eq!(titles(&doc, TaskStatus::ToDo), vec!["before", "after"]);
    }

    #[test]
    fn test_unknown_status_rejected_without_mutation() {
        let mut doc = Document::new();
        render_tasks(&example_tasks(), &mut doc, UnknownStatusPolicy::Skip).unwrap();
        let before = doc.clone();

        let tasks = vec![
            Task::new("fine", "", "Low", None, TaskStatus::Done),
            Task {
                name: "odd".to_string(),
                status: "to do".to_string(),
                ..Task::default()
            },
        ];
        let err = render_tasks(&tasks, &mut doc, UnknownStatusPolicy::Reject).unwrap_err();
        match err {
            LoadError::UnknownStatus { index, status } => {
                assert_eq!(index, 1);
                assert_eq!(status, "to do");
            }
            other => panic!("Expected UnknownStatus, got {:?}", other),
        }
        assert_eq!(doc, before);
    }

    #[test]
    fn test_empty_list_renders_empty_board() {
        let mut doc = Document::new();
        let report = render_tasks(&[], &mut doc, UnknownStatusPolicy::Skip).unwrap();
        assert_eq!(report, LoadReport::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!(
            UnknownStatusPolicy::from_str("Reject").unwrap(),
            UnknownStatusPolicy::Reject
        );
        assert_eq!(UnknownStatusPolicy::Skip.to_string(), "skip");
        assert!(UnknownStatusPolicy::from_str("drop").is_err());
    }

    #[test]
    fn test_http_source_builds_tasks_endpoint() {
        let source = HttpTaskSource::new("http://127.0.0.1:5000", None).unwrap();
        assert_eq!(source.endpoint().as_str(), "http://127.0.0.1:5000/tasks");

        // The endpoint path is fixed, whatever path the base carries.
        let source = HttpTaskSource::new("http://example.com/board/", None).unwrap();
        assert_eq!(source.endpoint().as_str(), "http://example.com/tasks");
    }

    #[test]
    fn test_http_source_rejects_bad_url() {
        let err = HttpTaskSource::new("localhost without scheme", None)
            .err()
            .expect("should fail");
        assert!(matches!(err, LoadError::InvalidUrl { .. }));
    }
}
