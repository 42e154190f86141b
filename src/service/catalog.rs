use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use crate::board::loader::TaskSource;
use crate::board::models::{CatalogTask, Priority, Task, TaskStatus};
use crate::errors::{CatalogError, LoadError};

/// Read-only list of tasks served by the task service.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: Vec<CatalogTask>,
}

/// A task as written in a task file. Only `name` and `status` are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedTask {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    description: String,
    status: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    created_date: Option<String>,
    #[serde(default)]
    updated_date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    progress: u32,
    #[serde(default)]
    comments: Vec<Value>,
    #[serde(default)]
    subtasks: Vec<Value>,
    #[serde(default)]
    attachments: Vec<Value>,
    #[serde(default)]
    estimated_time: Option<Value>,
    #[serde(flatten)]
    extra: serde_json::Map<String, Value>,
}

impl TaskCatalog {
    pub fn new(tasks: Vec<CatalogTask>) -> Self {
        Self { tasks }
    }

    /// The demo board used when no task file is configured.
    pub fn sample() -> Self {
        match Self::from_seeds(sample_seeds()) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Sample board failed validation: {}", e);
                Self::default()
            }
        }
    }

    /// Load and validate a JSON task file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate a JSON array of tasks.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let seeds: Vec<SeedTask> = serde_json::from_str(content).map_err(CatalogError::Parse)?;
        Self::from_seeds(seeds)
    }

    fn from_seeds(seeds: Vec<SeedTask>) -> Result<Self, CatalogError> {
        let now = chrono::Utc::now().to_rfc3339();
        let mut tasks = Vec::with_capacity(seeds.len());

        for (index, seed) in seeds.into_iter().enumerate() {
            let status = TaskStatus::from_str(&seed.status).map_err(|_| {
                CatalogError::InvalidStatus {
                    index,
                    value: seed.status.clone(),
                }
            })?;
            let priority = match seed.priority.as_deref() {
                None => Priority::default(),
                Some(p) => Priority::from_str(p).map_err(|_| CatalogError::InvalidPriority {
                    index,
                    value: p.to_string(),
                })?,
            };
            if seed.progress > 100 {
                return Err(CatalogError::InvalidProgress {
                    index,
                    value: seed.progress,
                });
            }

            let created_date = seed.created_date.unwrap_or_else(|| now.clone());
            tasks.push(CatalogTask {
                id: seed
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
                name: seed.name,
                description: seed.description,
                status,
                priority,
                assignee: seed.assignee.filter(|a| !a.is_empty()),
                due_date: seed.due_date,
                updated_date: seed.updated_date.unwrap_or_else(|| created_date.clone()),
                created_date,
                tags: seed.tags,
                progress: seed.progress as u8,
                comments: seed.comments,
                subtasks: seed.subtasks,
                attachments: seed.attachments,
                estimated_time: seed.estimated_time,
                extra: seed.extra,
            });
        }

        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[CatalogTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task counts per status, in board order.
    pub fn count_by_status(&self) -> [(TaskStatus, usize); 3] {
        TaskStatus::ALL.map(|status| {
            let count = self.tasks.iter().filter(|t| t.status == status).count();
            (status, count)
        })
    }
}

#[async_trait]
impl TaskSource for TaskCatalog {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, LoadError> {
        Ok(self.tasks.iter().map(Task::from).collect())
    }
}

fn sample_seeds() -> Vec<SeedTask> {
    vec![
        sample_seed(
            "d10bbd99-e56b-4d7e-9e48-3fbb5b17b033",
            "Design landing page",
            "Create a landing page for the upcoming product launch.",
            "In Progress",
            "High",
            Some("Alice"),
        ),
        sample_seed(
            "a47252fc-c8c6-4dbc-8c94-d4b1a45699df",
            "Implement API",
            "Develop the backend API for the app.",
            "To Do",
            "Medium",
            Some("Bob"),
        ),
        sample_seed(
            "e0beb0b8-a325-485c-b9c7-1b7ae8438f40",
            "Write documentation",
            "Document the project setup and usage.",
            "Done",
            "Low",
            None,
        ),
    ]
}

fn sample_seed(
    id: &str,
    name: &str,
    description: &str,
    status: &str,
    priority: &str,
    assignee: Option<&str>,
) -> SeedTask {
    SeedTask {
        id: Some(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        status: status.to_string(),
        priority: Some(priority.to_string()),
        assignee: assignee.map(str::to_string),
        due_date: None,
        created_date: None,
        updated_date: None,
        tags: Vec::new(),
        progress: 0,
        comments: Vec::new(),
        subtasks: Vec::new(),
        attachments: Vec::new(),
        estimated_time: None,
        extra: serde_json::Map::new(),
    }
}
