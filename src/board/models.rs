use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder shown when a task has no assignee.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Every status, in board column order.
    pub const ALL: [TaskStatus; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Element id of the column container for this status (`#<id> .tasks`).
    pub fn container_id(&self) -> &'static str {
        match self {
            Self::ToDo => "to-do",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::ToDo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(Self::ToDo),
            "In Progress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            _ => Err(format!(
                "Invalid status: {}. Valid statuses are: To Do, In Progress, Done",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(format!(
                "Invalid priority: {}. Valid priorities are: Low, Medium, High",
                s
            )),
        }
    }
}

/// A task record as received from `GET /tasks`.
///
/// Deserialization is deliberately lenient: fields that are missing or null
/// become empty text, non-string scalars are kept as their JSON text, and
/// unknown fields are ignored. `status` stays raw text so that a value outside
/// the three known labels reaches the loader instead of failing the whole
/// list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub priority: String,
    #[serde(default, deserialize_with = "falsy_as_none")]
    pub assignee: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub status: String,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: impl Into<String>,
        assignee: Option<&str>,
        status: TaskStatus,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority: priority.into(),
            assignee: assignee.filter(|a| !a.is_empty()).map(str::to_string),
            status: status.as_str().to_string(),
        }
    }

    /// Assignee text, or [`UNASSIGNED`] when absent or empty.
    pub fn assignee_label(&self) -> &str {
        match self.assignee.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => UNASSIGNED,
        }
    }

    /// Resolve the raw status label to its column.
    pub fn column(&self) -> Result<TaskStatus, String> {
        TaskStatus::from_str(&self.status)
    }
}

impl From<&CatalogTask> for Task {
    fn from(task: &CatalogTask) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            priority: task.priority.as_str().to_string(),
            assignee: task.assignee.clone(),
            status: task.status.as_str().to_string(),
        }
    }
}

/// A validated task held by the service and served from `GET /tasks`.
///
/// The JSON form is a superset of [`Task`], so any client reading the wire
/// record ignores the extra fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTask {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub created_date: String,
    pub updated_date: String,
    pub tags: Vec<String>,
    pub progress: u8,
    #[serde(default)]
    pub comments: Vec<Value>,
    #[serde(default)]
    pub subtasks: Vec<Value>,
    #[serde(default)]
    pub attachments: Vec<Value>,
    #[serde(default)]
    pub estimated_time: Option<Value>,
    /// Any other fields the task file carries, served back unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(value_text).unwrap_or_default())
}

fn falsy_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(other) => Some(value_text(other)),
    })
}

fn value_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}
