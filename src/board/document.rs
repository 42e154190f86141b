//! The board document: three fixed column containers and the task cards
//! appended into them.

use serde::{Deserialize, Serialize};

use super::models::{Task, TaskStatus};

const PAGE_TITLE: &str = "Kanban Board";

/// Rendered fragment for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    pub title: String,
    pub description: String,
    pub priority_line: String,
    pub assignee_line: String,
}

impl TaskCard {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.name.clone(),
            description: task.description.clone(),
            priority_line: format!("Priority: {}", task.priority),
            assignee_line: format!("Assignee: {}", task.assignee_label()),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"task\"><h3>{}</h3><p>{}</p><p class=\"priority\">{}</p><p class=\"assignee\">{}</p></div>",
            escape_html(&self.title),
            escape_html(&self.description),
            escape_html(&self.priority_line),
            escape_html(&self.assignee_line),
        )
    }
}

/// A column container. Cards keep their append order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    status: TaskStatus,
    cards: Vec<TaskCard>,
}

impl Column {
    fn new(status: TaskStatus) -> Self {
        Self {
            status,
            cards: Vec::new(),
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn container_id(&self) -> &'static str {
        self.status.container_id()
    }

    pub fn cards(&self) -> &[TaskCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append `card` as the last child of this container.
    pub fn append(&mut self, card: TaskCard) {
        self.cards.push(card);
    }

    fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<section class=\"column\" id=\"{}\"><h2>{}</h2><div class=\"tasks\">",
            self.container_id(),
            self.status.as_str()
        );
        for card in &self.cards {
            html.push_str(&card.to_html());
        }
        html.push_str("</div></section>");
        html
    }
}

/// The board: one container per [`TaskStatus`], always in board order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    columns: [Column; 3],
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            columns: TaskStatus::ALL.map(Column::new),
        }
    }

    pub fn column(&self, status: TaskStatus) -> &Column {
        &self.columns[status.index()]
    }

    /// Container lookup. Total over [`TaskStatus`], so it cannot miss.
    pub fn column_mut(&mut self, status: TaskStatus) -> &mut Column {
        &mut self.columns[status.index()]
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Remove every card, keeping the three containers.
    pub fn clear(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
    }

    /// Total number of cards across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Column::is_empty)
    }

    /// The three column containers as an HTML fragment.
    pub fn to_html_fragment(&self) -> String {
        let mut html = String::from("<main class=\"board\">");
        for column in &self.columns {
            html.push_str(&column.to_html());
        }
        html.push_str("</main>");
        html
    }

    /// A complete HTML page with the board.
    pub fn to_page(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{board}\n</body>\n</html>\n",
            title = PAGE_TITLE,
            board = self.to_html_fragment(),
        )
    }

    /// Terminal rendering. Descriptions wrap at `width` columns.
    pub fn to_text(&self, width: usize) -> String {
        let width = width.max(20);
        let mut out = String::new();
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let heading = format!("{} ({})", column.status.as_str(), column.len());
            out.push_str(&format!("{}\n", console::style(heading).bold().cyan()));
            if column.is_empty() {
                out.push_str(&format!("  {}\n", console::style("(empty)").dim()));
                continue;
            }
            for card in &column.cards {
                out.push_str(&format!("  - {}\n", console::style(&card.title).bold()));
                if !card.description.is_empty() {
                    for line in textwrap::wrap(&card.description, width - 4) {
                        out.push_str(&format!("    {}\n", line));
                    }
                }
                out.push_str(&format!("    {}\n", card.priority_line));
                out.push_str(&format!("    {}\n", card.assignee_line));
            }
        }
        out
    }

    pub fn view(&self) -> BoardView {
        BoardView {
            columns: self
                .columns
                .iter()
                .map(|c| ColumnView {
                    status: c.status,
                    tasks: c.cards.clone(),
                })
                .collect(),
        }
    }
}

// API view types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnView {
    pub status: TaskStatus,
    pub tasks: Vec<TaskCard>,
}

/// Escape text for insertion into HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
