//! Board: fetch a task list and render it into three status columns.
//!
//! ## Module Map
//!
//! ```text
//! ┌───────────────┐  GET /tasks  ┌──────────────────────────────────────────┐
//! │ Task service  │ <─────────── │  loader.rs  (BoardLoader, TaskSource)     │
//! │ (or any HTTP  │ ───────────> │     │ parse → Vec<Task>                   │
//! │  server)      │   JSON list  │     │ resolve status → column             │
//! └───────────────┘              │     v                                     │
//!                                │  document.rs (Document, Column, TaskCard) │
//!                                │     └─ HTML page / text / BoardView JSON  │
//!                                └──────────────────────────────────────────┘
//! ```
//!
//! | Module     | Responsibility                                             |
//! |------------|------------------------------------------------------------|
//! | `models`   | `Task` wire record, `TaskStatus`, `Priority`, `CatalogTask` |
//! | `document` | Column containers and rendered task cards                  |
//! | `loader`   | `TaskSource` trait, `HttpTaskSource`, `BoardLoader`         |

pub mod document;
pub mod loader;
pub mod models;

pub use document::{BoardView, Column, ColumnView, Document, TaskCard};
pub use loader::{
    BoardLoader, HttpTaskSource, LoadReport, SkippedTask, TASKS_PATH, TaskSource,
    UnknownStatusPolicy,
};
pub use models::{CatalogTask, Priority, Task, TaskStatus};
