//! Task service: the HTTP back-end the board loader reads from.
//!
//! | Module    | Responsibility                                          |
//! |-----------|---------------------------------------------------------|
//! | `server`  | `ServerConfig`, router assembly, bind and serve         |
//! | `api`     | Route handlers, `AppState`, `ApiError`                  |
//! | `catalog` | Read-only `TaskCatalog` loaded from a task file         |
//!
//! Routes: `GET /` (board page), `GET /tasks` (task list JSON),
//! `GET /board` (rendered columns as JSON), `GET /health`.

pub mod api;
pub mod catalog;
pub mod server;

pub use catalog::TaskCatalog;
pub use server::{ServerConfig, start_server};
