//! Tasksheet - a Google Sheets task list served over MCP
//!
//! Tasksheet exposes a small task-management tool set (list, add, update,
//! delete) to AI assistants via the Model Context Protocol, using a Google
//! Sheets worksheet as the backing store. Each task is one row of the
//! worksheet; the server is a stateless adapter that re-reads live sheet
//! state on every call.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, exit codes)
//! - `config`: Configuration file and environment resolution
//! - `error`: Error taxonomy shared by the service and store layers
//! - `task`: Task model, status enum, and row (de)serialization
//! - `tasks`: The task service translating operations into row operations
//! - `store`: Backing row store trait and the Google Sheets client
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod store;
pub mod task;
pub mod tasks;
