//! Model Context Protocol (MCP) server implementation.
//!
//! This module exposes the task service to AI assistants like Claude Desktop
//! over the MCP tool-calling interface. The transport and handshake come
//! from the `rmcp` SDK; this module only registers the four task tools and
//! maps service errors to structured MCP errors.
//!
//! ## Module Structure
//!
//! - `server`: Tool router, error mapping, and the stdio entry point
//! - `types`: Tool parameter and result type definitions

mod server;
pub mod types;

pub use server::{TaskSheetServer, run_server};
