use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::TaskError;
use crate::store::{RowStore, SheetsStore};
use crate::task::{TaskPatch, TaskStatus};
use crate::tasks::TaskService;

use super::types::{
    AddTaskParams, DeleteTaskParams, DeleteTaskResult, ListTasksParams, TaskListResult,
    UpdateTaskParams,
};

/// MCP server exposing the task service as callable tools.
///
/// Generic over the row store so integration tests can drive the full tool
/// surface against an in-memory table.
#[derive(Clone)]
pub struct TaskSheetServer<S> {
    service: Arc<TaskService<S>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<S: RowStore + 'static> TaskSheetServer<S> {
    pub fn new(store: S) -> Self {
        Self {
            service: Arc::new(TaskService::new(store)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List all tasks from the sheet in row order, optionally filtered by status (pending, in_progress, done)."
    )]
    pub async fn list_tasks(
        &self,
        params: Parameters<ListTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let status = parse_status(params.0.status.as_deref())?;

        let tasks = self.service.list(status).await.map_err(to_mcp_error)?;
        json_result(&TaskListResult {
            total_count: tasks.len(),
            tasks,
        })
    }

    #[tool(
        description = "Add a new task to the sheet. Requires a non-empty title; status defaults to pending; due date must be YYYY-MM-DD. Returns the created task including its generated id."
    )]
    pub async fn add_task(
        &self,
        params: Parameters<AddTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let AddTaskParams {
            title,
            status,
            due_date,
            notes,
        } = params.0;
        let status = parse_status(status.as_deref())?;

        let task = self
            .service
            .add(&title, status, due_date, notes)
            .await
            .map_err(to_mcp_error)?;
        json_result(&task)
    }

    #[tool(
        description = "Update fields of an existing task by id. Only the fields provided are changed; updated_at is refreshed. Returns the merged task."
    )]
    pub async fn update_task(
        &self,
        params: Parameters<UpdateTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let UpdateTaskParams {
            id,
            title,
            status,
            due_date,
            notes,
        } = params.0;
        let patch = TaskPatch {
            title,
            status: parse_status(status.as_deref())?,
            due_date,
            notes,
        };

        let task = self
            .service
            .update(&id, patch)
            .await
            .map_err(to_mcp_error)?;
        json_result(&task)
    }

    #[tool(description = "Delete a task from the sheet by id. Returns a confirmation.")]
    pub async fn delete_task(
        &self,
        params: Parameters<DeleteTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = self
            .service
            .delete(&params.0.id)
            .await
            .map_err(to_mcp_error)?;
        json_result(&DeleteTaskResult { id, deleted: true })
    }
}

#[tool_handler]
impl<S: RowStore + 'static> ServerHandler for TaskSheetServer<S> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tasksheet manages a to-do list stored in a Google Sheet.\n\n\
                 Available tools:\n\
                 1. list_tasks - List all tasks, optionally filtered by status\n\
                 2. add_task - Add a task (title required; status defaults to pending)\n\
                 3. update_task - Change title, status, due date, or notes of a task by id\n\
                 4. delete_task - Remove a task by id\n\n\
                 Statuses are: pending, in_progress, done. Due dates use the\n\
                 YYYY-MM-DD format. Task ids are stable generated tokens; always\n\
                 pass the id exactly as returned by list_tasks or add_task.\n\
                 The sheet may also be edited by a human, so re-list before\n\
                 acting on stale ids."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Parse an optional caller-supplied status string at the tool boundary.
fn parse_status(raw: Option<&str>) -> Result<Option<TaskStatus>, McpError> {
    match raw {
        Some(value) => TaskStatus::parse(value).map(Some).map_err(to_mcp_error),
        None => Ok(None),
    }
}

/// Map the service error taxonomy onto MCP error codes. Validation failures
/// and unknown ids are the caller's fault; backend failures are internal and
/// are reported without retrying, so the caller can decide what to do next.
fn to_mcp_error(err: TaskError) -> McpError {
    match err {
        TaskError::Validation(message) => McpError::invalid_params(message, None),
        TaskError::NotFound { .. } => McpError::invalid_params(err.to_string(), None),
        TaskError::Backend(_) => {
            tracing::error!(error = %err, "backend failure");
            McpError::internal_error(err.to_string(), None)
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("JSON serialization failed: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

/// Entry point for the MCP server: stdio transport, stderr logging.
pub fn run_server(config: Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            tracing::info!(
                spreadsheet_id = %config.spreadsheet_id,
                worksheet = %config.worksheet,
                "starting MCP server on stdio"
            );
            let store = SheetsStore::new(&config)?;
            let service = TaskSheetServer::new(store);
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
