use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ErrorCode;
use tasksheet::mcp::types::{
    AddTaskParams, DeleteTaskParams, ListTasksParams, UpdateTaskParams,
};

use crate::{McpTestFixture, extract_tool_result_json, task_row};

fn update_params(id: &str) -> UpdateTaskParams {
    UpdateTaskParams {
        id: id.to_string(),
        title: None,
        status: None,
        due_date: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_update_status_moves_task_between_filters() {
    let fixture = McpTestFixture::new();

    let result = fixture
        .server
        .add_task(Parameters(AddTaskParams {
            title: "Write abstract".to_string(),
            status: None,
            due_date: None,
            notes: None,
        }))
        .await
        .unwrap();
    let id = extract_tool_result_json(&result)["id"]
        .as_str()
        .unwrap()
        .to_string();

    let updated = fixture
        .server
        .update_task(Parameters(UpdateTaskParams {
            status: Some("done".to_string()),
            ..update_params(&id)
        }))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&updated)["status"], "done");

    let done = fixture
        .server
        .list_tasks(Parameters(ListTasksParams {
            status: Some("done".to_string()),
        }))
        .await
        .unwrap();
    let done = extract_tool_result_json(&done);
    assert_eq!(done["totalCount"], 1);
    assert_eq!(done["tasks"][0]["id"], id.as_str());

    let pending = fixture
        .server
        .list_tasks(Parameters(ListTasksParams {
            status: Some("pending".to_string()),
        }))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&pending)["totalCount"], 0);
}

#[tokio::test]
async fn test_update_merges_partial_fields_and_refreshes_updated_at() {
    let fixture = McpTestFixture::with_rows(vec![task_row("a", "old title", "in_progress")]);

    let result = fixture
        .server
        .update_task(Parameters(UpdateTaskParams {
            title: Some("new title".to_string()),
            notes: Some("remember the citation".to_string()),
            ..update_params("a")
        }))
        .await
        .unwrap();
    let task = extract_tool_result_json(&result);

    assert_eq!(task["title"], "new title");
    assert_eq!(task["notes"], "remember the citation");
    // Untouched fields survive the merge.
    assert_eq!(task["status"], "in_progress");
    assert_eq!(task["createdAt"], "2025-01-01T00:00:00Z");
    // The seeded timestamp was refreshed by the server.
    assert_ne!(task["updatedAt"], "2025-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_update_unknown_id_reports_not_found() {
    let fixture = McpTestFixture::new();

    let err = fixture
        .server
        .update_task(Parameters(UpdateTaskParams {
            status: Some("done".to_string()),
            ..update_params("no-such-id")
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("not found"));
}

#[tokio::test]
async fn test_update_invalid_status_leaves_sheet_unchanged() {
    let fixture = McpTestFixture::with_rows(vec![task_row("a", "Write abstract", "pending")]);
    let before = fixture.store.rows();

    let err = fixture
        .server
        .update_task(Parameters(UpdateTaskParams {
            status: Some("not_a_real_status".to_string()),
            ..update_params("a")
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);

    assert_eq!(fixture.store.rows(), before);
}

#[tokio::test]
async fn test_update_invalid_due_date_leaves_sheet_unchanged() {
    let fixture = McpTestFixture::with_rows(vec![task_row("a", "Write abstract", "pending")]);
    let before = fixture.store.rows();

    let err = fixture
        .server
        .update_task(Parameters(UpdateTaskParams {
            due_date: Some("soon".to_string()),
            ..update_params("a")
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(fixture.store.rows(), before);
}

#[tokio::test]
async fn test_update_without_any_field_is_rejected() {
    let fixture = McpTestFixture::with_rows(vec![task_row("a", "Write abstract", "pending")]);

    let err = fixture
        .server
        .update_task(Parameters(update_params("a")))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
}

#[tokio::test]
async fn test_delete_removes_only_the_target_row() {
    let fixture = McpTestFixture::with_rows(vec![
        task_row("a", "first", "pending"),
        task_row("b", "second", "pending"),
        task_row("c", "third", "pending"),
    ]);

    let result = fixture
        .server
        .delete_task(Parameters(DeleteTaskParams {
            id: "b".to_string(),
        }))
        .await
        .unwrap();
    let confirmation = extract_tool_result_json(&result);
    assert_eq!(confirmation["id"], "b");
    assert_eq!(confirmation["deleted"], true);

    let rows = fixture.store.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "a");
    assert_eq!(rows[1][0], "c");
}

#[tokio::test]
async fn test_deleted_id_stays_dead_for_update_and_delete() {
    let fixture = McpTestFixture::with_rows(vec![task_row("a", "Write abstract", "pending")]);

    fixture
        .server
        .delete_task(Parameters(DeleteTaskParams {
            id: "a".to_string(),
        }))
        .await
        .unwrap();

    let err = fixture
        .server
        .delete_task(Parameters(DeleteTaskParams {
            id: "a".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("not found"));

    let err = fixture
        .server
        .update_task(Parameters(UpdateTaskParams {
            status: Some("done".to_string()),
            ..update_params("a")
        }))
        .await
        .unwrap_err();
    assert!(err.message.contains("not found"));
}

#[tokio::test]
async fn test_delete_reports_backend_outage() {
    let fixture = McpTestFixture::with_rows(vec![task_row("a", "Write abstract", "pending")]);
    fixture.store.set_failing(true);

    let err = fixture
        .server
        .delete_task(Parameters(DeleteTaskParams {
            id: "a".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert_eq!(fixture.store.row_count(), 1);
}
