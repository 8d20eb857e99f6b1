use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::ErrorCode;
use tasksheet::mcp::types::ListTasksParams;

use crate::{McpTestFixture, extract_tool_result_json, task_row};

fn list_params(status: Option<&str>) -> Parameters<ListTasksParams> {
    Parameters(ListTasksParams {
        status: status.map(str::to_string),
    })
}

#[tokio::test]
async fn test_list_tasks_on_empty_sheet() {
    let fixture = McpTestFixture::new();

    let result = fixture.server.list_tasks(list_params(None)).await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["totalCount"], 0);
    assert_eq!(json["tasks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_tasks_preserves_sheet_row_order() {
    let fixture = McpTestFixture::with_rows(vec![
        task_row("a", "first", "pending"),
        task_row("b", "second", "done"),
        task_row("c", "third", "pending"),
    ]);

    let result = fixture.server.list_tasks(list_params(None)).await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["totalCount"], 3);
    let ids: Vec<&str> = json["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_list_tasks_filters_by_status() {
    let fixture = McpTestFixture::with_rows(vec![
        task_row("a", "Write abstract", "pending"),
        task_row("b", "Search papers", "done"),
        task_row("c", "Submit draft", "pending"),
    ]);

    let result = fixture
        .server
        .list_tasks(list_params(Some("pending")))
        .await
        .unwrap();
    let json = extract_tool_result_json(&result);
    assert_eq!(json["totalCount"], 2);
    for task in json["tasks"].as_array().unwrap() {
        assert_eq!(task["status"], "pending");
    }

    let result = fixture
        .server
        .list_tasks(list_params(Some("done")))
        .await
        .unwrap();
    let json = extract_tool_result_json(&result);
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["tasks"][0]["id"], "b");
}

#[tokio::test]
async fn test_list_tasks_rejects_unknown_status_filter() {
    let fixture = McpTestFixture::new();

    let err = fixture
        .server
        .list_tasks(list_params(Some("archived")))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("archived"));
}

#[tokio::test]
async fn test_list_tasks_skips_rows_without_an_id() {
    let fixture = McpTestFixture::with_rows(vec![
        vec!["".to_string(), "a human scribble".to_string()],
        task_row("a", "real task", "pending"),
        vec![],
    ]);

    let result = fixture.server.list_tasks(list_params(None)).await.unwrap();
    let json = extract_tool_result_json(&result);

    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["tasks"][0]["id"], "a");
}

#[tokio::test]
async fn test_list_tasks_reports_backend_outage() {
    let fixture = McpTestFixture::new();
    fixture.store.set_failing(true);

    let err = fixture
        .server
        .list_tasks(list_params(None))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
}
