use rmcp::handler::server::wrapper::Parameters;
use vdife::mcp::types::{
    ChangeDocumentParams, DocumentParams, HoverParams, OpenDocumentParams,
};

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// open_document tests
// ============================================================================

#[tokio::test]
async fn test_open_document_reports_missing_keys() {
    let Some(fixture) = McpTestFixture::with_repos("2.0-dev", "2.0", r#"{"a": "A"}"#).unwrap()
    else {
        return;
    };
    fixture
        .write_file(
            "ngconsole/views/a.html",
            r#"<a localize="a"></a><a localize="b"></a><a localize="{{x}}"></a>"#,
        )
        .unwrap();
    let server = fixture.server().unwrap();

    let result = server
        .open_document(Parameters(OpenDocumentParams {
            path: fixture.path("ngconsole/views/a.html"),
            text: None,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["language"], "html");
    assert!(
        json_result["resourceFile"]
            .as_str()
            .unwrap()
            .ends_with("pkg/e-vdi/lang.json")
    );
    let diagnostics = json_result["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["key"], "b");
    assert_eq!(diagnostics[0]["source"], "missing-localize");
    assert_eq!(diagnostics[0]["message"], "missing translation: b");
    assert_eq!(
        diagnostics[0]["quickFix"],
        "Add translation b to ngconsole_resources"
    );
    assert_eq!(diagnostics[0]["line"], 1);
    assert_eq!(diagnostics[0]["col"], 24);
    assert_eq!(json_result["notifications"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_open_document_with_unsaved_text() {
    let Some(fixture) = McpTestFixture::with_repos("2.0-dev", "2.0", "{}").unwrap() else {
        return;
    };
    let server = fixture.server().unwrap();

    let result = server
        .open_document(Parameters(OpenDocumentParams {
            path: fixture.path("ngconsole/views/new.html"),
            text: Some(r#"<a localize="draft"></a>"#.to_string()),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["diagnostics"][0]["key"], "draft");
}

#[tokio::test]
async fn test_open_missing_file_is_invalid() {
    let Some(fixture) = McpTestFixture::with_repos("2.0-dev", "2.0", "{}").unwrap() else {
        return;
    };
    let server = fixture.server().unwrap();

    let result = server
        .open_document(Parameters(OpenDocumentParams {
            path: fixture.path("ngconsole/views/none.html"),
            text: None,
        }))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_branch_mismatch_notification() {
    let Some(fixture) = McpTestFixture::with_repos("2.0-dev", "2.1", "{}").unwrap() else {
        return;
    };
    let server = fixture.server().unwrap();

    let result = server
        .open_document(Parameters(OpenDocumentParams {
            path: fixture.path("ngconsole/views/a.html"),
            text: Some(r#"<a localize="x"></a>"#.to_string()),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["diagnostics"].as_array().unwrap().len(), 0);
    assert!(json_result.get("resourceFile").is_none());
    let notifications = json_result["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(
        notifications[0]
            .as_str()
            .unwrap()
            .contains("does not match ngconsole_resources branch `2.1`")
    );
}

#[tokio::test]
async fn test_document_outside_ngconsole() {
    let Some(fixture) = McpTestFixture::with_repos("2.0-dev", "2.0", "{}").unwrap() else {
        return;
    };
    let server = fixture.server().unwrap();

    let result = server
        .open_document(Parameters(OpenDocumentParams {
            path: fixture.path("elsewhere/a.html"),
            text: Some(r#"<a localize="x"></a>"#.to_string()),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["diagnostics"].as_array().unwrap().len(), 0);
    assert!(
        json_result["notifications"][0]
            .as_str()
            .unwrap()
            .contains("is not an ngconsole document")
    );
}

// ============================================================================
// change / close tests
// ============================================================================

#[tokio::test]
async fn test_change_document_replaces_diagnostics() {
    let Some(fixture) = McpTestFixture::with_repos("2.0-dev", "2.0", r#"{"a": "A"}"#).unwrap()
    else {
        return;
    };
    let server = fixture.server().unwrap();
    let path = fixture.path("ngconsole/views/a.html");
    server
        .open_document(Parameters(OpenDocumentParams {
            path: path.clone(),
            text: Some(r#"<a localize="x"></a><a localize="y"></a>"#.to_string()),
        }))
        .await
        .unwrap();

    let result = server
        .change_document(Parameters(ChangeDocumentParams {
            path: path.clone(),
            text: r#"<a localize="a"></a><a localize="z"></a>"#.to_string(),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    let diagnostics = json_result["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["key"], "z");

    let result = server
        .get_diagnostics(Parameters(DocumentParams { path }))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&result)["diagnostics"], json_result["diagnostics"]);
}

#[tokio::test]
async fn test_close_document_releases_pack() {
    let Some(fixture) = McpTestFixture::with_repos("2.0-dev", "2.0", "{}").unwrap() else {
        return;
    };
    let server = fixture.server().unwrap();
    let first = fixture.path("ngconsole/views/a.html");
    let second = fixture.path("ngconsole/views/b.html");
    for path in [&first, &second] {
        server
            .open_document(Parameters(OpenDocumentParams {
                path: path.clone(),
                text: Some(String::new()),
            }))
            .await
            .unwrap();
    }

    let result = server
        .close_document(Parameters(DocumentParams {
            path: first.clone(),
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["closed"], true);
    assert_eq!(json_result["cachedPacks"], 1);

    let result = server
        .close_document(Parameters(DocumentParams { path: second }))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&result)["cachedPacks"], 0);

    let result = server
        .close_document(Parameters(DocumentParams {
            path: first.clone(),
        }))
        .await
        .unwrap();
    assert_eq!(extract_tool_result_json(&result)["closed"], false);

    let result = server
        .get_diagnostics(Parameters(DocumentParams { path: first }))
        .await;
    assert!(result.is_err());
}

// ============================================================================
// hover tests
// ============================================================================

#[tokio::test]
async fn test_hover() {
    let Some(fixture) =
        McpTestFixture::with_repos("2.0-dev", "2.0", r#"{"title": "Title"}"#).unwrap()
    else {
        return;
    };
    let server = fixture.server().unwrap();
    let path = fixture.path("ngconsole/views/a.html");
    server
        .open_document(Parameters(OpenDocumentParams {
            path: path.clone(),
            text: Some("<p>title</p>\n<a localize=\"title\"></a>".to_string()),
        }))
        .await
        .unwrap();

    let result = server
        .hover(Parameters(HoverParams {
            path: path.clone(),
            line: 2,
            col: 15,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["found"], true);
    assert_eq!(json_result["key"], "title");
    assert_eq!(json_result["translation"], "Title");
    assert_eq!(json_result["contents"], "translation: Title");

    let result = server
        .hover(Parameters(HoverParams {
            path,
            line: 1,
            col: 5,
        }))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["found"], false);
    assert!(json_result.get("key").is_none());
}
