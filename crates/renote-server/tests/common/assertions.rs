//! Custom assertions for REST integration tests.

use crate::common::TestServer;
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Assert that `resp` is an error envelope with the given status.
pub async fn assert_error(resp: Response, expected: StatusCode) -> Value {
    let status = resp.status();
    let body: Value = resp.json().await.expect("Error response is not JSON");
    assert_eq!(status, expected, "unexpected status, body: {body}");
    assert_eq!(body["code"], 1, "expected error envelope: {body}");
    assert!(body.get("data").is_none(), "error carried data: {body}");
    body
}

/// Assert that a document id is no longer known.
pub async fn assert_not_found(server: &TestServer, id: u64) {
    let resp = server.get(&format!("/v1/documents/{id}")).await;
    assert_error(resp, StatusCode::NOT_FOUND).await;
}

/// Assert that a document has the expected content.
pub async fn assert_content(server: &TestServer, id: u64, expected: &str) {
    let resp = server.get(&format!("/v1/documents/{id}/content")).await;
    let data = crate::common::expect_data(resp).await;
    assert_eq!(
        data["content"], expected,
        "content mismatch for document {id}"
    );
}

/// Assert that the tree lists `path` with id `id`.
pub async fn assert_in_tree(server: &TestServer, id: u64, path: &str) {
    let nodes = server.tree().await;
    let found = nodes.iter().find(|n| n["id"] == id);
    match found {
        Some(node) => assert_eq!(node["path"], path, "document {id} at unexpected path"),
        None => panic!("document {id} not in tree: {nodes:?}"),
    }
}
