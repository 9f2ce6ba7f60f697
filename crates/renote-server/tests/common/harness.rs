//! Test server harness for REST integration tests.
//!
//! Provides a `TestServer` that runs the server over a temporary workspace
//! root, along with JSON convenience methods.

use renote_core::Workspace;
use renote_server::{RenoteServer, ServerConfig};
use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Display prefix used by every test server.
pub const PREFIX: &str = "/workspace";

/// Test server with HTTP client and automatic cleanup.
pub struct TestServer {
    server: RenoteServer,
    client: Client,
    /// Base URL for the server.
    pub base_url: String,
    temp_dir: TempDir,
}

impl TestServer {
    /// Start a server over a fresh temporary root.
    pub async fn with_temp_root() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self::start_in(temp_dir).await
    }

    /// Start a server over an existing temporary root.
    pub async fn start_in(temp_dir: TempDir) -> Self {
        let workspace =
            Workspace::open(temp_dir.path(), PREFIX).expect("Failed to open workspace");
        let server = RenoteServer::start(Arc::new(workspace), ServerConfig::default())
            .await
            .expect("Failed to start server");
        let base_url = server.url();

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let test_server = Self {
            server,
            client,
            base_url,
            temp_dir,
        };
        test_server.wait_ready().await;
        test_server
    }

    /// Stop the server, handing back the root so it can be reopened.
    pub async fn shutdown(self) -> TempDir {
        self.server.stop().await;
        self.temp_dir
    }

    /// Host path of the workspace root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    async fn wait_ready(&self) {
        for _ in 0..50 {
            if let Ok(resp) = self.client.get(self.url("/ping")).send().await {
                if resp.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("Server did not become ready in time");
    }

    /// Build a full URL from a path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========== HTTP Convenience Methods ==========

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT request failed")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> Response {
        self.client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("POST request failed")
    }

    // ========== Document Helpers ==========

    /// Create a markdown document and return its `data` record.
    pub async fn create_markdown(&self, title: &str, parent: &str, content: &str) -> Value {
        let resp = self
            .post(
                "/v1/documents",
                &json!({
                    "title": title,
                    "type": "markdown",
                    "content": content,
                    "parent_path": parent,
                    "is_directory": false,
                }),
            )
            .await;
        expect_data(resp).await
    }

    /// Create a directory and return its `data` record.
    pub async fn create_directory(&self, name: &str, parent: &str) -> Value {
        let resp = self
            .post(
                "/v1/documents/directories",
                &json!({ "name": name, "parent_path": parent }),
            )
            .await;
        expect_data(resp).await
    }

    /// Fetch the flat tree as a list of nodes.
    pub async fn tree(&self) -> Vec<Value> {
        let data = expect_data(self.get("/v1/documents/tree").await).await;
        data["nodes"].as_array().cloned().unwrap_or_default()
    }
}

/// Assert a 200 envelope with `code == 0` and return its `data`.
pub async fn expect_data(resp: Response) -> Value {
    let status = resp.status();
    let body: Value = resp.json().await.expect("Response is not JSON");
    assert_eq!(status, StatusCode::OK, "unexpected status, body: {body}");
    assert_eq!(body["code"], 0, "unexpected envelope: {body}");
    body["data"].clone()
}

/// Id field of a document or tree node record.
pub fn id_of(record: &Value) -> u64 {
    record["id"].as_u64().expect("record has no numeric id")
}
