//! Request handlers.
//!
//! Each handler decodes its body, runs the workspace operation on a blocking
//! thread, and wraps the result in the JSON envelope.

use crate::error::{ApiError, ApiResult};
use crate::response::{self, ApiResponse, Body};
use crate::router::{Route, route};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use renote_core::{
    CreateDocumentRequest, Document, TreeNode, UpdateDocumentRequest, Workspace,
    WorkspaceResult,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

#[derive(Debug, Deserialize)]
struct CreateDirectoryBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    parent_path: String,
}

#[derive(Debug, Deserialize)]
struct MoveBody {
    #[serde(default)]
    new_parent_path: String,
}

#[derive(Debug, Deserialize)]
struct RenameBody {
    #[serde(default)]
    new_name: String,
}

#[derive(Debug, Serialize)]
struct TreeData {
    nodes: Vec<TreeNode>,
}

#[derive(Debug, Serialize)]
struct SyncData {
    created: usize,
}

/// Handle one HTTP request against `workspace`.
pub async fn handle(workspace: Arc<Workspace>, req: Request<Incoming>) -> Response<Body> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if method == Method::OPTIONS {
        return response::preflight();
    }

    let resp = match route(&method, &path) {
        Ok(route) => dispatch(&workspace, route, req)
            .await
            .unwrap_or_else(|e| response::from_error(&e)),
        Err(e) => response::from_error(&e),
    };

    let status = resp.status();
    if status.is_server_error() {
        error!(%method, %path, %status, "Request failed");
    } else if status.is_client_error() {
        warn!(%method, %path, %status, "Request rejected");
    } else {
        debug!(%method, %path, %status, "Request handled");
    }
    resp
}

async fn dispatch(
    ws: &Arc<Workspace>,
    route: Route,
    req: Request<Incoming>,
) -> ApiResult<Response<Body>> {
    match route {
        Route::Ping => Ok(response::plain(StatusCode::OK, "pong")),
        Route::ListDocuments => ok(Vec::<Document>::new()),
        Route::CreateDocument => {
            let body: CreateDocumentRequest = read_json(req).await?;
            ok(blocking(ws, move |ws| ws.create_document(&body)).await?)
        }
        Route::CreateDirectory => {
            let body: CreateDirectoryBody = read_json(req).await?;
            ok(blocking(ws, move |ws| ws.create_directory(&body.name, &body.parent_path)).await?)
        }
        Route::Sync => {
            let created = blocking(ws, Workspace::sync).await?;
            ok(SyncData { created })
        }
        Route::Tree => {
            let nodes = blocking(ws, Workspace::tree).await?;
            ok(TreeData { nodes })
        }
        Route::GetDocument(id) => ok(blocking(ws, move |ws| ws.get(id)).await?),
        Route::UpdateDocument(id) => {
            let body: UpdateDocumentRequest = read_json(req).await?;
            ok(blocking(ws, move |ws| ws.update(id, &body)).await?)
        }
        Route::DeleteDocument(id) => {
            blocking(ws, move |ws| ws.delete(id)).await?;
            Ok(response::json(StatusCode::OK, &ApiResponse::ok_empty()))
        }
        Route::Content(id) => ok(blocking(ws, move |ws| ws.content(id)).await?),
        Route::Move(id) => {
            let body: MoveBody = read_json(req).await?;
            ok(blocking(ws, move |ws| ws.move_to(id, &body.new_parent_path)).await?)
        }
        Route::Rename(id) => {
            let body: RenameBody = read_json(req).await?;
            ok(blocking(ws, move |ws| ws.rename(id, &body.new_name)).await?)
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn ok<T: Serialize>(data: T) -> ApiResult<Response<Body>> {
    Ok(response::json(StatusCode::OK, &ApiResponse::ok(data)))
}

async fn read_json<T: DeserializeOwned>(req: Request<Incoming>) -> ApiResult<T> {
    let bytes = req.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

/// Run a workspace operation off the async executor.
async fn blocking<T, F>(ws: &Arc<Workspace>, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Workspace) -> WorkspaceResult<T> + Send + 'static,
{
    let ws = Arc::clone(ws);
    let result = tokio::task::spawn_blocking(move || op(&ws)).await?;
    result.map_err(ApiError::from)
}
