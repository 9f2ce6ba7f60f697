//! Request routing.
//!
//! Maps a method and path onto a [`Route`]. Routing never touches the
//! workspace; it only decides which operation a request names.

use crate::error::{ApiError, ApiResult};
use hyper::Method;
use renote_core::DocId;

const DOCUMENTS: &str = "/v1/documents";

/// An operation addressed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Ping,
    ListDocuments,
    CreateDocument,
    CreateDirectory,
    Sync,
    Tree,
    GetDocument(DocId),
    UpdateDocument(DocId),
    DeleteDocument(DocId),
    Content(DocId),
    Move(DocId),
    Rename(DocId),
}

/// Resolve `method` and `path` to a route.
pub fn route(method: &Method, path: &str) -> ApiResult<Route> {
    if path == "/ping" || path == "/v1/ping" {
        return only(method, &Method::GET, Route::Ping);
    }
    if path == DOCUMENTS {
        return match *method {
            Method::GET => Ok(Route::ListDocuments),
            Method::POST => Ok(Route::CreateDocument),
            _ => Err(ApiError::MethodNotAllowed),
        };
    }

    let Some(rest) = path
        .strip_prefix(DOCUMENTS)
        .and_then(|r| r.strip_prefix('/'))
    else {
        return Err(ApiError::RouteNotFound);
    };
    let mut segments = rest.split('/');
    let head = segments.next().unwrap_or_default();
    let sub = segments.next().filter(|s| !s.is_empty());
    if head.is_empty() || segments.next().is_some_and(|s| !s.is_empty()) {
        return Err(ApiError::RouteNotFound);
    }

    match (head, sub) {
        ("directories", None) => return only(method, &Method::POST, Route::CreateDirectory),
        ("sync", None) => return only(method, &Method::POST, Route::Sync),
        ("tree", None) => return only(method, &Method::GET, Route::Tree),
        _ => {}
    }

    let id: DocId = head
        .parse()
        .map_err(|_| ApiError::InvalidId(head.to_string()))?;

    match sub {
        None => match *method {
            Method::GET => Ok(Route::GetDocument(id)),
            Method::PUT => Ok(Route::UpdateDocument(id)),
            Method::DELETE => Ok(Route::DeleteDocument(id)),
            _ => Err(ApiError::MethodNotAllowed),
        },
        Some("content") => only(method, &Method::GET, Route::Content(id)),
        Some("move") => only(method, &Method::POST, Route::Move(id)),
        Some("rename") => only(method, &Method::POST, Route::Rename(id)),
        Some(_) => Err(ApiError::RouteNotFound),
    }
}

fn only(method: &Method, expected: &Method, route: Route) -> ApiResult<Route> {
    if method == expected {
        Ok(route)
    } else {
        Err(ApiError::MethodNotAllowed)
    }
}
