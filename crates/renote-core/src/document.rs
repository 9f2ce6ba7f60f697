//! API-shaped records for workspace entries.
//!
//! These are thin projections of filesystem metadata plus the entry's stable
//! identifier. Nothing here touches the identity map; callers pass the id in.

use crate::identity::DocId;
use crate::path::DocPath;
use crate::sandbox::Sandbox;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::time::SystemTime;

/// Content type of a file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// `.md`, `.markdown`
    Markdown,
    /// `.html`, `.htm`
    Html,
    /// `.json`
    Json,
    /// `.yaml`, `.yml`
    Yaml,
    /// Anything else.
    Text,
}

impl FileKind {
    /// Classify a file name by extension (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        let ext = lower.rsplit_once('.').map(|(_, ext)| ext);
        match ext {
            Some("md" | "markdown") => FileKind::Markdown,
            Some("html" | "htm") => FileKind::Html,
            Some("json") => FileKind::Json,
            Some("yaml" | "yml") => FileKind::Yaml,
            _ => FileKind::Text,
        }
    }

    /// Parse a declared type name. Unknown names are treated as text.
    pub fn from_declared(declared: &str) -> Self {
        match declared.trim().to_ascii_lowercase().as_str() {
            "markdown" => FileKind::Markdown,
            "html" => FileKind::Html,
            "json" => FileKind::Json,
            "yaml" => FileKind::Yaml,
            _ => FileKind::Text,
        }
    }

    /// Name used in API records.
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Markdown => "markdown",
            FileKind::Html => "html",
            FileKind::Json => "json",
            FileKind::Yaml => "yaml",
            FileKind::Text => "text",
        }
    }

    /// Default extension, with the leading dot.
    pub fn default_extension(self) -> &'static str {
        match self {
            FileKind::Markdown => ".md",
            FileKind::Html => ".html",
            FileKind::Json => ".json",
            FileKind::Yaml => ".yaml",
            FileKind::Text => ".txt",
        }
    }
}

/// Append the default extension for `declared` unless `base` already has a dot.
///
/// ```
/// use renote_core::document::ensure_extension;
///
/// assert_eq!(ensure_extension("todo", "markdown"), "todo.md");
/// assert_eq!(ensure_extension("todo.txt", "markdown"), "todo.txt");
/// assert_eq!(ensure_extension("todo", ""), "todo.txt");
/// ```
pub fn ensure_extension(base: &str, declared: &str) -> String {
    if base.contains('.') {
        return base.to_string();
    }
    format!("{base}{}", FileKind::from_declared(declared).default_extension())
}

/// Title shown for an entry: the file name without its extension.
fn title_of(path: &DocPath) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .unwrap_or_default()
        .to_string()
}

fn rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn modified_or_now(meta: &Metadata) -> SystemTime {
    match meta.modified() {
        Ok(t) if t != SystemTime::UNIX_EPOCH => t,
        _ => SystemTime::now(),
    }
}

fn size_of(meta: &Metadata) -> u64 {
    if meta.is_dir() { 0 } else { meta.len() }
}

/// Full document record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: i32,
    pub description: String,
    pub tags: String,
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub parent_path: String,
    pub is_directory: bool,
    pub user_id: i64,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub share_token: Option<String>,
    pub view_count: i64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_viewed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_sync: Option<String>,
}

impl Document {
    /// Project a filesystem entry into a document record.
    pub fn project(sandbox: &Sandbox, path: &DocPath, id: DocId, meta: &Metadata) -> Self {
        let is_directory = meta.is_dir();
        let file_name = path.file_name().unwrap_or_default().to_string();
        let kind = if is_directory {
            "directory".to_string()
        } else {
            FileKind::from_name(&file_name).as_str().to_string()
        };
        let stamp = rfc3339(modified_or_now(meta));

        Self {
            id,
            title: title_of(path),
            kind,
            status: 0,
            description: String::new(),
            tags: String::new(),
            file_path: sandbox.to_display_path(path),
            file_name,
            file_size: size_of(meta),
            parent_path: path.parent().unwrap_or_default().as_str().to_string(),
            is_directory,
            user_id: 0,
            is_public: false,
            share_token: None,
            view_count: 0,
            created_at: stamp.clone(),
            updated_at: stamp,
            last_viewed: None,
            last_sync: None,
        }
    }
}

/// Document plus its text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContent {
    pub document: Document,
    pub content: String,
}

/// Node type in the file tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Folder,
}

/// One entry of the flat file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: DocId,
    pub name: String,
    pub path: String,
    pub parent_path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_type: Option<FileKind>,
    pub size: u64,
    #[serde(rename = "modified_at")]
    pub modified_at: String,
}

impl TreeNode {
    /// Project a filesystem entry into a tree node.
    pub fn project(sandbox: &Sandbox, path: &DocPath, id: DocId, meta: &Metadata) -> Self {
        let (node_type, file_type) = if meta.is_dir() {
            (NodeType::Folder, None)
        } else {
            let name = path.file_name().unwrap_or_default();
            (NodeType::File, Some(FileKind::from_name(name)))
        };

        Self {
            id,
            name: title_of(path),
            path: sandbox.to_display_path(path),
            parent_path: sandbox.to_display_parent(&path.parent().unwrap_or_default()),
            node_type,
            file_type,
            size: size_of(meta),
            modified_at: rfc3339(modified_or_now(meta)),
        }
    }
}
