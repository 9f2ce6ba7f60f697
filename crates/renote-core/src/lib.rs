//! Sandboxed document workspace with stable identifiers.
//!
//! This crate is the storage side of the Renote backend. It owns a directory
//! tree on disk and gives every file and folder in it a numeric id that
//! survives renames, moves and restarts.
//!
//! # Components
//!
//! - [`Sandbox`] - Confines client paths to the root and strips the UI display prefix
//! - [`DocPath`] - Canonical root-relative path, the key of the identity map
//! - [`IdentityMap`] - Durable `DocPath` ↔ [`DocId`] ledger persisted as JSON
//! - [`Workspace`] - Document operations (create, move, rename, delete, tree, sync)
//! - [`document`] - API records projected from filesystem metadata
//!
//! # Why an identity map?
//!
//! Clients address documents by id, but the filesystem only knows paths. A
//! rename or a directory move changes the path of every entry beneath it, so
//! the map is rewritten on segment boundaries in one locked step and written
//! back atomically. Ids of deleted entries are never reissued.
//!
//! # Example
//!
//! ```no_run
//! use renote_core::{CreateDocumentRequest, Workspace};
//!
//! let ws = Workspace::open("/srv/notes", "/workspace")?;
//! let doc = ws.create_document(&CreateDocumentRequest {
//!     title: "todo".to_string(),
//!     kind: "markdown".to_string(),
//!     parent_path: "/workspace/inbox".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let moved = ws.move_to(doc.id, "/workspace/archive")?;
//! assert_eq!(moved.id, doc.id);
//! assert_eq!(moved.file_path, "/workspace/archive/todo.md");
//! # Ok::<(), renote_core::WorkspaceError>(())
//! ```

#![warn(clippy::all)]

pub mod document;
pub mod error;
mod identity;
mod path;
mod sandbox;
mod workspace;

pub use document::{Document, DocumentContent, FileKind, NodeType, TreeNode};
pub use error::{ErrorCategory, WorkspaceError, WorkspaceResult};
pub use identity::{DocId, FIRST_ID, IdentityError, IdentityMap, IdentityRecord, RECORD_FILE};
pub use path::DocPath;
pub use sandbox::{DEFAULT_DISPLAY_PREFIX, RESERVED_DIR, Sandbox, SandboxError};
pub use workspace::{CreateDocumentRequest, UpdateDocumentRequest, Workspace};
