//! Document operations over a sandboxed root.
//!
//! [`Workspace`] ties the [`Sandbox`] and the [`IdentityMap`] together. Every
//! operation resolves client paths through the sandbox first, performs the
//! filesystem change, and only then updates the identity map. A failed
//! syscall therefore never leaves the map pointing at something that did not
//! happen.
//!
//! All methods are synchronous and take `&self`; the identity map serializes
//! its own mutations. Async callers should run them on a blocking thread.

use crate::document::{Document, DocumentContent, TreeNode, ensure_extension};
use crate::error::{WorkspaceError, WorkspaceResult};
use crate::identity::{DocId, IdentityMap, RECORD_FILE};
use crate::path::DocPath;
use crate::sandbox::{RESERVED_DIR, Sandbox};
use serde::Deserialize;
use std::fs::{self, Metadata, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

/// Body of a create-document request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateDocumentRequest {
    /// File or directory name. Files get an extension from `kind` if missing.
    pub title: String,
    /// Declared file type (`markdown`, `html`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Initial file content.
    pub content: String,
    /// Accepted for compatibility; not stored.
    pub description: String,
    /// Accepted for compatibility; not stored.
    pub tags: String,
    /// Client path of the containing directory.
    pub parent_path: String,
    /// Create a directory instead of a file.
    pub is_directory: bool,
}

/// Body of an update request. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub status: Option<i32>,
}

/// A sandboxed document tree with stable identifiers.
#[derive(Debug)]
pub struct Workspace {
    sandbox: Sandbox,
    ids: IdentityMap,
}

impl Workspace {
    /// Open (or initialize) a workspace rooted at `root`.
    ///
    /// Creates the root and the reserved directory when missing, then loads
    /// the identity record from `.renote/ids.json`.
    #[instrument(level = "debug", skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>, display_prefix: &str) -> WorkspaceResult<Self> {
        let sandbox = Sandbox::new(root.as_ref(), display_prefix);
        let reserved = sandbox.reserved_dir();
        fs::create_dir_all(&reserved).map_err(WorkspaceError::io(&reserved))?;

        let ids = IdentityMap::load(reserved.join(RECORD_FILE))?;
        info!(
            root = %sandbox.root().display(),
            prefix = sandbox.display_prefix(),
            documents = ids.len(),
            "Opened workspace"
        );
        Ok(Self { sandbox, ids })
    }

    /// The path resolver for this workspace.
    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    /// The identity ledger for this workspace.
    pub fn identities(&self) -> &IdentityMap {
        &self.ids
    }

    /// Create a file or directory under `req.parent_path`.
    #[instrument(level = "debug", skip_all, fields(title = %req.title, parent = %req.parent_path))]
    pub fn create_document(&self, req: &CreateDocumentRequest) -> WorkspaceResult<Document> {
        if req.is_directory {
            if req.title.trim().is_empty() {
                return Err(WorkspaceError::InvalidRequest(
                    "missing directory name".to_string(),
                ));
            }
            return self.create_directory(&req.title, &req.parent_path);
        }

        let title = req.title.trim();
        if title.is_empty() {
            return Err(WorkspaceError::InvalidRequest("missing title".to_string()));
        }

        let (parent, parent_abs) = self.sandbox.resolve_client(&req.parent_path)?;
        let rel = self
            .sandbox
            .join_child(&parent, &ensure_extension(title, &req.kind))?;
        let abs = self.sandbox.resolve(&rel)?;

        self.ensure_directory(&parent, &parent_abs)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&abs)
            .map_err(|e| self.create_error(&rel, &abs, e))?;
        file.write_all(req.content.as_bytes())
            .map_err(WorkspaceError::io(&abs))?;
        drop(file);

        let id = self.ids.assign(&rel)?;
        info!(%id, path = %rel, "Created document");
        self.project(&rel, id, &abs)
    }

    /// Create a directory (and any missing parents). Existing directories are
    /// returned as-is.
    #[instrument(level = "debug", skip(self))]
    pub fn create_directory(&self, name: &str, parent_path: &str) -> WorkspaceResult<Document> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkspaceError::InvalidRequest("missing name".to_string()));
        }
        let parent = self.sandbox.normalize(parent_path);
        let rel = self.sandbox.join_child(&parent, name)?;
        let abs = self.sandbox.resolve(&rel)?;

        self.ensure_directory(&parent, &self.sandbox.resolve(&parent)?)?;
        fs::create_dir_all(&abs).map_err(|e| self.create_error(&rel, &abs, e))?;
        let id = self.ids.assign(&rel)?;
        info!(%id, path = %rel, "Created directory");
        self.project(&rel, id, &abs)
    }

    /// Get the record for `id`.
    pub fn get(&self, id: DocId) -> WorkspaceResult<Document> {
        let (rel, _, meta) = self.locate(id)?;
        Ok(Document::project(&self.sandbox, &rel, id, &meta))
    }

    /// Get the record and text content of a file.
    pub fn content(&self, id: DocId) -> WorkspaceResult<DocumentContent> {
        let (rel, abs, meta) = self.locate(id)?;
        if meta.is_dir() {
            return Err(WorkspaceError::NotAFile(id));
        }
        let bytes = fs::read(&abs).map_err(WorkspaceError::io(&abs))?;
        Ok(DocumentContent {
            document: Document::project(&self.sandbox, &rel, id, &meta),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Overwrite a file's content when the request carries one.
    ///
    /// Title, description, tags and status have no filesystem counterpart and
    /// are ignored.
    #[instrument(level = "debug", skip(self, req))]
    pub fn update(&self, id: DocId, req: &UpdateDocumentRequest) -> WorkspaceResult<Document> {
        let (rel, abs, meta) = self.locate(id)?;
        if meta.is_dir() {
            return Err(WorkspaceError::NotAFile(id));
        }
        if let Some(content) = &req.content {
            fs::write(&abs, content).map_err(WorkspaceError::io(&abs))?;
            debug!(%id, bytes = content.len(), "Wrote document content");
        }
        self.project(&rel, id, &abs)
    }

    /// Delete a file, or a directory with everything beneath it.
    ///
    /// The identifiers of every removed entry are released and never reused.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&self, id: DocId) -> WorkspaceResult<()> {
        let (rel, abs, meta) = self.locate(id)?;
        if rel.is_root() {
            return Err(WorkspaceError::InvalidRequest(
                "cannot delete the workspace root".to_string(),
            ));
        }

        if meta.is_dir() {
            fs::remove_dir_all(&abs).map_err(WorkspaceError::io(&abs))?;
            let released = self.ids.release_subtree(&rel)?;
            info!(%id, path = %rel, released, "Deleted directory");
        } else {
            fs::remove_file(&abs).map_err(WorkspaceError::io(&abs))?;
            self.ids.release(&rel)?;
            info!(%id, path = %rel, "Deleted document");
        }
        Ok(())
    }

    /// Move an entry into another directory, keeping its name and identifier.
    #[instrument(level = "debug", skip(self))]
    pub fn move_to(&self, id: DocId, new_parent_path: &str) -> WorkspaceResult<Document> {
        let (rel, abs, meta) = self.locate(id)?;
        let Some(name) = rel.file_name() else {
            return Err(WorkspaceError::InvalidRequest(
                "cannot move the workspace root".to_string(),
            ));
        };

        let (new_parent, _) = self.sandbox.resolve_client(new_parent_path)?;
        if meta.is_dir() && new_parent.is_within(&rel) {
            return Err(WorkspaceError::InvalidRequest(format!(
                "cannot move {} into itself",
                self.sandbox.to_display_path(&rel)
            )));
        }
        let new_rel = new_parent.join(name);
        self.relocate(id, (&rel, &abs), &new_rel, meta.is_dir())
    }

    /// Rename an entry in place.
    ///
    /// Files keep their extension unless `new_name` carries one.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&self, id: DocId, new_name: &str) -> WorkspaceResult<Document> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(WorkspaceError::InvalidRequest("missing new_name".to_string()));
        }

        let (rel, abs, meta) = self.locate(id)?;
        let Some(parent) = rel.parent() else {
            return Err(WorkspaceError::InvalidRequest(
                "cannot rename the workspace root".to_string(),
            ));
        };

        let final_name = match rel.extension() {
            Some(ext) if !meta.is_dir() && Path::new(new_name).extension().is_none() => {
                format!("{new_name}.{ext}")
            }
            _ => new_name.to_string(),
        };
        let new_rel = self.sandbox.join_child(&parent, &final_name)?;
        self.relocate(id, (&rel, &abs), &new_rel, meta.is_dir())
    }

    /// List every entry as a flat tree, assigning ids to new entries.
    ///
    /// Entries come in walk order, sorted by name within each directory. The
    /// reserved directory is never listed.
    #[instrument(level = "debug", skip(self))]
    pub fn tree(&self) -> WorkspaceResult<Vec<TreeNode>> {
        let entries = self.scan();
        self.ids.assign_many(entries.iter().map(|(rel, _)| rel))?;

        let nodes = entries
            .iter()
            .filter_map(|(rel, meta)| {
                let id = self.ids.id_of(rel)?;
                Some(TreeNode::project(&self.sandbox, rel, id, meta))
            })
            .collect::<Vec<_>>();
        debug!(nodes = nodes.len(), "Listed tree");
        Ok(nodes)
    }

    /// Walk the root and assign ids to every entry that lacks one.
    ///
    /// Returns how many ids were minted.
    #[instrument(level = "debug", skip(self))]
    pub fn sync(&self) -> WorkspaceResult<usize> {
        let entries = self.scan();
        let minted = self.ids.assign_many(entries.iter().map(|(rel, _)| rel))?;
        info!(scanned = entries.len(), minted, "Synchronized workspace");
        Ok(minted)
    }

    /// Resolve a mapped id to its paths and current metadata.
    fn locate(&self, id: DocId) -> WorkspaceResult<(DocPath, PathBuf, Metadata)> {
        let rel = self.ids.lookup(id)?;
        let abs = self
            .sandbox
            .resolve(&rel)
            .map_err(|_| WorkspaceError::NotFound(id))?;
        let meta = fs::metadata(&abs).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WorkspaceError::NotFound(id),
            _ => WorkspaceError::Io {
                path: abs.clone(),
                source: e,
            },
        })?;
        Ok((rel, abs, meta))
    }

    /// Rename on disk, then carry the identifier (and any descendants) along.
    fn relocate(
        &self,
        id: DocId,
        (rel, abs): (&DocPath, &Path),
        new_rel: &DocPath,
        is_dir: bool,
    ) -> WorkspaceResult<Document> {
        let new_abs = self.sandbox.resolve(new_rel)?;
        if new_rel == rel {
            return self.project(new_rel, id, &new_abs);
        }
        if fs::symlink_metadata(&new_abs).is_ok() {
            return Err(WorkspaceError::AlreadyExists(
                self.sandbox.to_display_path(new_rel),
            ));
        }
        if let Some(parent) = new_rel.parent() {
            self.ensure_directory(&parent, &self.sandbox.resolve(&parent)?)?;
        }
        fs::rename(abs, &new_abs).map_err(WorkspaceError::io(abs))?;

        if is_dir {
            let moved = self.ids.rewrite_subtree(rel, new_rel)?;
            info!(%id, from = %rel, to = %new_rel, moved, "Moved directory");
        } else {
            self.ids.rewrite(id, new_rel)?;
            info!(%id, from = %rel, to = %new_rel, "Moved document");
        }
        self.project(new_rel, id, &new_abs)
    }

    /// Create `abs` and its missing parents, refusing when a file sits in the way.
    fn ensure_directory(&self, rel: &DocPath, abs: &Path) -> WorkspaceResult<()> {
        let blocked = abs
            .ancestors()
            .take_while(|p| p.starts_with(self.sandbox.root()))
            .find_map(|p| fs::metadata(p).ok())
            .is_some_and(|meta| !meta.is_dir());
        if blocked {
            return Err(WorkspaceError::InvalidRequest(format!(
                "{} is not a directory",
                self.sandbox.to_display_path(rel)
            )));
        }
        fs::create_dir_all(abs).map_err(WorkspaceError::io(abs))
    }

    fn project(&self, rel: &DocPath, id: DocId, abs: &Path) -> WorkspaceResult<Document> {
        let meta = fs::metadata(abs).map_err(WorkspaceError::io(abs))?;
        Ok(Document::project(&self.sandbox, rel, id, &meta))
    }

    fn create_error(&self, rel: &DocPath, abs: &Path, e: io::Error) -> WorkspaceError {
        if e.kind() == io::ErrorKind::AlreadyExists {
            WorkspaceError::AlreadyExists(self.sandbox.to_display_path(rel))
        } else {
            WorkspaceError::Io {
                path: abs.to_path_buf(),
                source: e,
            }
        }
    }

    /// Every entry under the root except the reserved directory.
    ///
    /// Unreadable entries and names that are not UTF-8 are skipped.
    fn scan(&self) -> Vec<(DocPath, Metadata)> {
        let root = self.sandbox.root();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.depth() == 1 && e.file_name() == RESERVED_DIR));

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            let Some(rel) = relative_doc_path(root, entry.path()) else {
                warn!(path = %entry.path().display(), "Skipping entry with non UTF-8 name");
                continue;
            };
            match entry.metadata() {
                Ok(meta) => entries.push((rel, meta)),
                Err(e) => warn!(path = %rel, error = %e, "Skipping entry without metadata"),
            }
        }
        entries
    }
}

/// Express a host path under `root` as a document path.
fn relative_doc_path(root: &Path, path: &Path) -> Option<DocPath> {
    let rel = path.strip_prefix(root).ok()?;
    let mut out = DocPath::root();
    for component in rel.components() {
        out = out.join(component.as_os_str().to_str()?);
    }
    Some(out)
}
