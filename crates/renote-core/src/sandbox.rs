//! Sandbox path resolution.
//!
//! Client-supplied paths are untrusted. [`Sandbox`] turns them into a
//! canonical [`DocPath`] (the identity map key) and an absolute host path
//! that is guaranteed to stay under the configured root.
//!
//! Resolution never clamps: an escaping path is rejected with
//! [`SandboxError::Violation`]. Clamping would let two different inputs alias
//! the same location and confuse the identity map.

use crate::path::DocPath;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Name of the reserved configuration directory inside the root.
pub const RESERVED_DIR: &str = ".renote";

/// Default UI-facing prefix for display paths.
pub const DEFAULT_DISPLAY_PREFIX: &str = "/workspace";

/// Errors raised while confining a path to the sandbox.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SandboxError {
    /// The path would resolve outside the root, or into the reserved directory.
    #[error("Path escapes sandbox root: {path}")]
    Violation {
        /// The offending path as the resolver saw it.
        path: String,
    },
}

impl SandboxError {
    fn violation(path: impl Into<String>) -> Self {
        SandboxError::Violation { path: path.into() }
    }
}

/// Confines paths to a root directory and translates display prefixes.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
    display_prefix: String,
}

impl Sandbox {
    /// Create a sandbox over `root`.
    ///
    /// The root is made absolute lexically; symlinks are not followed. A
    /// trailing slash on `display_prefix` is ignored.
    pub fn new(root: impl Into<PathBuf>, display_prefix: impl Into<String>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        let display_prefix = display_prefix.into().trim_end_matches('/').to_string();
        Self {
            root,
            display_prefix,
        }
    }

    /// The absolute sandbox root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The UI-facing prefix (no trailing slash).
    pub fn display_prefix(&self) -> &str {
        &self.display_prefix
    }

    /// Location of the reserved configuration directory.
    pub fn reserved_dir(&self) -> PathBuf {
        self.root.join(RESERVED_DIR)
    }

    /// Normalize a client path into a canonical relative path.
    ///
    /// Strips the display prefix, converts backslashes, trims whitespace and
    /// leading slashes, and cleans `.`/`..` lexically. Never fails: an
    /// escaping input keeps its leading `..` and is rejected later by
    /// [`Sandbox::resolve`].
    ///
    /// ```
    /// use renote_core::Sandbox;
    ///
    /// let sandbox = Sandbox::new("/srv/notes", "/workspace");
    /// assert_eq!(sandbox.normalize("/workspace/a/./b.md").as_str(), "a/b.md");
    /// assert_eq!(sandbox.normalize("/workspace/").as_str(), "");
    /// assert_eq!(sandbox.normalize(" a\\b ").as_str(), "a/b");
    /// ```
    pub fn normalize(&self, client_path: &str) -> DocPath {
        let replaced = client_path.replace('\\', "/");
        let path = replaced.trim();

        let prefix = self.display_prefix.as_str();
        if !prefix.is_empty() {
            if path == prefix || path.strip_prefix(prefix) == Some("/") {
                return DocPath::root();
            }
            if let Some(rest) = path.strip_prefix(prefix).and_then(|r| r.strip_prefix('/')) {
                return DocPath::new(rest);
            }
        }
        DocPath::new(path)
    }

    /// Resolve a relative path to an absolute path under the root.
    ///
    /// Two checks run: the cleaned relative path must not start with `..`,
    /// and the joined absolute path must still lie beneath the root.
    pub fn resolve(&self, relative: &DocPath) -> Result<PathBuf, SandboxError> {
        let clean = DocPath::new(relative.as_str());
        if clean.escapes_root() {
            warn!(path = %relative, "Rejected path escaping sandbox");
            return Err(SandboxError::violation(relative.as_str()));
        }

        let joined = clean.to_fs_path(&self.root);
        let absolute = std::path::absolute(&joined).unwrap_or(joined);
        let Ok(rel_to_root) = absolute.strip_prefix(&self.root) else {
            warn!(path = %relative, "Joined path left sandbox root");
            return Err(SandboxError::violation(relative.as_str()));
        };
        let escapes = rel_to_root
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            warn!(path = %relative, "Joined path left sandbox root");
            return Err(SandboxError::violation(relative.as_str()));
        }
        Ok(absolute)
    }

    /// Normalize and resolve a client path in one step.
    ///
    /// Unlike [`Sandbox::resolve`], this also refuses the reserved
    /// configuration directory, which clients must never address.
    pub fn resolve_client(&self, client_path: &str) -> Result<(DocPath, PathBuf), SandboxError> {
        let relative = self.normalize(client_path);
        if Self::is_reserved(&relative) {
            return Err(SandboxError::violation(relative.as_str()));
        }
        let absolute = self.resolve(&relative)?;
        Ok((relative, absolute))
    }

    /// Join a single client-supplied name onto `parent`.
    ///
    /// The name must be one plain path segment: separators, `.` and `..` are
    /// rejected rather than interpreted.
    pub fn join_child(&self, parent: &DocPath, name: &str) -> Result<DocPath, SandboxError> {
        let name = name.trim();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            warn!(parent = %parent, name, "Rejected child name");
            return Err(SandboxError::violation(parent.join(name).as_str()));
        }
        let child = parent.join(name);
        if Self::is_reserved(&child) {
            return Err(SandboxError::violation(child.as_str()));
        }
        Ok(child)
    }

    /// True for the reserved configuration directory and anything beneath it.
    pub fn is_reserved(relative: &DocPath) -> bool {
        relative.components().next() == Some(RESERVED_DIR)
    }

    /// Prefix a relative path with the display prefix for client responses.
    ///
    /// ```
    /// use renote_core::{DocPath, Sandbox};
    ///
    /// let sandbox = Sandbox::new("/srv/notes", "/workspace");
    /// assert_eq!(sandbox.to_display_path(&DocPath::new("a/b.md")), "/workspace/a/b.md");
    /// assert_eq!(sandbox.to_display_path(&DocPath::root()), "/workspace/");
    /// ```
    pub fn to_display_path(&self, relative: &DocPath) -> String {
        format!("{}/{}", self.display_prefix, relative.as_str())
    }

    /// Display path of a parent directory; the bare prefix at the root.
    pub fn to_display_parent(&self, parent: &DocPath) -> String {
        if parent.is_root() {
            self.display_prefix.clone()
        } else {
            self.to_display_path(parent)
        }
    }
}
