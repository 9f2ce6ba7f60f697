//! Canonical document paths.
//!
//! A [`DocPath`] is the root-relative, forward-slash separated, lexically
//! cleaned form of a location inside the workspace. It is the key type of the
//! identity map, so two spellings of the same location (`notes/./a.md`,
//! `notes//a.md`) always compare equal.
//!
//! Cleaning is purely lexical. A path that climbs above the root keeps its
//! leading `..` components so the sandbox can reject it instead of silently
//! clamping it to the root.

use relative_path::{Component, RelativePath, RelativePathBuf};
use std::fmt;
use std::path::{Path, PathBuf};

/// Root-relative document path.
///
/// # Examples
///
/// ```
/// use renote_core::DocPath;
///
/// let path = DocPath::new("/notes/./drafts//todo.md");
/// assert_eq!(path.as_str(), "notes/drafts/todo.md");
/// assert_eq!(path.file_name(), Some("todo.md"));
/// assert_eq!(path.parent().unwrap().as_str(), "notes/drafts");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocPath(RelativePathBuf);

impl DocPath {
    /// The workspace root (empty path).
    #[inline]
    pub fn root() -> Self {
        DocPath(RelativePathBuf::new())
    }

    /// Create a cleaned path from a string.
    ///
    /// Leading slashes are stripped and `.`/`..` segments are collapsed.
    pub fn new(path: impl AsRef<str>) -> Self {
        let trimmed = path.as_ref().trim_start_matches('/');
        DocPath(RelativePath::new(trimmed).normalize())
    }

    /// Check if this is the workspace root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_str().is_empty()
    }

    /// Get the string form used as the identity map key.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// True when cleaning left a leading `..`, i.e. the path points above the root.
    pub fn escapes_root(&self) -> bool {
        matches!(self.0.components().next(), Some(Component::ParentDir))
    }

    /// Join a child component and clean the result.
    pub fn join(&self, component: impl AsRef<str>) -> Self {
        let joined = self.0.join(component.as_ref().trim_start_matches('/'));
        DocPath(joined.normalize())
    }

    /// Get the parent path. Returns `None` for the root.
    pub fn parent(&self) -> Option<DocPath> {
        if self.is_root() {
            return None;
        }
        self.0.parent().map(|p| DocPath(p.to_relative_path_buf()))
    }

    /// Final component (file or directory name). Returns `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name()
    }

    /// File name without its extension.
    pub fn file_stem(&self) -> Option<&str> {
        self.0.file_stem()
    }

    /// Extension of the final component, without the dot.
    pub fn extension(&self) -> Option<&str> {
        self.0.extension()
    }

    /// True when `self` equals `prefix` or lies beneath it.
    ///
    /// Matching happens on segment boundaries: `a/bc` is not within `a/b`.
    /// Every path is within the root.
    pub fn is_within(&self, prefix: &DocPath) -> bool {
        if prefix.is_root() {
            return true;
        }
        match self.as_str().strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Replace the leading `old` prefix with `new`.
    ///
    /// Only the leading occurrence is substituted; an interior repeat of the
    /// prefix text is left alone. Returns `None` when `self` is not within `old`.
    ///
    /// ```
    /// use renote_core::DocPath;
    ///
    /// let path = DocPath::new("a/b/a/b/c.md");
    /// let moved = path.rebase(&DocPath::new("a/b"), &DocPath::new("x")).unwrap();
    /// assert_eq!(moved.as_str(), "x/a/b/c.md");
    /// ```
    pub fn rebase(&self, old: &DocPath, new: &DocPath) -> Option<DocPath> {
        if !self.is_within(old) {
            return None;
        }
        let rest = self.as_str()[old.as_str().len()..].trim_start_matches('/');
        if rest.is_empty() {
            Some(new.clone())
        } else {
            Some(new.join(rest))
        }
    }

    /// Iterate over the normal components of this path.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.components().map(|c| c.as_str())
    }

    /// Map this path onto a host directory, one component at a time.
    pub fn to_fs_path(&self, base: &Path) -> PathBuf {
        let mut out = base.to_path_buf();
        for component in self.components() {
            out.push(component);
        }
        out
    }
}

impl AsRef<str> for DocPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DocPath {
    fn from(s: &str) -> Self {
        DocPath::new(s)
    }
}

impl From<String> for DocPath {
    fn from(s: String) -> Self {
        DocPath::new(s)
    }
}
