//! Durable path-to-identifier mapping.
//!
//! Every entry in the workspace gets a numeric [`DocId`] the first time it is
//! observed. The identifier follows the entry across renames and moves and is
//! never handed out again once the entry is deleted, so clients can keep
//! referring to a document while the filesystem churns underneath.
//!
//! # Design
//!
//! [`IdentityMap`] owns a single `Ledger` behind one mutex:
//! - `forward`: [`DocPath`] → [`DocId`]
//! - `reverse`: [`DocId`] → [`DocPath`]
//! - `next_id`: the counter all identifiers are minted from
//!
//! The two maps are only ever changed together inside `Ledger` methods, so no
//! caller can observe one without the other.
//!
//! # Persistence
//!
//! The forward map and counter are written as one JSON [`IdentityRecord`]
//! after every mutation that changed something. The write goes to a temporary
//! file in the same directory which is then renamed over the durable file, so
//! a crash leaves either the old or the new record, never a torn one.
//!
//! A failed write is reported as [`IdentityError::Storage`]. The in-memory
//! change is kept; the next successful persist brings the file up to date.

use crate::path::DocPath;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::{self, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// First identifier handed out by an empty ledger. Zero is never issued.
pub const FIRST_ID: u64 = 1;

/// File name of the durable record inside the reserved directory.
pub const RECORD_FILE: &str = "ids.json";

/// Stable identifier of a workspace entry.
///
/// Serialized as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(u64);

impl DocId {
    /// Wrap a raw identifier.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DocId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<DocId> for u64 {
    #[inline]
    fn from(id: DocId) -> Self {
        id.0
    }
}

impl FromStr for DocId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(DocId)
    }
}

/// Errors from the identity map.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No live mapping for the identifier.
    #[error("No document with id {0}")]
    NotFound(DocId),

    /// Writing or reading the durable record failed.
    #[error("Identity store I/O failed at {path}: {source}")]
    Storage {
        /// Location of the durable record.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The durable record exists but cannot be used.
    #[error("Identity store at {path} is malformed: {reason}")]
    MalformedRecord {
        /// Location of the durable record.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

/// On-disk shape of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Next identifier to mint.
    pub next_id: u64,
    /// Canonical relative path → identifier.
    #[serde(default)]
    pub paths: BTreeMap<String, DocId>,
}

impl Default for IdentityRecord {
    fn default() -> Self {
        Self {
            next_id: FIRST_ID,
            paths: BTreeMap::new(),
        }
    }
}

/// Forward map, reverse index and counter, always mutated together.
#[derive(Debug, Default)]
struct Ledger {
    next_id: u64,
    forward: HashMap<DocPath, DocId>,
    reverse: HashMap<DocId, DocPath>,
}

impl Ledger {
    /// Build a ledger from a record, rejecting records that cannot be inverted.
    fn from_record(record: IdentityRecord) -> Result<Self, String> {
        if record.next_id < FIRST_ID {
            return Err(format!("next_id must be at least {FIRST_ID}"));
        }
        let mut ledger = Ledger {
            next_id: record.next_id,
            forward: HashMap::with_capacity(record.paths.len()),
            reverse: HashMap::with_capacity(record.paths.len()),
        };
        for (raw, id) in record.paths {
            if id.get() < FIRST_ID || id.get() >= record.next_id {
                return Err(format!("id {id} for {raw:?} is outside 1..{}", record.next_id));
            }
            let path = DocPath::new(&raw);
            if path.as_str() != raw {
                return Err(format!("path {raw:?} is not in canonical form"));
            }
            if let Some(previous) = ledger.reverse.insert(id, path.clone()) {
                return Err(format!("id {id} is shared by {previous:?} and {raw:?}"));
            }
            ledger.forward.insert(path, id);
        }
        Ok(ledger)
    }

    fn to_record(&self) -> IdentityRecord {
        IdentityRecord {
            next_id: self.next_id,
            paths: self
                .forward
                .iter()
                .map(|(path, id)| (path.as_str().to_string(), *id))
                .collect(),
        }
    }

    /// Returns the id for `path`, minting one if needed. The flag is true when minted.
    fn insert(&mut self, path: &DocPath) -> (DocId, bool) {
        if let Some(id) = self.forward.get(path) {
            return (*id, false);
        }
        let id = DocId(self.next_id);
        self.next_id += 1;
        self.forward.insert(path.clone(), id);
        self.reverse.insert(id, path.clone());
        (id, true)
    }

    /// Point `id` at `new_path`. Any other id mapped at `new_path` is dropped.
    fn relocate(&mut self, id: DocId, new_path: DocPath) -> bool {
        let Some(old_path) = self.reverse.get(&id) else {
            return false;
        };
        if *old_path == new_path {
            return false;
        }
        let old_path = old_path.clone();
        self.forward.remove(&old_path);
        self.bind(id, new_path);
        true
    }

    /// Insert a forward/reverse pair, evicting whatever held `path` before.
    fn bind(&mut self, id: DocId, path: DocPath) {
        if let Some(evicted) = self.forward.insert(path.clone(), id)
            && evicted != id
        {
            self.reverse.remove(&evicted);
        }
        self.reverse.insert(id, path);
    }

    fn remove_path(&mut self, path: &DocPath) -> Option<DocId> {
        let id = self.forward.remove(path)?;
        self.reverse.remove(&id);
        Some(id)
    }

    /// Move every entry within `old` under `new`, keeping identifiers.
    fn rebase(&mut self, old: &DocPath, new: &DocPath) -> usize {
        let moved: Vec<(DocId, DocPath)> = self
            .forward
            .iter()
            .filter_map(|(path, id)| path.rebase(old, new).map(|p| (*id, p)))
            .collect();
        if moved.is_empty() || old == new {
            return 0;
        }
        // Drop every old key first so source and destination sets may overlap.
        for (id, _) in &moved {
            if let Some(path) = self.reverse.remove(id) {
                self.forward.remove(&path);
            }
        }
        for (id, path) in &moved {
            self.bind(*id, path.clone());
        }
        moved.len()
    }

    fn remove_within(&mut self, prefix: &DocPath) -> usize {
        let doomed: Vec<DocPath> = self
            .forward
            .keys()
            .filter(|path| path.is_within(prefix))
            .cloned()
            .collect();
        for path in &doomed {
            self.remove_path(path);
        }
        doomed.len()
    }
}

/// Thread-safe, file-backed mapping between document paths and identifiers.
///
/// # Example
///
/// ```no_run
/// use renote_core::{DocPath, IdentityMap};
///
/// let map = IdentityMap::load("/srv/notes/.renote/ids.json")?;
/// let id = map.assign(&DocPath::new("notes/todo.md"))?;
/// map.rewrite_subtree(&DocPath::new("notes"), &DocPath::new("archive/notes"))?;
/// assert_eq!(map.lookup(id)?.as_str(), "archive/notes/todo.md");
/// # Ok::<(), renote_core::IdentityError>(())
/// ```
#[derive(Debug)]
pub struct IdentityMap {
    store_path: PathBuf,
    ledger: Mutex<Ledger>,
}

impl IdentityMap {
    /// Load the ledger from `store_path`.
    ///
    /// A missing file yields an empty ledger (`next_id = 1`) that is written
    /// out immediately, so the file always exists after loading. A file that
    /// does not parse, or whose contents could not be inverted, is a
    /// [`IdentityError::MalformedRecord`].
    #[instrument(level = "debug", skip_all, fields(path = %store_path.as_ref().display()))]
    pub fn load(store_path: impl AsRef<Path>) -> Result<Self, IdentityError> {
        let store_path = store_path.as_ref().to_path_buf();
        let storage_err = |source| IdentityError::Storage {
            path: store_path.clone(),
            source,
        };

        let record = match std::fs::read_to_string(&store_path) {
            Ok(text) => {
                serde_json::from_str::<IdentityRecord>(&text).map_err(|e| {
                    IdentityError::MalformedRecord {
                        path: store_path.clone(),
                        reason: e.to_string(),
                    }
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = store_path.parent() {
                    std::fs::create_dir_all(parent).map_err(storage_err)?;
                }
                let record = IdentityRecord::default();
                write_record(&store_path, &record).map_err(storage_err)?;
                debug!("Initialized empty identity store");
                record
            }
            Err(e) => return Err(storage_err(e)),
        };

        let ledger = Ledger::from_record(record).map_err(|reason| IdentityError::MalformedRecord {
            path: store_path.clone(),
            reason,
        })?;
        info!(
            entries = ledger.forward.len(),
            next_id = ledger.next_id,
            "Loaded identity store"
        );

        Ok(Self {
            store_path,
            ledger: Mutex::new(ledger),
        })
    }

    /// Location of the durable record.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Get the identifier for `path`, minting and persisting a new one if needed.
    ///
    /// Repeated calls for the same path return the same id and do not touch
    /// the disk.
    pub fn assign(&self, path: &DocPath) -> Result<DocId, IdentityError> {
        let mut ledger = self.ledger.lock();
        let (id, minted) = ledger.insert(path);
        if minted {
            debug!(%id, path = %path, "Assigned new document id");
            self.write_locked(&ledger)?;
        }
        Ok(id)
    }

    /// Assign identifiers for many paths, persisting at most once.
    ///
    /// Returns how many identifiers were newly minted.
    pub fn assign_many<'a, I>(&self, paths: I) -> Result<usize, IdentityError>
    where
        I: IntoIterator<Item = &'a DocPath>,
    {
        let mut ledger = self.ledger.lock();
        let minted = paths
            .into_iter()
            .filter(|path| ledger.insert(path).1)
            .count();
        if minted > 0 {
            debug!(minted, "Assigned document ids in bulk");
            self.write_locked(&ledger)?;
        }
        Ok(minted)
    }

    /// Get the path currently mapped to `id`.
    pub fn lookup(&self, id: DocId) -> Result<DocPath, IdentityError> {
        self.ledger
            .lock()
            .reverse
            .get(&id)
            .cloned()
            .ok_or(IdentityError::NotFound(id))
    }

    /// Get the identifier for `path` without minting one.
    pub fn id_of(&self, path: &DocPath) -> Option<DocId> {
        self.ledger.lock().forward.get(path).copied()
    }

    /// Point `id` at a new path, keeping the identifier.
    ///
    /// Does nothing if `id` is not mapped; callers validate with
    /// [`IdentityMap::lookup`] first.
    pub fn rewrite(&self, id: DocId, new_path: &DocPath) -> Result<(), IdentityError> {
        let mut ledger = self.ledger.lock();
        if ledger.relocate(id, new_path.clone()) {
            debug!(%id, path = %new_path, "Rewrote document path");
            self.write_locked(&ledger)?;
        }
        Ok(())
    }

    /// Move every mapping equal to or beneath `old_prefix` under `new_prefix`.
    ///
    /// Prefixes match on path segments, so `a/bc` is untouched when `a/b`
    /// moves. Returns the number of rewritten entries.
    pub fn rewrite_subtree(
        &self,
        old_prefix: &DocPath,
        new_prefix: &DocPath,
    ) -> Result<usize, IdentityError> {
        let mut ledger = self.ledger.lock();
        let moved = ledger.rebase(old_prefix, new_prefix);
        if moved > 0 {
            debug!(from = %old_prefix, to = %new_prefix, moved, "Rewrote subtree paths");
            self.write_locked(&ledger)?;
        }
        Ok(moved)
    }

    /// Forget the mapping for exactly `path`. Returns the released id, if any.
    pub fn release(&self, path: &DocPath) -> Result<Option<DocId>, IdentityError> {
        let mut ledger = self.ledger.lock();
        let released = ledger.remove_path(path);
        if let Some(id) = released {
            debug!(%id, path = %path, "Released document id");
            self.write_locked(&ledger)?;
        }
        Ok(released)
    }

    /// Forget every mapping equal to or beneath `prefix`.
    ///
    /// Returns the number of released entries.
    pub fn release_subtree(&self, prefix: &DocPath) -> Result<usize, IdentityError> {
        let mut ledger = self.ledger.lock();
        let released = ledger.remove_within(prefix);
        if released > 0 {
            debug!(prefix = %prefix, released, "Released subtree ids");
            self.write_locked(&ledger)?;
        }
        Ok(released)
    }

    /// Write the full ledger to disk.
    pub fn persist(&self) -> Result<(), IdentityError> {
        let ledger = self.ledger.lock();
        self.write_locked(&ledger)
    }

    /// The next identifier that would be minted.
    pub fn next_id(&self) -> u64 {
        self.ledger.lock().next_id
    }

    /// Number of live mappings.
    pub fn len(&self) -> usize {
        self.ledger.lock().forward.len()
    }

    /// True when no path is mapped.
    pub fn is_empty(&self) -> bool {
        self.ledger.lock().forward.is_empty()
    }

    /// A consistent copy of the ledger in its on-disk shape.
    pub fn snapshot(&self) -> IdentityRecord {
        self.ledger.lock().to_record()
    }

    /// A consistent copy of the reverse index.
    pub fn reverse_index(&self) -> BTreeMap<DocId, DocPath> {
        self.ledger
            .lock()
            .reverse
            .iter()
            .map(|(id, path)| (*id, path.clone()))
            .collect()
    }

    fn write_locked(&self, ledger: &Ledger) -> Result<(), IdentityError> {
        write_record(&self.store_path, &ledger.to_record()).map_err(|source| {
            IdentityError::Storage {
                path: self.store_path.clone(),
                source,
            }
        })
    }
}

/// Write `record` atomically: temp file in the same directory, then rename.
fn write_record(path: &Path, record: &IdentityRecord) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::other("identity store path has no parent directory"))?;

    // Same directory keeps the rename on one filesystem
    let mut temp = NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut temp, record)?;
    temp.write_all(b"\n")?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_map() -> (TempDir, IdentityMap) {
        let dir = TempDir::new().unwrap();
        let map = IdentityMap::load(dir.path().join(".renote").join(RECORD_FILE)).unwrap();
        (dir, map)
    }

    fn p(s: &str) -> DocPath {
        DocPath::new(s)
    }

    #[test]
    fn test_load_creates_default_record() {
        let (dir, map) = make_map();
        let store = dir.path().join(".renote").join(RECORD_FILE);
        assert!(store.exists());
        assert_eq!(map.next_id(), FIRST_ID);
        assert!(map.is_empty());

        let on_disk: IdentityRecord =
            serde_json::from_str(&std::fs::read_to_string(store).unwrap()).unwrap();
        assert_eq!(on_disk, IdentityRecord::default());
    }

    #[test]
    fn test_assign_is_idempotent() {
        let (_dir, map) = make_map();
        let first = map.assign(&p("notes/todo.md")).unwrap();
        let second = map.assign(&p("notes/todo.md")).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, DocId::new(1));
        assert_eq!(map.next_id(), 2);
    }

    #[test]
    fn test_noop_mutations_skip_the_store() {
        let dir = TempDir::new().unwrap();
        let store_dir = dir.path().join(".renote");
        let map = IdentityMap::load(store_dir.join(RECORD_FILE)).unwrap();
        let id = map.assign(&p("a")).unwrap();

        // Any write would now fail with a storage error
        std::fs::remove_dir_all(&store_dir).unwrap();

        assert_eq!(map.assign(&p("a")).unwrap(), id);
        assert_eq!(map.assign_many([&p("a")]).unwrap(), 0);
        map.rewrite(id, &p("a")).unwrap();
        assert_eq!(map.rewrite_subtree(&p("missing"), &p("elsewhere")).unwrap(), 0);
        assert_eq!(map.release(&p("missing")).unwrap(), None);
        assert_eq!(map.release_subtree(&p("missing")).unwrap(), 0);
        assert!(!store_dir.exists());
    }

    #[test]
    fn test_assign_equivalent_spellings_share_id() {
        let (_dir, map) = make_map();
        let a = map.assign(&p("notes/./todo.md")).unwrap();
        let b = map.assign(&p("/notes//todo.md")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_lookup_unknown_id() {
        let (_dir, map) = make_map();
        assert!(matches!(
            map.lookup(DocId::new(42)),
            Err(IdentityError::NotFound(id)) if id == DocId::new(42)
        ));
    }

    #[test]
    fn test_rewrite_preserves_identity() {
        let (_dir, map) = make_map();
        let id = map.assign(&p("a.md")).unwrap();
        map.rewrite(id, &p("b.md")).unwrap();

        assert_eq!(map.lookup(id).unwrap(), p("b.md"));
        assert_eq!(map.id_of(&p("a.md")), None);
        assert_eq!(map.id_of(&p("b.md")), Some(id));
    }

    #[test]
    fn test_rewrite_unknown_id_is_noop() {
        let (_dir, map) = make_map();
        map.assign(&p("a.md")).unwrap();
        map.rewrite(DocId::new(99), &p("b.md")).unwrap();
        assert_eq!(map.id_of(&p("b.md")), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_rewrite_onto_mapped_path_evicts_previous_owner() {
        let (_dir, map) = make_map();
        let a = map.assign(&p("a.md")).unwrap();
        let b = map.assign(&p("b.md")).unwrap();
        map.rewrite(a, &p("b.md")).unwrap();

        assert_eq!(map.id_of(&p("b.md")), Some(a));
        assert!(map.lookup(b).is_err());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_rewrite_subtree_respects_segment_boundary() {
        let (_dir, map) = make_map();
        let ab = map.assign(&p("a/b")).unwrap();
        let abc = map.assign(&p("a/b/c")).unwrap();
        let sibling = map.assign(&p("a/bc")).unwrap();

        let moved = map.rewrite_subtree(&p("a/b"), &p("x/y")).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(map.lookup(ab).unwrap(), p("x/y"));
        assert_eq!(map.lookup(abc).unwrap(), p("x/y/c"));
        assert_eq!(map.lookup(sibling).unwrap(), p("a/bc"));
    }

    #[test]
    fn test_rewrite_subtree_into_overlapping_destination() {
        let (_dir, map) = make_map();
        let a = map.assign(&p("a")).unwrap();
        let ax = map.assign(&p("a/x")).unwrap();

        map.rewrite_subtree(&p("a"), &p("a/x")).unwrap();
        assert_eq!(map.lookup(a).unwrap(), p("a/x"));
        assert_eq!(map.lookup(ax).unwrap(), p("a/x/x"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_release_and_release_subtree() {
        let (_dir, map) = make_map();
        let ab = map.assign(&p("a/b")).unwrap();
        let abc = map.assign(&p("a/b/c")).unwrap();
        let sibling = map.assign(&p("a/bc")).unwrap();

        assert_eq!(map.release(&p("a/b/c")).unwrap(), Some(abc));
        assert_eq!(map.release(&p("a/b/c")).unwrap(), None);

        let abc = map.assign(&p("a/b/c")).unwrap();
        assert_eq!(map.release_subtree(&p("a/b")).unwrap(), 2);
        assert!(map.lookup(ab).is_err());
        assert!(map.lookup(abc).is_err());
        assert_eq!(map.lookup(sibling).unwrap(), p("a/bc"));
    }

    #[test]
    fn test_released_ids_are_not_reused() {
        let (_dir, map) = make_map();
        let first = map.assign(&p("a.md")).unwrap();
        map.release(&p("a.md")).unwrap();
        let second = map.assign(&p("a.md")).unwrap();
        assert_ne!(first, second);
        assert_eq!(map.next_id(), 3);
    }

    #[test]
    fn test_reload_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join(RECORD_FILE);

        let map = IdentityMap::load(&store).unwrap();
        map.assign(&p("notes/todo.md")).unwrap();
        map.assign(&p("notes")).unwrap();
        map.assign(&p("other.md")).unwrap();
        map.rewrite_subtree(&p("notes"), &p("archive/notes")).unwrap();
        map.release(&p("other.md")).unwrap();
        map.persist().unwrap();

        let reloaded = IdentityMap::load(&store).unwrap();
        assert_eq!(reloaded.snapshot(), map.snapshot());
        assert_eq!(reloaded.reverse_index(), map.reverse_index());
        assert_eq!(reloaded.next_id(), 4);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join(RECORD_FILE);
        std::fs::write(&store, "{ not json").unwrap();

        assert!(matches!(
            IdentityMap::load(&store),
            Err(IdentityError::MalformedRecord { .. })
        ));
        // The broken file is left for the operator
        assert_eq!(std::fs::read_to_string(&store).unwrap(), "{ not json");
    }

    #[test]
    fn test_record_with_duplicate_ids_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join(RECORD_FILE);
        std::fs::write(&store, r#"{"next_id": 3, "paths": {"a": 1, "b": 1}}"#).unwrap();
        assert!(matches!(
            IdentityMap::load(&store),
            Err(IdentityError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_record_with_id_beyond_counter_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join(RECORD_FILE);
        std::fs::write(&store, r#"{"next_id": 2, "paths": {"a": 5}}"#).unwrap();
        assert!(matches!(
            IdentityMap::load(&store),
            Err(IdentityError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let dir = TempDir::new().unwrap();
        let store_dir = dir.path().join(".renote");
        let map = IdentityMap::load(store_dir.join(RECORD_FILE)).unwrap();

        std::fs::remove_dir_all(&store_dir).unwrap();
        let result = map.assign(&p("a.md"));
        assert!(matches!(result, Err(IdentityError::Storage { .. })));

        // Memory moved ahead of disk
        assert_eq!(map.id_of(&p("a.md")), Some(DocId::new(1)));

        std::fs::create_dir_all(&store_dir).unwrap();
        map.persist().unwrap();
        let reloaded = IdentityMap::load(store_dir.join(RECORD_FILE)).unwrap();
        assert_eq!(reloaded.id_of(&p("a.md")), Some(DocId::new(1)));
    }

    #[test]
    fn test_doc_id_parse_and_display() {
        let id: DocId = "17".parse().unwrap();
        assert_eq!(id.get(), 17);
        assert_eq!(id.to_string(), "17");
        assert!("-1".parse::<DocId>().is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "17");
    }
}
