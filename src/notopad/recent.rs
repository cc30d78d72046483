//! Bounded most-recently-opened file history, persisted as a JSON array of
//! path strings (newest first).

use crate::error::{NotopadError, Result};
use crate::store::TextStore;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const MAX_RECENT: usize = 10;
pub const RECENT_FILES_FILENAME: &str = "recent_files.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFiles {
    entries: Vec<PathBuf>,
    cap: usize,
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::with_capacity(MAX_RECENT)
    }
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    /// Build from an existing list, dropping duplicates (first occurrence wins)
    /// and anything past the cap.
    pub fn from_entries(entries: Vec<PathBuf>, cap: usize) -> Self {
        let mut recent = Self::with_capacity(cap);
        for path in entries {
            if !recent.entries.contains(&path) {
                recent.entries.push(path);
            }
        }
        recent.entries.truncate(cap);
        recent
    }

    /// Move `path` to the front, removing any earlier occurrence.
    pub fn push(&mut self, path: PathBuf) {
        self.entries.retain(|p| p != &path);
        self.entries.insert(0, path);
        self.entries.truncate(self.cap);
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn load<S: TextStore + ?Sized>(store: &S, path: &Path) -> Result<Self> {
        if !store.exists(path) {
            return Ok(Self::default());
        }
        let content = store.read_text(path)?;
        let entries: Vec<PathBuf> =
            serde_json::from_str(&content).map_err(NotopadError::Serialization)?;
        Ok(Self::from_entries(entries, MAX_RECENT))
    }

    /// Like [`RecentFiles::load`], but a corrupt or unreadable list is logged and
    /// replaced by an empty one.
    pub fn load_or_default<S: TextStore + ?Sized>(store: &S, path: &Path) -> Self {
        Self::load(store, path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "discarding unreadable recent files list");
            Self::default()
        })
    }

    pub fn save<S: TextStore + ?Sized>(&self, store: &S, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.entries).map_err(NotopadError::Serialization)?;
        store.write_text(path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryTextStore;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn dedups_most_recent_first() {
        let mut recent = RecentFiles::new();
        for name in ["A", "B", "A", "C"] {
            recent.push(PathBuf::from(name));
        }
        assert_eq!(recent.entries(), paths(&["C", "A", "B"]).as_slice());
    }

    #[test]
    fn respects_cap() {
        let mut recent = RecentFiles::with_capacity(3);
        for name in ["A", "B", "C", "D", "E"] {
            recent.push(PathBuf::from(name));
        }
        assert_eq!(recent.entries(), paths(&["E", "D", "C"]).as_slice());
    }

    #[test]
    fn default_cap_is_ten() {
        let mut recent = RecentFiles::new();
        for i in 0..15 {
            recent.push(PathBuf::from(format!("/f{}", i)));
        }
        assert_eq!(recent.len(), MAX_RECENT);
        assert_eq!(recent.entries()[0], PathBuf::from("/f14"));
    }

    #[test]
    fn from_entries_cleans_up_loaded_lists() {
        let recent = RecentFiles::from_entries(paths(&["A", "B", "A", "C", "D"]), 3);
        assert_eq!(recent.entries(), paths(&["A", "B", "C"]).as_slice());
    }

    #[test]
    fn save_and_load() {
        let store = InMemoryTextStore::new();
        let file = Path::new("/data/recent_files.json");
        let mut recent = RecentFiles::new();
        recent.push(PathBuf::from("/a.txt"));
        recent.push(PathBuf::from("/b.txt"));
        recent.save(&store, file).unwrap();

        let raw: Vec<String> = serde_json::from_str(&store.get(file).unwrap()).unwrap();
        assert_eq!(raw, vec!["/b.txt".to_string(), "/a.txt".to_string()]);

        let loaded = RecentFiles::load(&store, file).unwrap();
        assert_eq!(loaded, recent);
    }

    #[test]
    fn load_missing_is_empty() {
        let store = InMemoryTextStore::new();
        let loaded = RecentFiles::load(&store, Path::new("/nope.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_list_falls_back_to_empty() {
        let store = InMemoryTextStore::new();
        store.insert("/recent.json", "{not json");
        assert!(RecentFiles::load(&store, Path::new("/recent.json")).is_err());
        assert!(RecentFiles::load_or_default(&store, Path::new("/recent.json")).is_empty());
    }
}
