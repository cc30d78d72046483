use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "NotoPad Pro";
pub const UNTITLED: &str = "Untitled";
pub const BACKUP_EXT: &str = "bak";

/// The single open document.
///
/// A `Document` is only ever touched through the coordinator's lock; it carries
/// no synchronization of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    /// `None` for a new document that has never been saved.
    pub file_path: Option<PathBuf>,
    /// True whenever `content` changed since the last explicit save.
    pub is_dirty: bool,
    pub last_backup: Option<DateTime<Utc>>,
    /// Identifies this buffer among every document the coordinator has held.
    /// Assigned when the document is installed and never reused.
    pub generation: u64,
    /// Bumped on every mutation; lets a save that ran off-lock tell whether the
    /// buffer moved underneath it.
    pub revision: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: PathBuf, content: String) -> Self {
        Self {
            content,
            file_path: Some(path),
            is_dirty: false,
            last_backup: None,
            generation: 0,
            revision: 0,
        }
    }

    /// Record a mutation.
    pub fn touch(&mut self) {
        self.is_dirty = true;
        self.revision = self.revision.wrapping_add(1);
    }

    /// `(generation, revision)`: equal stamps mean the same buffer with no
    /// edits in between.
    pub fn stamp(&self) -> (u64, u64) {
        (self.generation, self.revision)
    }

    /// Base name of the file, or `Untitled`.
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn title_bar_text(&self) -> String {
        let marker = if self.is_dirty { " *" } else { "" };
        format!("{} - {}{}", APP_NAME, self.display_name(), marker)
    }

    /// Where the periodic backup of this document goes: `<path>.bak` next to the
    /// file, or `untitled.bak` inside `fallback_dir` for an unsaved document.
    pub fn backup_path(&self, fallback_dir: &Path) -> PathBuf {
        match &self.file_path {
            Some(path) => backup_path_for(path),
            None => fallback_dir.join(format!("untitled.{}", BACKUP_EXT)),
        }
    }
}

/// Appends `.bak` to the full file name (`notes.txt` -> `notes.txt.bak`).
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(BACKUP_EXT);
    PathBuf::from(name)
}

/// Where the application keeps its own files.
#[derive(Debug, Clone)]
pub struct NotopadPaths {
    /// Holds `notopad.toml`.
    pub config_dir: PathBuf,
    /// Holds `recent_files.json` and the backup of untitled documents.
    pub data_dir: PathBuf,
}

impl NotopadPaths {
    pub fn single(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            config_dir: dir.clone(),
            data_dir: dir,
        }
    }

    pub fn recent_files(&self) -> PathBuf {
        self.data_dir.join(crate::recent::RECENT_FILES_FILENAME)
    }
}

/// Result of an explicit save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// The file picker was dismissed; nothing was written.
    Cancelled,
}

/// What a single autosave tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Buffer was clean, nothing written.
    Clean,
    BackedUp(PathBuf),
    /// The write failed; the failure was logged and swallowed.
    Failed(PathBuf),
}
