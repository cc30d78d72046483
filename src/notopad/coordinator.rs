//! # Document/Autosave Coordinator
//!
//! Owns the open [`Document`], its dirty flag and the recent-files list. Every
//! entry point takes the same coarse lock, so the autosave thread and the UI
//! thread never see each other's half-finished mutations.
//!
//! ## Save versus backup
//!
//! - `save`/`save_as` are explicit: they write the primary file and clear the
//!   dirty flag.
//! - `tick` is implicit: it writes `<path>.bak` when the buffer is dirty and
//!   leaves the dirty flag alone. Failures are logged, never returned.
//!
//! Dirty transitions are clean -> dirty on any edit, dirty -> clean on an
//! explicit save only.
//!
//! ## Locking
//!
//! File I/O never happens under the document lock. Writers snapshot the content
//! and the document's stamp under the lock, release it, write, then re-acquire
//! it to publish the result. Every document installed by `open`, `new_document`
//! or a recovery gets a fresh generation, so a write that finishes after the
//! buffer was replaced publishes nothing onto the new one. A save only clears
//! the dirty flag if no edit landed while it was writing.

use crate::error::Result;
use crate::highlight::{self, Token};
use crate::model::{backup_path_for, Document, NotopadPaths, SaveOutcome, TickOutcome};
use crate::pdf::PdfRenderer;
use crate::recent::RecentFiles;
use crate::search::{self, Match, SearchOptions};
use crate::shell::{FilePicker, PickMode};
use crate::stats::TextStats;
use crate::store::TextStore;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Something the autosave timer can drive.
pub trait Autosave: Send + Sync {
    fn tick(&self) -> TickOutcome;
}

pub struct Coordinator<S: TextStore> {
    doc: Mutex<Document>,
    generations: AtomicU64,
    recent: Mutex<RecentFiles>,
    store: Arc<S>,
    pdf: Box<dyn PdfRenderer>,
    paths: NotopadPaths,
}

impl<S: TextStore> Coordinator<S> {
    /// Starts with an empty document and the persisted recent-files list.
    pub fn new(store: Arc<S>, pdf: Box<dyn PdfRenderer>, paths: NotopadPaths) -> Self {
        let recent = RecentFiles::load_or_default(&*store, &paths.recent_files());
        Self {
            doc: Mutex::new(Document::new()),
            generations: AtomicU64::new(0),
            recent: Mutex::new(recent),
            store,
            pdf,
            paths,
        }
    }

    pub fn paths(&self) -> &NotopadPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Document lifecycle ---

    /// Replace the current buffer, giving `doc` a generation no earlier buffer
    /// has had.
    fn install(&self, mut doc: Document) {
        doc.generation = self.generations.fetch_add(1, Ordering::Relaxed) + 1;
        *self.doc.lock() = doc;
    }

    /// Discard the buffer. Prompting about unsaved changes is the caller's job.
    pub fn new_document(&self) {
        self.install(Document::new());
        debug!("new document");
    }

    /// Replace the buffer with the contents of `path`. On failure the current
    /// buffer is left untouched.
    pub fn open(&self, path: &Path) -> Result<()> {
        let content = self.store.read_text(path)?;
        self.install(Document::from_file(path.to_path_buf(), content));
        debug!(path = %path.display(), "opened");
        self.remember(path);
        Ok(())
    }

    /// Write to the current path, or ask `picker` for one if the document has
    /// never been saved.
    pub fn save(&self, picker: &dyn FilePicker) -> Result<SaveOutcome> {
        let current = self.doc.lock().file_path.clone();
        match current {
            Some(path) => {
                self.write_primary(&path, false)?;
                Ok(SaveOutcome::Saved(path))
            }
            None => match picker.pick(PickMode::Save) {
                Some(path) => {
                    self.save_as(&path)?;
                    Ok(SaveOutcome::Saved(path))
                }
                None => Ok(SaveOutcome::Cancelled),
            },
        }
    }

    /// Ask `picker` for a file and open it. `Ok(None)` if the dialog was
    /// dismissed.
    pub fn open_picked(&self, picker: &dyn FilePicker) -> Result<Option<PathBuf>> {
        match picker.pick(PickMode::Open) {
            Some(path) => {
                self.open(&path)?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    pub fn save_as(&self, path: &Path) -> Result<()> {
        self.write_primary(path, true)?;
        self.remember(path);
        Ok(())
    }

    /// Write a snapshot of the buffer to `path`. Afterwards, if the buffer is
    /// still the one that was written, bind it to `path` (when `rebind`) and
    /// clear dirty unless it was edited meanwhile.
    fn write_primary(&self, path: &Path, rebind: bool) -> Result<()> {
        let (content, (generation, revision)) = {
            let doc = self.doc.lock();
            (doc.content.clone(), doc.stamp())
        };

        self.store.write_text(path, &content)?;
        debug!(path = %path.display(), bytes = content.len(), "saved");

        let mut doc = self.doc.lock();
        if doc.generation != generation {
            debug!(path = %path.display(), "document replaced during save");
            return Ok(());
        }
        if rebind {
            doc.file_path = Some(path.to_path_buf());
        }
        if doc.revision == revision {
            doc.is_dirty = false;
        } else {
            debug!(path = %path.display(), "buffer changed during save, staying dirty");
        }
        Ok(())
    }

    fn remember(&self, path: &Path) {
        let mut recent = self.recent.lock();
        recent.push(path.to_path_buf());
        if let Err(e) = recent.save(&*self.store, &self.paths.recent_files()) {
            warn!(error = %e, "could not persist recent files list");
        }
    }

    // --- Mutation ---

    /// Flag the buffer as modified. Idempotent.
    pub fn mark_dirty(&self) {
        self.doc.lock().touch();
    }

    /// Hook for the UI shell: the widget content changed.
    pub fn on_content_changed(&self) {
        self.mark_dirty();
    }

    pub fn set_content(&self, text: impl Into<String>) {
        let mut doc = self.doc.lock();
        doc.content = text.into();
        doc.touch();
    }

    /// Mutate the buffer in place under the lock.
    pub fn edit<R>(&self, f: impl FnOnce(&mut String) -> R) -> R {
        let mut doc = self.doc.lock();
        let out = f(&mut doc.content);
        doc.touch();
        out
    }

    /// Replace every occurrence in the buffer. The buffer is only marked dirty
    /// when something was actually replaced.
    pub fn replace_all(
        &self,
        query: &str,
        replacement: &str,
        opts: SearchOptions,
    ) -> Result<usize> {
        let mut doc = self.doc.lock();
        let (replaced, count) = search::replace_all(&doc.content, query, replacement, opts)?;
        if count > 0 {
            doc.content = replaced;
            doc.touch();
        }
        Ok(count)
    }

    /// Replace the first match at or after `from`, returning where it was.
    pub fn replace_next(
        &self,
        query: &str,
        replacement: &str,
        from: usize,
        opts: SearchOptions,
    ) -> Result<Option<Match>> {
        let mut doc = self.doc.lock();
        let found = search::find_next(&doc.content, query, from, opts)?;
        if let Some(m) = &found {
            doc.content = search::replace_match(&doc.content, m, replacement);
            doc.touch();
        }
        Ok(found)
    }

    pub fn find_next(
        &self,
        query: &str,
        from: usize,
        opts: SearchOptions,
    ) -> Result<Option<Match>> {
        search::find_next(&self.doc.lock().content, query, from, opts)
    }

    pub fn find_all(&self, query: &str, opts: SearchOptions) -> Result<Vec<Match>> {
        search::find_all(&self.doc.lock().content, query, opts)
    }

    // --- Export ---

    /// Render the current text to PDF. Does not touch the dirty flag or path.
    pub fn export_pdf(&self, path: &Path) -> Result<()> {
        let content = self.content();
        self.pdf.render(&content, path)?;
        debug!(path = %path.display(), "exported pdf");
        Ok(())
    }

    /// Ask `picker` where to export. `Ok(None)` if the dialog was dismissed.
    pub fn export_pdf_picked(&self, picker: &dyn FilePicker) -> Result<Option<PathBuf>> {
        match picker.pick(PickMode::ExportPdf) {
            Some(path) => {
                self.export_pdf(&path)?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    // --- Backups ---

    pub fn backup_path(&self) -> PathBuf {
        self.doc.lock().backup_path(&self.paths.data_dir)
    }

    /// Write a backup if the buffer is dirty. Never fails: write errors are
    /// logged and reported through the returned outcome only.
    pub fn tick(&self) -> TickOutcome {
        let (content, backup, generation) = {
            let doc = self.doc.lock();
            if !doc.is_dirty {
                return TickOutcome::Clean;
            }
            (
                doc.content.clone(),
                doc.backup_path(&self.paths.data_dir),
                doc.generation,
            )
        };

        match self.store.write_text(&backup, &content) {
            Ok(()) => {
                let mut doc = self.doc.lock();
                if doc.generation == generation {
                    doc.last_backup = Some(Utc::now());
                }
                debug!(path = %backup.display(), bytes = content.len(), "backup written");
                TickOutcome::BackedUp(backup)
            }
            Err(e) => {
                warn!(path = %backup.display(), error = %e, "backup failed");
                TickOutcome::Failed(backup)
            }
        }
    }

    pub fn has_backup(&self, path: &Path) -> bool {
        self.store.exists(&backup_path_for(path))
    }

    /// Load `<path>.bak` as the buffer for `path`. The result is dirty so the
    /// user has to save explicitly to make the recovery stick.
    pub fn recover_from_backup(&self, path: &Path) -> Result<()> {
        let content = self.store.read_text(&backup_path_for(path))?;
        let mut doc = Document::from_file(path.to_path_buf(), content);
        doc.touch();
        self.install(doc);
        debug!(path = %path.display(), "recovered from backup");
        Ok(())
    }

    /// Best-effort removal of the current document's backup once an explicit
    /// save has made it obsolete.
    pub fn discard_backup(&self) {
        let backup = self.backup_path();
        if let Err(e) = self.store.remove(&backup) {
            warn!(path = %backup.display(), error = %e, "could not remove backup");
        }
    }

    // --- Display state ---

    pub fn content(&self) -> String {
        self.doc.lock().content.clone()
    }

    pub fn snapshot(&self) -> Document {
        self.doc.lock().clone()
    }

    pub fn file_path(&self) -> Option<PathBuf> {
        self.doc.lock().file_path.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.doc.lock().is_dirty
    }

    pub fn last_backup(&self) -> Option<DateTime<Utc>> {
        self.doc.lock().last_backup
    }

    pub fn title_bar_text(&self) -> String {
        self.doc.lock().title_bar_text()
    }

    pub fn status(&self) -> TextStats {
        TextStats::of(&self.doc.lock().content)
    }

    pub fn highlight(&self) -> Vec<Token> {
        let doc = self.doc.lock();
        highlight::highlight_for(doc.file_path.as_deref(), &doc.content)
    }

    pub fn recent_files(&self) -> Vec<PathBuf> {
        self.recent.lock().entries().to_vec()
    }

    pub fn clear_recent_files(&self) -> Result<()> {
        let mut recent = self.recent.lock();
        recent.clear();
        recent.save(&*self.store, &self.paths.recent_files())
    }
}

impl<S: TextStore> Autosave for Coordinator<S> {
    fn tick(&self) -> TickOutcome {
        Coordinator::tick(self)
    }
}
