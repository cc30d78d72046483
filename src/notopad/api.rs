//! # API Facade
//!
//! A thin facade over the command layer, and the single entry point for any UI
//! driving notopad. It dispatches to `commands/*.rs` and returns structured
//! [`CmdResult`]s; it never prints, never exits, and holds no business logic.
//!
//! `NotopadApi<S: TextStore>` is generic over the storage backend:
//! - Production: `NotopadApi<FileTextStore>`
//! - Testing: `NotopadApi<InMemoryTextStore>`

use crate::app::AppState;
use crate::commands;
use crate::error::Result;
use crate::search::SearchOptions;
use crate::store::TextStore;
use std::path::Path;

pub struct NotopadApi<S: TextStore + 'static> {
    app: AppState<S>,
}

impl<S: TextStore + 'static> NotopadApi<S> {
    pub fn new(app: AppState<S>) -> Self {
        Self { app }
    }

    pub fn open(&self, path: &Path) -> Result<commands::CmdResult> {
        commands::open::run(&self.app, path)
    }

    pub fn new_file(&self, path: &Path) -> Result<commands::CmdResult> {
        commands::new::run(&self.app, path)
    }

    pub fn find(
        &self,
        path: &Path,
        query: &str,
        opts: SearchOptions,
    ) -> Result<commands::CmdResult> {
        commands::find::run(&self.app, path, query, opts)
    }

    pub fn replace(
        &self,
        path: &Path,
        query: &str,
        replacement: &str,
        opts: SearchOptions,
    ) -> Result<commands::CmdResult> {
        commands::replace::run(&self.app, path, query, replacement, opts)
    }

    pub fn export_pdf(&self, path: &Path, out: &Path) -> Result<commands::CmdResult> {
        commands::export::run(&self.app, path, out)
    }

    pub fn highlight(&self, path: &Path) -> Result<commands::CmdResult> {
        commands::highlight::run(&self.app, path)
    }

    pub fn recent(&self, clear: bool) -> Result<commands::CmdResult> {
        commands::recent::run(&self.app, clear)
    }

    pub fn recover(&self, path: &Path) -> Result<commands::CmdResult> {
        commands::recover::run(&self.app, path)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&mut self.app, action)
    }

    pub fn app(&self) -> &AppState<S> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut AppState<S> {
        &mut self.app
    }

    /// Stop background work and persist settings.
    pub fn shutdown(&mut self) {
        self.app.shutdown();
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, DocumentView, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::app_with;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn dispatches_to_commands() {
        let fixture = StoreFixture::new().with_file("/a.txt", "hello world");
        let api = NotopadApi::new(app_with(fixture.store.clone()));

        let opened = api.open(Path::new("/a.txt")).unwrap();
        assert_eq!(opened.document.unwrap().stats.words, 2);

        let found = api
            .find(Path::new("/a.txt"), "world", SearchOptions::default())
            .unwrap();
        assert_eq!(found.matches.len(), 1);

        let recent = api.recent(false).unwrap();
        assert_eq!(recent.paths.len(), 1);
    }
}
