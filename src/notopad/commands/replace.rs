use super::{document_view, no_dialog, CmdMessage, CmdResult};
use crate::app::AppState;
use crate::error::Result;
use crate::search::SearchOptions;
use crate::store::TextStore;
use std::path::Path;

/// Replace every occurrence in the file and save it if anything changed.
pub fn run<S: TextStore + 'static>(
    app: &AppState<S>,
    path: &Path,
    query: &str,
    replacement: &str,
    opts: SearchOptions,
) -> Result<CmdResult> {
    let coordinator = app.coordinator();
    coordinator.open(path)?;
    let count = coordinator.replace_all(query, replacement, opts)?;

    let mut result = CmdResult::default();
    if count > 0 {
        coordinator.save(&no_dialog)?;
        coordinator.discard_backup();
        result.add_message(CmdMessage::success(format!(
            "Replaced {} occurrence{}",
            count,
            if count == 1 { "" } else { "s" }
        )));
    } else {
        result.add_message(CmdMessage::info("Text not found"));
    }
    Ok(result.with_document(document_view(coordinator)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::app_with;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn replaces_and_saves() {
        let fixture = StoreFixture::new().with_file("/a.txt", "red fish, Red fish");
        let app = app_with(fixture.store.clone());

        let result = run(
            &app,
            Path::new("/a.txt"),
            "red",
            "blue",
            SearchOptions::default(),
        )
        .unwrap();

        assert_eq!(fixture.store.get(Path::new("/a.txt")).unwrap(), "blue fish, blue fish");
        assert_eq!(result.messages[0].content, "Replaced 2 occurrences");
        assert!(!app.coordinator().is_dirty());
    }

    #[test]
    fn no_match_does_not_write() {
        let fixture = StoreFixture::new().with_file("/a.txt", "red fish");
        let app = app_with(fixture.store.clone());
        let writes_before = fixture.store.write_count();

        let result = run(
            &app,
            Path::new("/a.txt"),
            "green",
            "blue",
            SearchOptions::default(),
        )
        .unwrap();

        assert_eq!(result.messages[0].content, "Text not found");
        // Only the recent files list was written by the open.
        assert_eq!(fixture.store.write_count(), writes_before + 1);
        assert_eq!(fixture.store.get(Path::new("/a.txt")).unwrap(), "red fish");
    }
}
