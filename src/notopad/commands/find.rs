use super::{document_view, CmdMessage, CmdResult};
use crate::app::AppState;
use crate::error::Result;
use crate::search::SearchOptions;
use crate::store::TextStore;
use std::path::Path;

pub fn run<S: TextStore + 'static>(
    app: &AppState<S>,
    path: &Path,
    query: &str,
    opts: SearchOptions,
) -> Result<CmdResult> {
    let coordinator = app.coordinator();
    coordinator.open(path)?;
    let matches = coordinator.find_all(query, opts)?;

    let mut result = CmdResult::default().with_document(document_view(coordinator));
    if matches.is_empty() {
        result.add_message(CmdMessage::info("Text not found"));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} match{}",
            matches.len(),
            if matches.len() == 1 { "" } else { "es" }
        )));
    }
    Ok(result.with_content(coordinator.content()).with_matches(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::app_with;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_matches_with_positions() {
        let fixture = StoreFixture::new().with_file("/a.txt", "Foo\nbar foo");
        let app = app_with(fixture.store.clone());

        let result = run(&app, Path::new("/a.txt"), "foo", SearchOptions::default()).unwrap();
        let positions: Vec<_> = result.matches.iter().map(|m| (m.line, m.column)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 5)]);
        assert_eq!(result.messages[0].content, "2 matches");
    }

    #[test]
    fn reports_not_found() {
        let fixture = StoreFixture::new().with_file("/a.txt", "nothing here");
        let app = app_with(fixture.store.clone());
        let opts = SearchOptions {
            match_case: true,
            whole_word: true,
        };

        let result = run(&app, Path::new("/a.txt"), "Here", opts).unwrap();
        assert!(result.matches.is_empty());
        assert_eq!(result.messages[0].content, "Text not found");
    }
}
