use super::{CmdMessage, CmdResult};
use crate::app::AppState;
use crate::error::Result;
use crate::highlight::is_highlightable;
use crate::store::TextStore;
use std::path::Path;

pub fn run<S: TextStore + 'static>(app: &AppState<S>, path: &Path) -> Result<CmdResult> {
    let coordinator = app.coordinator();
    coordinator.open(path)?;

    let mut result = CmdResult::default();
    if !is_highlightable(Some(path)) {
        result.add_message(CmdMessage::info(
            "Syntax highlighting is only available for Python files",
        ));
    }
    Ok(result
        .with_tokens(coordinator.highlight())
        .with_content(coordinator.content()))
}
