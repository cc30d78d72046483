use super::{document_view, CmdMessage, CmdResult};
use crate::app::AppState;
use crate::error::Result;
use crate::store::TextStore;
use std::path::Path;

pub fn run<S: TextStore + 'static>(app: &AppState<S>, path: &Path) -> Result<CmdResult> {
    let coordinator = app.coordinator();
    coordinator.open(path)?;

    let mut result = CmdResult::default().with_document(document_view(coordinator));
    if coordinator.has_backup(path) {
        result.add_message(CmdMessage::warning(format!(
            "A backup of {} exists. Run `notopad recover {}` to restore it.",
            path.display(),
            path.display()
        )));
    }
    Ok(result)
}
