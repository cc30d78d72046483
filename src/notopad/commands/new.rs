use super::{document_view, CmdMessage, CmdResult};
use crate::app::AppState;
use crate::error::{NotopadError, Result};
use crate::store::TextStore;
use std::path::Path;

/// Start a fresh document and save it straight away under `path`.
pub fn run<S: TextStore + 'static>(app: &AppState<S>, path: &Path) -> Result<CmdResult> {
    let coordinator = app.coordinator();
    if coordinator.store().exists(path) {
        return Err(NotopadError::Api(format!(
            "{} already exists",
            path.display()
        )));
    }

    coordinator.new_document();
    coordinator.save_as(path)?;

    let mut result = CmdResult::default().with_document(document_view(coordinator));
    result.add_message(CmdMessage::success(format!("Created {}", path.display())));
    Ok(result)
}
