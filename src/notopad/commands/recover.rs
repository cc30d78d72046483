use super::{document_view, no_dialog, CmdMessage, CmdResult};
use crate::app::AppState;
use crate::error::{NotopadError, Result};
use crate::model::backup_path_for;
use crate::store::TextStore;
use std::path::Path;

/// Restore `<path>.bak` over `path` and remove the backup.
pub fn run<S: TextStore + 'static>(app: &AppState<S>, path: &Path) -> Result<CmdResult> {
    let coordinator = app.coordinator();
    if !coordinator.has_backup(path) {
        return Err(NotopadError::Api(format!(
            "No backup found at {}",
            backup_path_for(path).display()
        )));
    }

    coordinator.recover_from_backup(path)?;
    coordinator.save(&no_dialog)?;
    coordinator.discard_backup();

    let mut result = CmdResult::default().with_document(document_view(coordinator));
    result.add_message(CmdMessage::success(format!(
        "Recovered {} from backup",
        path.display()
    )));
    Ok(result)
}
