use super::{CmdMessage, CmdResult};
use crate::app::AppState;
use crate::error::Result;
use crate::store::TextStore;

pub fn run<S: TextStore + 'static>(app: &AppState<S>, clear: bool) -> Result<CmdResult> {
    let coordinator = app.coordinator();
    let mut result = CmdResult::default();

    if clear {
        coordinator.clear_recent_files()?;
        result.add_message(CmdMessage::success("Recent files cleared"));
        return Ok(result);
    }

    let paths = coordinator.recent_files();
    if paths.is_empty() {
        result.add_message(CmdMessage::info("No recent files"));
    }
    Ok(result.with_paths(paths))
}
