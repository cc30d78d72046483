use super::{CmdMessage, CmdResult};
use crate::app::AppState;
use crate::error::Result;
use crate::store::TextStore;
use std::path::Path;

pub fn run<S: TextStore + 'static>(
    app: &AppState<S>,
    path: &Path,
    out: &Path,
) -> Result<CmdResult> {
    let coordinator = app.coordinator();
    coordinator.open(path)?;
    coordinator.export_pdf(out)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Document exported to {}",
        out.display()
    )));
    Ok(result)
}
