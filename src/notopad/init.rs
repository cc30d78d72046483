use crate::app::AppState;
use crate::config::Settings;
use crate::coordinator::Coordinator;
use crate::error::{NotopadError, Result};
use crate::model::NotopadPaths;
use crate::pdf::SimplePdfRenderer;
use crate::store::fs::FileTextStore;
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Overrides both the config and data directories. Mostly for tests.
pub const HOME_ENV: &str = "NOTOPAD_HOME";

/// Resolve where settings, the recent-files list and untitled backups live.
pub fn resolve_paths() -> Result<NotopadPaths> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(NotopadPaths::single(PathBuf::from(home)));
    }

    let proj_dirs = ProjectDirs::from("com", "notopad", "notopad").ok_or_else(|| {
        NotopadError::Config("Could not determine a home directory".to_string())
    })?;
    Ok(NotopadPaths {
        config_dir: proj_dirs.config_dir().to_path_buf(),
        data_dir: proj_dirs.data_dir().to_path_buf(),
    })
}

/// Build the application state for a normal run: filesystem store, PDF
/// renderer, persisted settings and recent files.
pub fn initialize() -> Result<AppState<FileTextStore>> {
    let paths = resolve_paths()?;
    Ok(initialize_with(paths))
}

/// A malformed settings file is not fatal: the app runs on defaults and leaves
/// the file alone.
pub fn initialize_with(paths: NotopadPaths) -> AppState<FileTextStore> {
    let loaded = Settings::load(&paths.config_dir);
    let coordinator = Arc::new(Coordinator::new(
        Arc::new(FileTextStore::new()),
        Box::new(SimplePdfRenderer::new()),
        paths.clone(),
    ));
    match loaded {
        Ok(settings) => AppState::new(settings, paths, coordinator),
        Err(e) => {
            warn!(
                dir = %paths.config_dir.display(),
                error = %e,
                "falling back to default settings"
            );
            AppState::new(Settings::default(), paths, coordinator).with_unreadable_settings(&e)
        }
    }
}
