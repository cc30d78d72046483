//! Process-wide application state.
//!
//! Everything the editor needs for its lifetime lives in one [`AppState`],
//! built at startup (see `init`) and handed by reference to the shell.

use crate::autosave::AutosaveTimer;
use crate::config::{
    clamp_font_size, Settings, Theme, DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE,
};
use crate::coordinator::Coordinator;
use crate::error::{NotopadError, Result};
use crate::model::NotopadPaths;
use crate::store::TextStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Colors applied to the text area and window chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub cursor: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                background: "white",
                foreground: "black",
                cursor: "black",
            },
            Theme::Dark => Palette {
                background: "#2b2b2b",
                foreground: "#ffffff",
                cursor: "white",
            },
        }
    }
}

pub struct AppState<S: TextStore + 'static> {
    settings: Settings,
    /// Set by every preference change; only dirty settings are written back.
    settings_dirty: bool,
    /// Why the settings file could not be read, if it could not. Such a file is
    /// never overwritten.
    settings_error: Option<String>,
    paths: NotopadPaths,
    coordinator: Arc<Coordinator<S>>,
    autosave: Option<AutosaveTimer>,
}

impl<S: TextStore + 'static> AppState<S> {
    pub fn new(settings: Settings, paths: NotopadPaths, coordinator: Arc<Coordinator<S>>) -> Self {
        Self {
            settings,
            settings_dirty: false,
            settings_error: None,
            paths,
            coordinator,
            autosave: None,
        }
    }

    /// Running on defaults because the settings file exists but is broken.
    pub fn with_unreadable_settings(mut self, error: &NotopadError) -> Self {
        self.settings_error = Some(error.to_string());
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        self.settings_dirty = true;
        &mut self.settings
    }

    pub fn settings_dirty(&self) -> bool {
        self.settings_dirty
    }

    /// Set a dotted key (`editor.font_size`), returning the value as stored.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<String> {
        self.settings.set(key, value)?;
        self.settings_dirty = true;
        self.settings.get(key)
    }

    pub fn paths(&self) -> &NotopadPaths {
        &self.paths
    }

    pub fn coordinator(&self) -> &Arc<Coordinator<S>> {
        &self.coordinator
    }

    // --- Autosave ---

    /// Start the backup timer if autosave is enabled and it is not running yet.
    pub fn start_autosave(&mut self) -> Result<()> {
        if !self.settings.editor.auto_save || self.autosave.is_some() {
            return Ok(());
        }
        let interval = Duration::from_secs(self.settings.editor.autosave_interval_secs);
        self.autosave = Some(AutosaveTimer::start(
            Arc::clone(&self.coordinator),
            interval,
        )?);
        Ok(())
    }

    pub fn stop_autosave(&mut self) {
        if let Some(timer) = self.autosave.take() {
            timer.stop();
        }
    }

    pub fn autosave_running(&self) -> bool {
        self.autosave.is_some()
    }

    pub fn set_auto_save(&mut self, enabled: bool) -> Result<()> {
        self.settings.editor.auto_save = enabled;
        self.settings_dirty = true;
        if enabled {
            self.start_autosave()
        } else {
            self.stop_autosave();
            Ok(())
        }
    }

    // --- View ---

    /// Switch between light and dark, returning the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.editor.theme = self.settings.editor.theme.toggled();
        self.settings_dirty = true;
        self.settings.editor.theme
    }

    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.settings.editor.theme)
    }

    pub fn zoom_in(&mut self) -> u16 {
        let size = self.settings.editor.font_size;
        if size < MAX_FONT_SIZE {
            self.settings.editor.font_size = size + 1;
            self.settings_dirty = true;
        }
        self.settings.editor.font_size
    }

    pub fn zoom_out(&mut self) -> u16 {
        let size = self.settings.editor.font_size;
        if size > MIN_FONT_SIZE {
            self.settings.editor.font_size = size - 1;
            self.settings_dirty = true;
        }
        self.settings.editor.font_size
    }

    pub fn reset_zoom(&mut self) -> u16 {
        self.settings.editor.font_size = DEFAULT_FONT_SIZE;
        self.settings_dirty = true;
        DEFAULT_FONT_SIZE
    }

    pub fn set_font(&mut self, name: &str, size: u16) {
        self.settings.editor.font_name = name.to_string();
        self.settings.editor.font_size = clamp_font_size(size);
        self.settings_dirty = true;
    }

    pub fn toggle_word_wrap(&mut self) -> bool {
        self.settings.editor.word_wrap = !self.settings.editor.word_wrap;
        self.settings_dirty = true;
        self.settings.editor.word_wrap
    }

    pub fn toggle_line_numbers(&mut self) -> bool {
        self.settings.editor.line_numbers = !self.settings.editor.line_numbers;
        self.settings_dirty = true;
        self.settings.editor.line_numbers
    }

    // --- Persistence ---

    /// Write the settings file. Refuses to replace a file that failed to load.
    pub fn persist_settings(&mut self) -> Result<()> {
        if let Some(reason) = &self.settings_error {
            return Err(NotopadError::Config(format!(
                "Not overwriting unreadable settings file ({}); fix or remove it first",
                reason
            )));
        }
        self.settings.save(&self.paths.config_dir)?;
        self.settings_dirty = false;
        debug!(dir = %self.paths.config_dir.display(), "settings saved");
        Ok(())
    }

    /// Orderly exit: stop the timer, then save settings if any preference
    /// changed. Backups are left in place; only an explicit save makes them
    /// obsolete.
    pub fn shutdown(&mut self) {
        self.stop_autosave();
        if !self.settings_dirty {
            return;
        }
        if let Err(e) = self.persist_settings() {
            warn!(error = %e, "could not save settings on exit");
        }
    }
}
