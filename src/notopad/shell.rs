//! Seams between the core and whatever UI drives it.
//!
//! The core never owns a widget. A shell provides a [`FilePicker`] for save
//! dialogs, exposes its text widget as a [`TextSurface`], and routes menu items
//! and shortcuts through [`MenuAction`]s.

use crate::app::AppState;
use crate::coordinator::Coordinator;
use crate::error::Result;
use crate::store::TextStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
    Open,
    Save,
    ExportPdf,
}

/// A file dialog. `None` means the user cancelled.
pub trait FilePicker {
    fn pick(&self, mode: PickMode) -> Option<PathBuf>;
}

impl<F> FilePicker for F
where
    F: Fn(PickMode) -> Option<PathBuf>,
{
    fn pick(&self, mode: PickMode) -> Option<PathBuf> {
        self(mode)
    }
}

pub type ChangeCallback = Box<dyn FnMut(&str) + Send>;

/// An editable text widget.
pub trait TextSurface {
    fn text(&self) -> String;

    /// Replace the widget text and notify change listeners.
    fn set_text(&mut self, text: &str);

    fn on_change(&mut self, callback: ChangeCallback);
}

/// Headless [`TextSurface`]: holds its own text and fans changes out to
/// listeners.
#[derive(Default)]
pub struct BufferSurface {
    text: String,
    listeners: Vec<ChangeCallback>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose edits flow into `coordinator`, starting from its current
    /// content.
    pub fn connected<S: TextStore + 'static>(coordinator: Arc<Coordinator<S>>) -> Self {
        let mut surface = Self {
            text: coordinator.content(),
            listeners: Vec::new(),
        };
        surface.on_change(Box::new(move |text| coordinator.set_content(text)));
        surface
    }

    /// Append at the end, as typing would.
    pub fn type_text(&mut self, text: &str) {
        let mut next = std::mem::take(&mut self.text);
        next.push_str(text);
        self.set_text(&next);
    }
}

impl TextSurface for BufferSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        for listener in &mut self.listeners {
            listener(&self.text);
        }
    }

    fn on_change(&mut self, callback: ChangeCallback) {
        self.listeners.push(callback);
    }
}

/// A menu entry or keyboard shortcut.
pub trait MenuAction<S: TextStore + 'static> {
    fn label(&self) -> &'static str;

    fn shortcut(&self) -> Option<&'static str> {
        None
    }

    /// Run the action, returning a status-bar message.
    fn execute(&self, app: &mut AppState<S>) -> Result<String>;
}

/// The built-in view and file actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardAction {
    NewDocument,
    ToggleTheme,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleWordWrap,
    ToggleLineNumbers,
    ToggleAutoSave,
}

impl StandardAction {
    pub const ALL: [StandardAction; 8] = [
        StandardAction::NewDocument,
        StandardAction::ToggleTheme,
        StandardAction::ZoomIn,
        StandardAction::ZoomOut,
        StandardAction::ResetZoom,
        StandardAction::ToggleWordWrap,
        StandardAction::ToggleLineNumbers,
        StandardAction::ToggleAutoSave,
    ];
}

impl<S: TextStore + 'static> MenuAction<S> for StandardAction {
    fn label(&self) -> &'static str {
        match self {
            StandardAction::NewDocument => "New",
            StandardAction::ToggleTheme => "Toggle Theme",
            StandardAction::ZoomIn => "Zoom In",
            StandardAction::ZoomOut => "Zoom Out",
            StandardAction::ResetZoom => "Reset Zoom",
            StandardAction::ToggleWordWrap => "Word Wrap",
            StandardAction::ToggleLineNumbers => "Line Numbers",
            StandardAction::ToggleAutoSave => "Auto Save",
        }
    }

    fn shortcut(&self) -> Option<&'static str> {
        match self {
            StandardAction::NewDocument => Some("Ctrl+N"),
            StandardAction::ZoomIn => Some("Ctrl++"),
            StandardAction::ZoomOut => Some("Ctrl+-"),
            StandardAction::ResetZoom => Some("Ctrl+0"),
            _ => None,
        }
    }

    fn execute(&self, app: &mut AppState<S>) -> Result<String> {
        let message = match self {
            StandardAction::NewDocument => {
                app.coordinator().new_document();
                "New file created".to_string()
            }
            StandardAction::ToggleTheme => format!("{} theme applied", app.toggle_theme()),
            StandardAction::ZoomIn => format!("Font size {}", app.zoom_in()),
            StandardAction::ZoomOut => format!("Font size {}", app.zoom_out()),
            StandardAction::ResetZoom => format!("Font size {}", app.reset_zoom()),
            StandardAction::ToggleWordWrap => on_off("Word wrap", app.toggle_word_wrap()),
            StandardAction::ToggleLineNumbers => {
                on_off("Line numbers", app.toggle_line_numbers())
            }
            StandardAction::ToggleAutoSave => {
                let enabled = !app.settings().editor.auto_save;
                app.set_auto_save(enabled)?;
                on_off("Auto save", enabled)
            }
        };
        Ok(message)
    }
}

fn on_off(what: &str, enabled: bool) -> String {
    format!("{} {}", what, if enabled { "on" } else { "off" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::model::NotopadPaths;
    use crate::pdf::SimplePdfRenderer;
    use crate::store::memory::InMemoryTextStore;
    use std::sync::Mutex;

    fn app() -> AppState<InMemoryTextStore> {
        let mut settings = Settings::default();
        settings.editor.auto_save = false;
        let paths = NotopadPaths::single("/cfg");
        let coordinator = Arc::new(Coordinator::new(
            Arc::new(InMemoryTextStore::new()),
            Box::new(SimplePdfRenderer::new()),
            paths.clone(),
        ));
        AppState::new(settings, paths, coordinator)
    }

    #[test]
    fn closures_are_file_pickers() {
        let picker = |mode: PickMode| match mode {
            PickMode::Save => Some(PathBuf::from("/x.txt")),
            _ => None,
        };
        assert_eq!(picker.pick(PickMode::Save), Some(PathBuf::from("/x.txt")));
        assert_eq!(picker.pick(PickMode::Open), None);
    }

    #[test]
    fn surface_notifies_listeners() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut surface = BufferSurface::new();
        let sink = Arc::clone(&seen);
        surface.on_change(Box::new(move |text| sink.lock().unwrap().push(text.to_string())));

        surface.type_text("ab");
        surface.type_text("c");
        assert_eq!(surface.text(), "abc");
        assert_eq!(*seen.lock().unwrap(), vec!["ab".to_string(), "abc".to_string()]);
    }

    #[test]
    fn connected_surface_dirties_coordinator() {
        let app = app();
        let coordinator = Arc::clone(app.coordinator());
        let mut surface = BufferSurface::connected(Arc::clone(&coordinator));
        assert!(!coordinator.is_dirty());

        surface.type_text("hello");
        assert!(coordinator.is_dirty());
        assert_eq!(coordinator.content(), "hello");
    }

    #[test]
    fn standard_actions_run_against_app_state() {
        let mut app = app();
        assert_eq!(
            StandardAction::ZoomIn.execute(&mut app).unwrap(),
            "Font size 13"
        );
        assert_eq!(
            StandardAction::ToggleTheme.execute(&mut app).unwrap(),
            "dark theme applied"
        );
        assert_eq!(
            StandardAction::ToggleWordWrap.execute(&mut app).unwrap(),
            "Word wrap off"
        );

        app.coordinator().set_content("text");
        StandardAction::NewDocument.execute(&mut app).unwrap();
        assert_eq!(app.coordinator().content(), "");
    }

    #[test]
    fn every_action_has_a_label() {
        for action in StandardAction::ALL {
            assert!(!MenuAction::<InMemoryTextStore>::label(&action).is_empty());
        }
    }
}
