use crate::highlight::Token;
use crate::search::Match;
use crate::stats::TextStats;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub mod config;
pub mod export;
pub mod find;
pub mod highlight;
pub mod new;
pub mod open;
pub mod recent;
pub mod recover;
pub mod replace;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Display state of the document after a command ran.
#[derive(Debug, Clone)]
pub struct DocumentView {
    pub title: String,
    pub path: Option<PathBuf>,
    pub stats: TextStats,
    pub last_backup: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub document: Option<DocumentView>,
    pub content: Option<String>,
    pub matches: Vec<Match>,
    pub tokens: Vec<Token>,
    pub paths: Vec<PathBuf>,
    pub config_values: Vec<(String, String)>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_document(mut self, document: DocumentView) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_matches(mut self, matches: Vec<Match>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config_values(mut self, values: Vec<(String, String)>) -> Self {
        self.config_values = values;
        self
    }
}

pub(crate) fn document_view<S: crate::store::TextStore>(
    coordinator: &crate::coordinator::Coordinator<S>,
) -> DocumentView {
    let doc = coordinator.snapshot();
    DocumentView {
        title: doc.title_bar_text(),
        path: doc.file_path.clone(),
        stats: TextStats::of(&doc.content),
        last_backup: doc.last_backup,
    }
}

/// Commands save documents that already have a path, so there is never a
/// dialog to show.
pub(crate) fn no_dialog(_: crate::shell::PickMode) -> Option<PathBuf> {
    None
}
