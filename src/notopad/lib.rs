//! # Notopad Architecture
//!
//! Notopad is a **UI-agnostic text editor core**. The interesting part is the
//! document/autosave coordinator: it owns the buffer, tracks whether it has
//! unsaved changes, writes periodic backups from a background timer, and keeps
//! the recent-files list, all while a UI thread keeps editing.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (main.rs, or any GUI)                                │
//! │  - Dispatches user actions, renders title/status/messages   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API + Commands (api.rs, commands/)                         │
//! │  - One function per user-facing action                      │
//! │  - Returns structured CmdResult values                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  AppState + Coordinator (app.rs, coordinator.rs)            │
//! │  - Settings, theme, font, autosave timer                    │
//! │  - Document, dirty flag, backups, recent files              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (store/, recent.rs, pdf.rs, config.rs)         │
//! │  - TextStore trait: FileTextStore, InMemoryTextStore        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Saves and backups
//!
//! An explicit save writes the primary file and clears the dirty flag. The
//! autosave timer only ever writes `<path>.bak`, and never clears the flag: a
//! backup protects against crashes, it does not mean the user's work is saved.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per user-facing action
//! - [`coordinator`]: Document state, saves, backups, recent files
//! - [`autosave`]: The periodic backup timer
//! - [`app`]: Process-wide state (settings, theme, font, timer)
//! - [`store`]: Text persistence abstraction and implementations
//! - [`recent`]: Bounded recent-files list
//! - [`config`]: Settings file
//! - [`pdf`]: PDF export
//! - [`search`]: Find and replace
//! - [`highlight`]: Pattern-based Python highlighting
//! - [`stats`]: Line/word/character counts
//! - [`shell`]: Seams for a UI: file picker, text surface, menu actions
//! - [`model`]: Core data types
//! - [`error`]: Error types

pub mod api;
pub mod app;
pub mod autosave;
pub mod commands;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod highlight;
pub mod init;
pub mod model;
pub mod pdf;
pub mod recent;
pub mod search;
pub mod shell;
pub mod stats;
pub mod store;
