//! # Storage Layer
//!
//! Raw text persistence is abstracted behind the [`TextStore`] trait so the
//! coordinator never touches `std::fs` directly.
//!
//! ## Implementations
//!
//! - [`fs::FileTextStore`]: production store on the local filesystem
//!   - Reads decode strictly as UTF-8 (invalid bytes are a decode error, not
//!     a lossy conversion)
//!   - Writes are atomic: content goes to a temp file in the target directory
//!     which is then renamed over the destination
//!
//! - [`memory::InMemoryTextStore`]: in-memory store for testing
//!   - No persistence
//!   - Can be told to fail writes, to exercise error paths
//!
//! Stores are shared between the caller's thread and the autosave thread, so
//! implementations must be `Send + Sync` and take `&self`.

use crate::error::Result;
use std::path::Path;

pub mod fs;
pub mod memory;

pub trait TextStore: Send + Sync {
    /// Read the whole file as UTF-8 text.
    fn read_text(&self, path: &Path) -> Result<String>;

    /// Replace the file with `text`. Readers never observe a partial write.
    fn write_text(&self, path: &Path, text: &str) -> Result<()>;

    /// Remove a file. Removing a missing file is not an error.
    fn remove(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
}
