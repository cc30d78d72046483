use super::TextStore;
use crate::error::{NotopadError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryTextStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryTextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file with raw bytes, bypassing the write counter.
    pub fn insert_bytes(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.lock().insert(path.into(), bytes.into());
    }

    pub fn insert(&self, path: impl Into<PathBuf>, text: &str) {
        self.insert_bytes(path, text.as_bytes().to_vec());
    }

    /// Raw contents, if the file exists.
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Make every subsequent write fail with a permission error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl TextStore for InMemoryTextStore {
    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = self.files.lock().get(path).cloned().ok_or_else(|| {
            NotopadError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })?;
        String::from_utf8(bytes).map_err(|_| NotopadError::Decode {
            path: path.to_path_buf(),
        })
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(NotopadError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes disabled",
            )));
        }
        self.files
            .lock()
            .insert(path.to_path_buf(), text.as_bytes().to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.files.lock().remove(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use std::sync::Arc;

    pub struct StoreFixture {
        pub store: Arc<InMemoryTextStore>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: Arc::new(InMemoryTextStore::new()),
            }
        }

        pub fn with_file(self, path: impl Into<PathBuf>, text: &str) -> Self {
            self.store.insert(path, text);
            self
        }
    }
}
