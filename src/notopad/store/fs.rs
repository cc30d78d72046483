use super::TextStore;
use crate::error::{NotopadError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Filesystem-backed store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTextStore;

impl FileTextStore {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(NotopadError::Io)?;
            }
        }
        Ok(())
    }
}

impl TextStore for FileTextStore {
    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(NotopadError::Io)?;
        String::from_utf8(bytes).map_err(|_| NotopadError::Decode {
            path: path.to_path_buf(),
        })
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<()> {
        self.ensure_parent(path)?;

        // The temp file must live on the same filesystem as the target for the
        // rename to be atomic.
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(NotopadError::Io)?;
        tmp.write_all(text.as_bytes()).map_err(NotopadError::Io)?;
        // The rename replaces the inode, so carry the target's mode over.
        if let Ok(metadata) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(NotopadError::Io)?;
        }
        tmp.as_file().sync_all().map_err(NotopadError::Io)?;
        tmp.persist(path).map_err(|e| NotopadError::Io(e.error))?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NotopadError::Io(e)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let store = FileTextStore::new();

        store.write_text(&path, "hello\nworld").unwrap();
        assert_eq!(store.read_text(&path).unwrap(), "hello\nworld");
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.sh");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        FileTextStore::new()
            .write_text(&path, "#!/bin/sh\necho hi\n")
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/sh\necho hi\n");
    }

    #[test]
    fn write_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/a.txt");
        FileTextStore::new().write_text(&path, "x").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn write_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let store = FileTextStore::new();
        store.write_text(&path, "one").unwrap();
        store.write_text(&path, "two").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn read_invalid_utf8_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let err = FileTextStore::new().read_text(&path).unwrap_err();
        assert!(matches!(err, NotopadError::Decode { .. }));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileTextStore::new()
            .read_text(&dir.path().join("missing.txt"))
            .unwrap_err();
        assert!(matches!(err, NotopadError::Io(_)));
    }

    #[test]
    fn remove_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        FileTextStore::new()
            .remove(&dir.path().join("missing.txt"))
            .unwrap();
    }
}
