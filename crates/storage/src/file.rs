//! File-backed medium: one JSON document per key under a directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::medium::StorageMedium;

const EXTENSION: &str = "json";

/// Directory-backed medium.
///
/// The directory is created lazily on the first write. Writes go to a temporary
/// file that is renamed over the target, so a crash never leaves a half-written
/// document behind.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

impl StorageMedium for FileMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!("storefront-{name}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn round_trips_items_on_disk() {
        let dir = scratch_dir("roundtrip");
        let medium = FileMedium::new(&dir);

        assert_eq!(medium.get_item("cart").unwrap(), None);
        medium.set_item("cart", "[]").unwrap();
        assert_eq!(medium.get_item("cart").unwrap().as_deref(), Some("[]"));
        assert!(dir.join("cart.json").exists());

        medium.remove_item("cart").unwrap();
        medium.remove_item("cart").unwrap();
        assert_eq!(medium.get_item("cart").unwrap(), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn clear_removes_only_documents() {
        let dir = scratch_dir("clear");
        let medium = FileMedium::new(&dir);
        medium.set_item("theme", "\"dark\"").unwrap();
        medium.set_item("products", "[]").unwrap();
        fs::write(dir.join("notes.txt"), "keep me").unwrap();

        medium.clear().unwrap();

        assert_eq!(medium.get_item("theme").unwrap(), None);
        assert_eq!(medium.get_item("products").unwrap(), None);
        assert!(dir.join("notes.txt").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn clear_on_missing_directory_is_a_no_op() {
        let medium = FileMedium::new(scratch_dir("missing"));
        medium.clear().unwrap();
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let medium = FileMedium::new(scratch_dir("keys"));
        assert!(matches!(
            medium.set_item("../evil", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(medium.get_item(""), Err(StorageError::InvalidKey(_))));
    }
}
