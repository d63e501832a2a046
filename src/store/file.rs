//! File-backed store: one JSON document per key in a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KeyValueBackend;
use crate::error::{Result, RoomifyError};

const EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Durable backend storing each key as `<root>/<key>.json`.
///
/// Writes go to a temporary sibling file that is renamed over the target,
/// so a failed write never truncates the previous value. An optional quota
/// bounds the total size of all documents in the directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
    quota: Option<usize>,
}

impl FileBackend {
    /// Opens (creating if needed) the directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`RoomifyError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>, quota: Option<usize>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), ?quota, "opened file store");
        Ok(Self { root, quota })
    }

    /// Returns the directory this backend writes into.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(RoomifyError::Storage(format!(
                "key {key:?} is not a valid file name"
            )));
        }
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }

    /// Returns the total size in bytes of all stored documents.
    fn used_bytes(&self) -> Result<usize> {
        let mut total = 0usize;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(EXTENSION) {
                let len = usize::try_from(entry.metadata()?.len()).unwrap_or(usize::MAX);
                total = total.saturating_add(len);
            }
        }
        Ok(total)
    }

    fn file_len(path: &Path) -> Result<usize> {
        match fs::metadata(path) {
            Ok(meta) => Ok(usize::try_from(meta.len()).unwrap_or(usize::MAX)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key)?;
        if let Some(limit) = self.quota {
            let required = self
                .used_bytes()?
                .saturating_sub(Self::file_len(&path)?)
                .saturating_add(value.len());
            if required > limit {
                return Err(RoomifyError::StorageQuotaExceeded {
                    key: key.to_string(),
                    required,
                    limit,
                });
            }
        }

        let tmp = path.with_extension(format!("{EXTENSION}.{TMP_SUFFIX}"));
        let written = fs::write(&tmp, value.as_bytes()).and_then(|()| fs::rename(&tmp, &path));
        if let Err(err) = written {
            // A partial temp file is never read, but it must not linger.
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key)?.is_file())
    }
}
