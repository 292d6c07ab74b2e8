use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageKey};
use crate::error::AppResult;

/// File-backed key/value store: one `<key>.json` file per key
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a crash mid-write leaves the previous value in place.
///
/// All I/O is blocking. Async callers should run writes on the blocking pool.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        tracing::info!(dir = %dir.display(), "Opened file storage");
        Ok(Self { dir })
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: StorageKey) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    path = %path.display(),
                    error = %e,
                    "Failed to read stored value, treating as absent"
                );
                None
            }
        }
    }

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp file");
            }
            return Err(e.into());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
