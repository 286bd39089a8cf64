//! File-backed key-value store.
//!
//! Each key maps to `<data_dir>/<key>.json`. Writes go to a temporary file in the
//! same directory and are renamed into place, so a crash never leaves a torn
//! snapshot behind. The data directory is created owner-only and locked
//! exclusively for as long as the store is open, which makes this process the
//! sole writer of every key in it.

use super::KeyValueStore;
use crate::constants::{LOCK_FILE_NAME, STORAGE_FILE_EXTENSION};
use crate::errors::{AppError, AppResult, StorageError};
use async_trait::async_trait;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Key-value store keeping one file per key in a locked directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    lock_file: File,
}

impl FileStore {
    /// Opens (creating if needed) the data directory and locks it.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `AppError::Journal` if `dir` is not an absolute path
    /// - `AppError::Io` if the directory cannot be created
    /// - `StorageError::Locked` if another process holds the directory
    /// - `StorageError::LockFailed` if the lock file cannot be opened or locked
    pub fn open(dir: &Path) -> AppResult<Self> {
        ensure_data_directory_exists(dir)?;

        let lock_path = dir.join(LOCK_FILE_NAME);
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| StorageError::LockFailed {
                path: lock_path.clone(),
                source,
            })?;

        lock_file.try_lock_exclusive().map_err(|source| {
            if source.kind() == fs2::lock_contended_error().kind() {
                StorageError::Locked {
                    path: lock_path.clone(),
                }
            } else {
                StorageError::LockFailed {
                    path: lock_path.clone(),
                    source,
                }
            }
        })?;

        debug!("Opened data directory {:?}", dir);
        Ok(Self {
            dir: dir.to_path_buf(),
            lock_file,
        })
    }

    /// Like [`FileStore::open`], but runs the directory setup and locking on
    /// the blocking thread pool.
    pub async fn open_async(dir: PathBuf) -> AppResult<Self> {
        tokio::task::spawn_blocking(move || Self::open(&dir))
            .await
            .map_err(|e| AppError::Io(io::Error::other(e)))?
    }

    /// Path of the file holding `key`.
    ///
    /// Keys are restricted to ASCII letters, digits, `_` and `-` so they can never
    /// escape the data directory.
    pub fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if !valid {
            return Err(AppError::Journal(format!("Invalid storage key: {:?}", key)));
        }

        Ok(self
            .dir
            .join(format!("{}.{}", key, STORAGE_FILE_EXTENSION)))
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.lock_file) {
            warn!("Failed to release data directory lock: {}", e);
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }
            .into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let path = self.path_for(key)?;
        let dir = self.dir.clone();

        let written = tokio::task::spawn_blocking(move || write_atomically(&dir, &path, &value))
            .await
            .map_err(io::Error::other)
            .and_then(|result| result);

        written.map_err(|source| {
            StorageError::Write {
                key: key.to_string(),
                source,
            }
            .into()
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Delete {
                key: key.to_string(),
                source,
            }
            .into()),
        }
    }
}

/// Writes `value` to a temp file next to `path`, then renames it over `path`.
fn write_atomically(dir: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(value.as_bytes())?;
    temp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use crate::constants::DEFAULT_FILE_PERMISSIONS;
        fs::set_permissions(
            temp.path(),
            fs::Permissions::from_mode(DEFAULT_FILE_PERMISSIONS),
        )?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Ensures the data directory exists, creating it owner-only if necessary.
///
/// # Errors
///
/// Returns:
/// - `AppError::Journal` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails
pub fn ensure_data_directory_exists(dir: &Path) -> AppResult<()> {
    if !dir.is_absolute() {
        return Err(AppError::Journal(format!(
            "Data directory path must be absolute: {}",
            dir.display()
        )));
    }

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            use crate::constants::DEFAULT_DIR_PERMISSIONS;
            fs::set_permissions(dir, fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS)).map_err(
                |e| {
                    AppError::Io(io::Error::new(
                        e.kind(),
                        format!("Failed to set secure permissions on data directory: {}", e),
                    ))
                },
            )?;
            debug!("Set 0o700 permissions on data directory");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        assert_eq!(store.get("JOURNAL_ENTRIES_V1").await.unwrap(), None);

        store
            .set("JOURNAL_ENTRIES_V1", "[]".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get("JOURNAL_ENTRIES_V1").await.unwrap().as_deref(),
            Some("[]")
        );
        assert!(temp_dir.path().join("JOURNAL_ENTRIES_V1.json").exists());

        store.delete("JOURNAL_ENTRIES_V1").await.unwrap();
        assert_eq!(store.get("JOURNAL_ENTRIES_V1").await.unwrap(), None);
        store.delete("JOURNAL_ENTRIES_V1").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_leaves_no_temp_files() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        for i in 0..3 {
            store.set("k", format!("[{}]", i)).await.unwrap();
        }

        let mut names: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec![".lock".to_string(), "k.json".to_string()]);
    }

    #[test]
    fn test_second_open_is_locked_out() {
        let temp_dir = tempdir().unwrap();
        let _first = FileStore::open(temp_dir.path()).unwrap();

        match FileStore::open(temp_dir.path()) {
            Err(AppError::Storage(StorageError::Locked { path })) => {
                assert!(path.ends_with(".lock"));
            }
            other => panic!("Expected Locked error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_async_creates_and_locks_directory() {
        let temp_dir = tempdir().unwrap();
        let data_dir = temp_dir.path().join("journal");

        let store = FileStore::open_async(data_dir.clone()).await.unwrap();
        assert!(data_dir.is_dir());
        assert!(matches!(
            FileStore::open_async(data_dir.clone()).await,
            Err(AppError::Storage(StorageError::Locked { .. }))
        ));

        drop(store);
        assert!(FileStore::open_async(data_dir).await.is_ok());
    }

    #[test]
    fn test_lock_released_on_drop() {
        let temp_dir = tempdir().unwrap();
        drop(FileStore::open(temp_dir.path()).unwrap());
        assert!(FileStore::open(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::open(temp_dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden", "with space"] {
            assert!(store.path_for(key).is_err(), "key {:?} should be rejected", key);
        }
        assert!(store.path_for("JOURNAL_ENTRIES_V1").is_ok());
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let temp_dir = tempdir().unwrap();
        let data_dir = temp_dir.path().join("a").join("b");

        FileStore::open(&data_dir).unwrap();
        assert!(data_dir.is_dir());

        #[cfg(unix)]
        {
            let mode = fs::metadata(&data_dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }

    #[test]
    fn test_open_rejects_relative_path() {
        match FileStore::open(Path::new("relative/dir")) {
            Err(AppError::Journal(msg)) => assert!(msg.contains("must be absolute")),
            other => panic!("Expected Journal error, got {:?}", other),
        }
    }
}
