//! File-backed [`SnapshotRepository`].
//!
//! All saves use write-then-rename so a crash or I/O error never leaves a
//! half-written document behind:
//!
//! 1. Write the encoded snapshot to `preferences.toml.tmp`
//! 2. `fsync` the temporary file
//! 3. Rename it over `preferences.toml`
//!
//! If any step fails the temporary file is removed (best effort) and the
//! previous document is left untouched.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use prefs_core::{decode_snapshot, encode_snapshot, PreferencesSnapshot};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::config::{ConfigError, StorageConfig};
use crate::application::ports::{PersistError, SnapshotRepository};

/// Stores the snapshot as a TOML document on disk.
#[derive(Debug, Clone)]
pub struct FileSnapshotRepository {
    path: PathBuf,
}

impl FileSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a repository for the document described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformDataDir`] if the path cannot be resolved.
    pub fn from_config(config: &StorageConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document path made absolute, with `.` and `..` resolved.
    ///
    /// The nearest existing ancestor is canonicalized so linked spellings of
    /// the same directory agree, whether or not the document exists yet.
    fn resolved_path(&self) -> PathBuf {
        let absolute = lexically_absolute(&self.path);
        absolute
            .ancestors()
            .skip(1)
            .find_map(|dir| {
                let canonical = std::fs::canonicalize(dir).ok()?;
                let rest = absolute.strip_prefix(dir).ok()?;
                Some(canonical.join(rest))
            })
            .unwrap_or_else(|| absolute.clone())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_temp(&self, temp: &Path, content: &[u8]) -> Result<(), PersistError> {
        let io_err = |source: std::io::Error| PersistError::Io {
            path: temp.to_path_buf(),
            source,
        };
        let mut file = tokio::fs::File::create(temp).await.map_err(io_err)?;
        file.write_all(content).await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotRepository for FileSnapshotRepository {
    fn location(&self) -> String {
        self.resolved_path().display().to_string()
    }

    async fn load(&self) -> Option<PreferencesSnapshot> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no preferences document yet");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), "failed to read preferences: {e}");
                return None;
            }
        };

        match decode_snapshot(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring undecodable preferences: {e}");
                None
            }
        }
    }

    async fn save(&self, snapshot: &PreferencesSnapshot) -> Result<(), PersistError> {
        let content = encode_snapshot(snapshot)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| PersistError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let temp = self.temp_path();
        let result = match self.write_temp(&temp, content.as_bytes()).await {
            Ok(()) => tokio::fs::rename(&temp, &self.path)
                .await
                .map_err(|source| PersistError::Io {
                    path: self.path.clone(),
                    source,
                }),
            Err(e) => Err(e),
        };

        if result.is_err() {
            let _ = tokio::fs::remove_file(&temp).await;
        }
        result
    }
}

fn lexically_absolute(path: &Path) -> PathBuf {
    let mut resolved = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir().unwrap_or_default()
    };
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

// ── Tests ─────────────────────────────────────────────────────────────────────
