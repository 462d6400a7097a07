use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug)]
pub enum StorageError {
    InvalidName(String),
    Io(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidName(name) => write!(f, "invalid filename: {:?}", name),
            StorageError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// Local disk storage for uploaded images.
///
/// Every read, write and delete happens directly inside `root`; names that
/// could address anything outside it are rejected.
#[derive(Clone, Debug)]
pub struct ImageFileStore {
    root: PathBuf,
}

impl ImageFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve_path(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let invalid = filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\', '\0']);

        if invalid {
            return Err(StorageError::InvalidName(filename.to_string()));
        }

        Ok(self.root.join(filename))
    }

    /// Writes `bytes` to `filename`, creating the directory on first use.
    pub async fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.resolve_path(filename)?;
        fs::create_dir_all(&self.root).await?;
        fs::write(&path, bytes).await?;
        Ok(path)
    }

    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve_path(filename)?;
        Ok(fs::read(path).await?)
    }

    /// Deletes `filename` if present. Returns `false` when there was nothing to
    /// delete, including when a concurrent caller removed it first.
    pub async fn remove(&self, filename: &str) -> Result<bool, StorageError> {
        let path = self.resolve_path(filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
