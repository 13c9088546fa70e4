use crate::enumerate::FileEntry;
use std::path::PathBuf;
use thiserror::Error;

/// Error type handed back by [`crate::upload::Uploader`] implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Discovery failures. Any of these aborts the run before the first upload.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("unable to read {}", .path.as_deref().unwrap_or(.root).display())]
    Walk {
        root: PathBuf,
        path: Option<PathBuf>,
        source: walkdir::Error,
    },
    #[error("unable to get UTF-8 path for {}", .path.display())]
    NonUtf8 { path: PathBuf },
    #[error("{} is not below {}", .path.display(), .root.display())]
    OutsideRoot { root: PathBuf, path: PathBuf },
}

/// The first upload that failed. Nothing after `entry` was attempted.
#[derive(Debug, Error)]
#[error("failed to upload {path} to {key}", path = .entry.path().display())]
pub struct UploadError {
    pub entry: FileEntry,
    pub key: String,
    ///entries that were never attempted, in discovery order
    pub remaining: Vec<FileEntry>,
    #[source]
    pub source: BoxError,
}

#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}
