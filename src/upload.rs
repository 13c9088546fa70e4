use crate::{
    acl::CannedAcl,
    enumerate::{FileEntry, enumerate},
    error::{BoxError, DeployError, UploadError},
};
use async_trait::async_trait;
use std::{collections::VecDeque, path::Path};

/// One object to put in a bucket.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    pub local_path: &'a Path,
    pub key: &'a str,
    pub bucket: &'a str,
    pub acl: CannedAcl,
}

/// Puts a single file into object storage.
///
/// Retries, timeouts and authentication are up to the implementation; the
/// driver only waits for the returned future.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload_one(&self, request: UploadRequest<'_>) -> Result<(), BoxError>;
}

/// Where a batch goes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UploadTarget {
    pub bucket: String,
    ///prepended verbatim to every key
    pub prefix: String,
    pub acl: CannedAcl,
}

/// Files waiting to be uploaded, drained from the front.
#[derive(Debug, Default)]
pub struct UploadBatch {
    entries: VecDeque<FileEntry>,
}

impl UploadBatch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_entry(&mut self) -> Option<FileEntry> {
        self.entries.pop_front()
    }

    fn into_remaining(self) -> Vec<FileEntry> {
        self.entries.into()
    }
}

impl From<Vec<FileEntry>> for UploadBatch {
    fn from(entries: Vec<FileEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct BatchSummary {
    ///keys in the order they were uploaded
    pub keys: Vec<String>,
}

impl BatchSummary {
    pub fn uploaded(&self) -> usize {
        self.keys.len()
    }
}

/// Uploads every entry of `batch` one after the other.
///
/// The next upload only starts once the previous one has finished, and the
/// first failure ends the run. The returned error carries the failing entry
/// along with everything that was never attempted.
pub async fn run<U: Uploader + ?Sized>(
    mut batch: UploadBatch,
    target: &UploadTarget,
    uploader: &U,
) -> Result<BatchSummary, UploadError> {
    let mut summary = BatchSummary::default();

    while let Some(entry) = batch.next_entry() {
        let key = entry.destination_key(&target.prefix);
        debug!(pb = ?entry.path(), %key, left = batch.len(), "Uploading");

        let request = UploadRequest {
            local_path: entry.path(),
            key: &key,
            bucket: &target.bucket,
            acl: target.acl,
        };

        if let Err(source) = uploader.upload_one(request).await {
            error!(pb = ?entry.path(), %key, ?source, "Upload failed, aborting batch");
            return Err(UploadError {
                entry,
                key,
                remaining: batch.into_remaining(),
                source,
            });
        }

        let dir = key.strip_suffix(entry.file_name()).unwrap_or(&key);
        info!("Uploaded {} to {dir}", entry.file_name());

        summary.keys.push(key);
    }

    Ok(summary)
}

/// Lists everything under `root`, then uploads it in discovery order.
pub async fn upload_tree<U: Uploader + ?Sized>(
    root: &Path,
    target: &UploadTarget,
    uploader: &U,
) -> Result<BatchSummary, DeployError> {
    let files = enumerate(root)?;
    info!(?root, count = files.len(), bucket = %target.bucket, "Uploading files");

    Ok(run(files.into(), target, uploader).await?)
}
