use crate::{
    error::BoxError,
    upload::{UploadRequest, Uploader},
};
use async_trait::async_trait;
use s3::{Bucket, Region, creds::Credentials, error::S3Error};
use std::time::Duration;
use thiserror::Error;

pub const ACL_HEADER: &str = "x-amz-acl";

#[derive(Debug, Error, Eq, PartialEq)]
#[error("S3 responded with status {code} for {key}")]
pub struct UnexpectedStatus {
    pub code: u16,
    pub key: String,
}

/// Picks the S3 region, pointing it at a custom endpoint when one is given.
pub fn get_region(name: &str, endpoint: Option<String>) -> color_eyre::Result<Region> {
    Ok(match endpoint {
        Some(endpoint) => Region::Custom {
            region: name.to_owned(),
            endpoint,
        },
        None => name.parse()?,
    })
}

/// [`Uploader`] that puts objects with `rust-s3`.
pub struct S3Uploader {
    region: Region,
    credentials: Credentials,
    timeout: Option<Duration>,
}

impl S3Uploader {
    pub fn new(region: Region, credentials: Credentials, timeout: Option<Duration>) -> Self {
        Self {
            region,
            credentials,
            timeout,
        }
    }

    fn get_bucket(&self, name: &str, acl: &str) -> Result<Box<Bucket>, S3Error> {
        let mut bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())?;
        if let Some(timeout) = self.timeout {
            bucket = bucket.with_request_timeout(timeout)?;
        }
        bucket.add_header(ACL_HEADER, acl);
        Ok(bucket)
    }
}

fn check_status(code: u16, key: &str) -> Result<(), UnexpectedStatus> {
    if (200..300).contains(&code) {
        Ok(())
    } else {
        Err(UnexpectedStatus {
            code,
            key: key.to_owned(),
        })
    }
}

#[async_trait]
impl Uploader for S3Uploader {
    async fn upload_one(&self, request: UploadRequest<'_>) -> Result<(), BoxError> {
        let bucket = self.get_bucket(request.bucket, request.acl.as_str())?;

        let contents = tokio::fs::read(request.local_path).await?;
        let content_type = new_mime_guess::from_path(request.local_path).first_or_octet_stream();
        trace!(pb = ?request.local_path, len = contents.len(), %content_type, "Read file");

        let rsp = bucket
            .put_object_with_content_type(request.key, &contents, content_type.essence_str())
            .await?;
        check_status(rsp.status_code(), request.key)?;

        info!(key = %request.key, %content_type, code = %rsp.status_code(), "Uploaded to S3");

        Ok(())
    }
}
