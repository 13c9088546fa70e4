use crate::{
    acl::CannedAcl,
    cli::Args,
    config::{get_aws_creds, get_endpoint},
    s3::{S3Uploader, get_region},
    upload::{UploadTarget, upload_tree},
};
use color_eyre::eyre::WrapErr;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Absolute, lexically cleaned form of the path given on the command line.
pub fn resolve_root(file: &Path) -> color_eyre::Result<PathBuf> {
    let absolute = std::path::absolute(file)
        .wrap_err_with(|| format!("unable to resolve {}", file.display()))?;
    Ok(path_clean::clean(absolute))
}

pub async fn deploy(args: Args) -> color_eyre::Result<()> {
    let Args {
        file,
        bucket,
        region,
        cwd,
        acl,
        timeout,
    } = args;

    let acl = CannedAcl::parse_or_default(acl.as_deref());
    let root = resolve_root(&file)?;

    let credentials = get_aws_creds()?;
    let uploader = S3Uploader::new(
        get_region(&region, get_endpoint())?,
        credentials,
        timeout.map(Duration::from_secs),
    );

    info!("Starting the deployment to S3 bucket : {bucket} ({region})");

    let meta = tokio::fs::metadata(&root)
        .await
        .wrap_err("Error reading the file or directory")?;
    debug!(?root, is_dir = meta.is_dir(), "Found upload root");

    let target = UploadTarget {
        bucket,
        prefix: cwd,
        acl,
    };
    let summary = upload_tree(&root, &target, &uploader).await?;

    info!(uploaded = summary.uploaded(), "All uploaded to S3");

    Ok(())
}
