use clap::Parser;
use std::path::PathBuf;

/// Uploads a file or a directory tree to an S3 bucket.
///
/// Credentials are read from `aws_access_key_id` and `aws_secret_access_key`
/// in `.env`. Set `AWS_ENDPOINT_URL_S3` to use a non-AWS provider.
#[derive(Parser, Debug, Clone)]
#[command(name = "s3-deploy", version)]
pub struct Args {
    /// File or directory to upload
    #[arg(long)]
    pub file: PathBuf,
    /// Name of the destination bucket
    #[arg(long)]
    pub bucket: String,
    /// Region of the destination bucket
    #[arg(long)]
    pub region: String,
    /// Prefix prepended verbatim to every object key, eg. `assets/`
    #[arg(long)]
    pub cwd: String,
    /// Canned ACL for the uploaded objects. Unknown values fall back to `public-read`
    #[arg(long, alias = "ACL")]
    pub acl: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Usage errors exit 1 like any other failed run; `--help` and `--version` exit 0.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}
