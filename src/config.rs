use color_eyre::eyre::bail;
use s3::creds::Credentials;

pub const ACCESS_KEY: &str = "aws_access_key_id";
pub const SECRET_KEY: &str = "aws_secret_access_key";
pub const ENDPOINT: &str = "AWS_ENDPOINT_URL_S3";

/// Looks up `key` as written in `.env`, then upper-cased as AWS tooling exports it.
fn lookup(key: &str, var: &impl Fn(&str) -> Option<String>) -> Option<String> {
    var(key).or_else(|| var(&key.to_uppercase()))
}

pub fn credentials_from(var: impl Fn(&str) -> Option<String>) -> color_eyre::Result<Credentials> {
    let Some(access_key) = lookup(ACCESS_KEY, &var) else {
        bail!("missing {ACCESS_KEY:?} in .env")
    };
    let Some(secret_key) = lookup(SECRET_KEY, &var) else {
        bail!("missing {SECRET_KEY:?} in .env")
    };

    Ok(Credentials::new(
        Some(&access_key),
        Some(&secret_key),
        None,
        None,
        None,
    )?)
}

/// Reads the credentials out of the environment `setup` loaded `.env` into.
pub fn get_aws_creds() -> color_eyre::Result<Credentials> {
    credentials_from(|key| dotenvy::var(key).ok())
}

pub fn get_endpoint() -> Option<String> {
    dotenvy::var(ENDPOINT).ok().filter(|x| !x.is_empty())
}
