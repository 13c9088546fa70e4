use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use thiserror::Error;

/// Canned ACLs accepted on object uploads.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CannedAcl {
    Private,
    #[default]
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
    AwsExecRead,
    BucketOwnerRead,
    BucketOwnerFullControl,
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown canned ACL {0:?}")]
pub struct UnknownAcl(pub String);

impl CannedAcl {
    pub const ALL: [CannedAcl; 7] = [
        Self::Private,
        Self::PublicRead,
        Self::PublicReadWrite,
        Self::AuthenticatedRead,
        Self::AwsExecRead,
        Self::BucketOwnerRead,
        Self::BucketOwnerFullControl,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
            Self::AwsExecRead => "aws-exec-read",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
        }
    }

    ///falls back to the default with a warning rather than rejecting the run
    pub fn parse_or_default(requested: Option<&str>) -> Self {
        let Some(requested) = requested else {
            return Self::default();
        };

        match requested.parse() {
            Ok(acl) => acl,
            Err(e) => {
                warn!(?e, fallback = %Self::default(), "ACL is not in the list of allowed ACLs, using default");
                Self::default()
            }
        }
    }
}

impl Display for CannedAcl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CannedAcl {
    type Err = UnknownAcl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|acl| acl.as_str() == s)
            .ok_or_else(|| UnknownAcl(s.to_owned()))
    }
}
