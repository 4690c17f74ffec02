//! Literal parsing versions.

use std::fmt;
use std::str::FromStr;

/// Protocol generation whose rules govern literal parsing.
///
/// Ordered oldest to newest, so feature checks compare against the release
/// that introduced the feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReqlVersion {
    V1_16,
    V2_0,
}

impl ReqlVersion {
    pub const LATEST: Self = Self::V2_0;

    pub const ALL: [Self; 2] = [Self::V1_16, Self::V2_0];

    /// `BINARY` pseudo-type literals arrived in 2.0.
    pub fn supports_binary(self) -> bool {
        self >= Self::V2_0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_16 => "1.16",
            Self::V2_0 => "2.0",
        }
    }
}

impl fmt::Display for ReqlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ReQL version `{0}` (expected 1.16 or 2.0)")]
pub struct UnknownVersion(pub String);

impl FromStr for ReqlVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVersion(s.to_owned()))
    }
}
