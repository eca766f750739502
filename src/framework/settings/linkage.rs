//! Linkage preferences and link modes.

use std::fmt;

/// How a prebuilt framework prefers to be linked by its consumers.
///
/// # Configuration
///
/// ```toml
/// [[framework]]
/// preferred_linkage = "shared"
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Always linked statically
    Static,
    /// Always linked dynamically
    Shared,
    /// Consumer decides
    #[default]
    Any,
}

/// Link mode requested by a consumer for one link-input computation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkMode {
    /// Static archive style linking
    Static,
    /// Static linking of position independent code
    StaticPic,
    /// Dynamic linking; pulls in rpath arguments
    Shared,
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Static => "static",
            Self::StaticPic => "static-pic",
            Self::Shared => "shared",
        })
    }
}

impl std::str::FromStr for LinkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Self::Static),
            "static-pic" | "static_pic" => Ok(Self::StaticPic),
            "shared" => Ok(Self::Shared),
            other => Err(format!(
                "Invalid link mode: {other}. Valid link modes: static, static-pic, shared"
            )),
        }
    }
}
