//! Build target identities and the generated-output layout derived from them.

use super::error::{Error, Result};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Fully qualified build target, e.g. `//third-party/foo:Foo`.
///
/// Targets are opaque identities owned by the build graph. Rules only use them
/// as map keys and to derive their generated-output directory.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(into = "String")]
pub struct BuildTarget {
    base_path: String,
    short_name: String,
}

impl BuildTarget {
    /// Creates a target from its package path (without the leading `//`) and name.
    pub fn new(base_path: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            short_name: short_name.into(),
        }
    }

    /// Package path, e.g. `third-party/foo`.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Rule name, e.g. `Foo`.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Directory holding generated files for this target:
    /// `<out_root>/gen/<base_path>/<short_name>`.
    pub fn gen_path(&self, out_root: &Path) -> PathBuf {
        let mut path = out_root.join("gen");
        for component in self.base_path.split('/').filter(|c| !c.is_empty()) {
            path.push(component);
        }
        path.join(&self.short_name)
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "//{}:{}", self.base_path, self.short_name)
    }
}

impl From<BuildTarget> for String {
    fn from(target: BuildTarget) -> Self {
        target.to_string()
    }
}

impl FromStr for BuildTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix("//")
            .ok_or_else(|| Error::InvalidBuildTarget(s.to_string()))?;
        let (base_path, short_name) = rest
            .rsplit_once(':')
            .ok_or_else(|| Error::InvalidBuildTarget(s.to_string()))?;
        if short_name.is_empty() || short_name.contains('/') {
            return Err(Error::InvalidBuildTarget(s.to_string()));
        }
        Ok(Self::new(base_path, short_name))
    }
}
