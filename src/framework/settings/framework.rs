//! Construction parameters of a prebuilt framework rule.

use super::Linkage;
use crate::framework::{BuildTarget, FrameworkRef, Platform, Result};
use regex::Regex;
use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Linker flags a framework exports to its consumers, as a function of the platform.
pub type ExportedLinkerFlags = Arc<dyn Fn(&Platform) -> Vec<String> + Send + Sync>;

/// Flags shared by every platform plus flags selected by flavor pattern.
///
/// Pattern lists are appended in declaration order for every pattern found in the
/// platform flavor.
#[derive(Clone, Debug, Default)]
pub struct PlatformLinkerFlags {
    base: Vec<String>,
    by_platform: Vec<(Regex, Vec<String>)>,
}

impl PlatformLinkerFlags {
    /// Compiles the per-platform patterns.
    pub fn new(base: Vec<String>, by_platform: Vec<(String, Vec<String>)>) -> Result<Self> {
        let by_platform = by_platform
            .into_iter()
            .map(|(pattern, flags)| Ok((Regex::new(&pattern)?, flags)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { base, by_platform })
    }

    pub fn flags_for(&self, platform: &Platform) -> Vec<String> {
        let mut flags = self.base.clone();
        for (pattern, extra) in &self.by_platform {
            if pattern.is_match(platform.flavor()) {
                flags.extend(extra.iter().cloned());
            }
        }
        flags
    }

    /// Wraps these flags as an [`ExportedLinkerFlags`] function.
    pub fn into_fn(self) -> ExportedLinkerFlags {
        Arc::new(move |platform: &Platform| self.flags_for(platform))
    }
}

/// Everything a [`PrebuiltFramework`](crate::framework::PrebuiltFramework) is built from.
///
/// Constructed through [`FrameworkSettingsBuilder`](super::FrameworkSettingsBuilder).
#[derive(Clone)]
pub struct FrameworkSettings {
    /// Identity of the rule.
    target: BuildTarget,

    /// Source `.framework` or `.xcframework` directory.
    bundle_path: PathBuf,

    /// Root of generated output, e.g. `buck-out`.
    out_root: PathBuf,

    preferred_linkage: Linkage,

    /// Framework references exported on every supported platform.
    frameworks: BTreeSet<FrameworkRef>,

    /// Optional pattern restricting the supported platforms.
    supported_platforms_regex: Option<String>,

    exported_linker_flags: ExportedLinkerFlags,
}

impl fmt::Debug for FrameworkSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameworkSettings")
            .field("target", &self.target)
            .field("bundle_path", &self.bundle_path)
            .field("out_root", &self.out_root)
            .field("preferred_linkage", &self.preferred_linkage)
            .field("frameworks", &self.frameworks)
            .field("supported_platforms_regex", &self.supported_platforms_regex)
            .field("exported_linker_flags", &"<fn>")
            .finish()
    }
}

impl FrameworkSettings {
    pub fn target(&self) -> &BuildTarget {
        &self.target
    }

    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    pub fn out_root(&self) -> &Path {
        &self.out_root
    }

    pub fn preferred_linkage(&self) -> Linkage {
        self.preferred_linkage
    }

    pub fn frameworks(&self) -> &BTreeSet<FrameworkRef> {
        &self.frameworks
    }

    pub fn supported_platforms_regex(&self) -> Option<&str> {
        self.supported_platforms_regex.as_deref()
    }

    /// Evaluates the exported linker flags for a platform.
    pub fn exported_linker_flags(&self, platform: &Platform) -> Vec<String> {
        (self.exported_linker_flags)(platform)
    }

    /// Creates a new FrameworkSettings instance (used by FrameworkSettingsBuilder).
    pub(super) fn new(
        target: BuildTarget,
        bundle_path: PathBuf,
        out_root: PathBuf,
        preferred_linkage: Linkage,
        frameworks: BTreeSet<FrameworkRef>,
        supported_platforms_regex: Option<String>,
        exported_linker_flags: ExportedLinkerFlags,
    ) -> Self {
        Self {
            target,
            bundle_path,
            out_root,
            preferred_linkage,
            frameworks,
            supported_platforms_regex,
            exported_linker_flags,
        }
    }
}
