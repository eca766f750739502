//! Builder for constructing FrameworkSettings.

use super::{ExportedLinkerFlags, FrameworkSettings, Linkage, PlatformLinkerFlags};
use crate::framework::{BuildTarget, FrameworkRef, Platform};
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Builder for constructing [`FrameworkSettings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_prebuilt_framework::framework::{FrameworkSettingsBuilder, Linkage};
///
/// # fn example() -> kodegen_prebuilt_framework::framework::Result<()> {
/// let settings = FrameworkSettingsBuilder::new()
///     .target("//third-party/foo:Foo".parse()?)
///     .bundle_path("vendor/Foo.xcframework")
///     .out_root("buck-out")
///     .preferred_linkage(Linkage::Shared)
///     .framework("$SDKROOT/System/Library/Frameworks/UIKit.framework".parse().unwrap())
///     .supported_platforms_regex("^iphone")
///     .exported_linker_flags(vec!["-ObjC".into()])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct FrameworkSettingsBuilder {
    target: Option<BuildTarget>,
    bundle_path: Option<PathBuf>,
    out_root: Option<PathBuf>,
    preferred_linkage: Linkage,
    frameworks: BTreeSet<FrameworkRef>,
    supported_platforms_regex: Option<String>,
    exported_linker_flags: Vec<String>,
    exported_platform_linker_flags: Vec<(String, Vec<String>)>,
    exported_linker_flags_fn: Option<ExportedLinkerFlags>,
}

impl FrameworkSettingsBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the rule identity.
    ///
    /// # Required
    pub fn target(mut self, target: BuildTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// Sets the source bundle directory (`.framework` or `.xcframework`).
    ///
    /// # Required
    pub fn bundle_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bundle_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the generated output root.
    ///
    /// Default: `buck-out`
    pub fn out_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.out_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Default: [`Linkage::Any`]
    pub fn preferred_linkage(mut self, linkage: Linkage) -> Self {
        self.preferred_linkage = linkage;
        self
    }

    /// Adds one exported framework reference.
    pub fn framework(mut self, framework: FrameworkRef) -> Self {
        self.frameworks.insert(framework);
        self
    }

    /// Adds exported framework references.
    pub fn frameworks(mut self, frameworks: impl IntoIterator<Item = FrameworkRef>) -> Self {
        self.frameworks.extend(frameworks);
        self
    }

    /// Restricts the platforms this framework supports.
    ///
    /// Default: None (all platforms)
    pub fn supported_platforms_regex(mut self, pattern: impl Into<String>) -> Self {
        self.supported_platforms_regex = Some(pattern.into());
        self
    }

    /// Flags exported on every platform.
    pub fn exported_linker_flags(mut self, flags: Vec<String>) -> Self {
        self.exported_linker_flags = flags;
        self
    }

    /// Flags exported on platforms whose flavor matches `pattern`.
    pub fn exported_platform_linker_flags(
        mut self,
        pattern: impl Into<String>,
        flags: Vec<String>,
    ) -> Self {
        self.exported_platform_linker_flags
            .push((pattern.into(), flags));
        self
    }

    /// Replaces the flag lists with an arbitrary function of the platform.
    pub fn exported_linker_flags_fn<F>(mut self, flags: F) -> Self
    where
        F: Fn(&Platform) -> Vec<String> + Send + Sync + 'static,
    {
        self.exported_linker_flags_fn = Some(Arc::new(flags));
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` or `bundle_path` is missing, or if a per-platform
    /// flag pattern does not compile.
    pub fn build(self) -> crate::framework::Result<FrameworkSettings> {
        use crate::framework::error::Context;

        let exported_linker_flags = match self.exported_linker_flags_fn {
            Some(flags) => flags,
            None => PlatformLinkerFlags::new(
                self.exported_linker_flags,
                self.exported_platform_linker_flags,
            )?
            .into_fn(),
        };

        Ok(FrameworkSettings::new(
            self.target.context("target is required")?,
            self.bundle_path.context("bundle_path is required")?,
            self.out_root.unwrap_or_else(|| PathBuf::from("buck-out")),
            self.preferred_linkage,
            self.frameworks,
            self.supported_platforms_regex,
            exported_linker_flags,
        ))
    }
}
