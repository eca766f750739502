//! Native link inputs contributed by a framework.

use super::{FrameworkRef, LibraryRef, LinkMode, Platform, PlatformFamilyLookup};
use std::collections::BTreeSet;

/// Runtime search paths for macOS binaries (`Contents/MacOS` next to `Contents/Frameworks`).
pub const MAC_RPATHS: [&str; 2] = ["@loader_path/../Frameworks", "@executable_path/../Frameworks"];

/// Runtime search paths for flat bundles (iOS, tvOS, watchOS, ...).
pub const FLAT_BUNDLE_RPATHS: [&str; 2] = ["@loader_path/Frameworks", "@loader_path/Frameworks"];

/// What a dependency adds to a consumer's link line.
///
/// Records are immutable once produced and shared through the link cache.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LinkInput {
    /// Linker arguments, in order.
    pub args: Vec<String>,
    /// Frameworks to link.
    pub frameworks: BTreeSet<FrameworkRef>,
    /// Libraries to link.
    pub libraries: BTreeSet<LibraryRef>,
}

impl LinkInput {
    pub fn new(
        args: Vec<String>,
        frameworks: BTreeSet<FrameworkRef>,
        libraries: BTreeSet<LibraryRef>,
    ) -> Self {
        Self {
            args,
            frameworks,
            libraries,
        }
    }

    /// The record contributed on unsupported platforms.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.frameworks.is_empty() && self.libraries.is_empty()
    }
}

/// Key of the link cache.
///
/// `force_whole` is part of the key even for rules that ignore it, so every
/// linkable shares one key shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LinkCacheKey {
    pub flavor: String,
    pub link_mode: LinkMode,
    pub force_whole: bool,
}

impl LinkCacheKey {
    pub fn new(platform: &Platform, link_mode: LinkMode, force_whole: bool) -> Self {
        Self {
            flavor: platform.flavor().to_string(),
            link_mode,
            force_whole,
        }
    }
}

/// `-rpath` arguments letting a dynamically linked consumer find embedded frameworks.
///
/// Loader-relative pair first, executable-relative pair second.
pub fn rpath_args(platform: &Platform, families: &dyn PlatformFamilyLookup) -> Vec<String> {
    let [loader_path, executable_path] = if families.is_mac_family(platform) {
        MAC_RPATHS
    } else {
        FLAT_BUNDLE_RPATHS
    };
    vec![
        "-rpath".to_string(),
        loader_path.to_string(),
        "-rpath".to_string(),
        executable_path.to_string(),
    ]
}
