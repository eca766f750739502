//! Supported-platform predicate.

use super::Platform;
use crate::framework::Result;
use regex::Regex;

/// Decides whether a rule contributes anything for a given platform.
///
/// Built once from the rule's optional `supported_platforms_regex`. The pattern is
/// searched for anywhere in the platform flavor, so `"iphone"` matches both
/// `iphoneos-arm64` and `iphonesimulator-x86_64`.
#[derive(Clone, Debug, Default)]
pub struct PlatformFilter {
    pattern: Option<Regex>,
}

impl PlatformFilter {
    /// Compiles the optional pattern. `None` supports every platform.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let pattern = pattern.map(Regex::new).transpose()?;
        Ok(Self { pattern })
    }

    pub fn supports(&self, platform: &Platform) -> bool {
        self.pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(platform.flavor()))
    }

    /// The configured pattern source, if any.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }
}
