//! Toolchain family lookup used to pick rpath layouts.

use super::{Platform, PlatformFamily};
use std::collections::HashMap;

/// Resolves which SDK family the configured toolchain assigns to a platform.
///
/// The lookup is keyed by flavor, not by the descriptor's own family field, because
/// the toolchain table is the authority on how a flavor gets linked.
pub trait PlatformFamilyLookup: Send + Sync {
    /// Family for the platform's flavor, or `None` when no toolchain entry exists.
    fn family_of(&self, platform: &Platform) -> Option<PlatformFamily>;

    /// Whether the platform links like a macOS binary (`Contents/Frameworks` layout).
    fn is_mac_family(&self, platform: &Platform) -> bool {
        self.family_of(platform) == Some(PlatformFamily::MacOs)
    }
}

/// Flavor to family table built from the configured toolchain entries.
#[derive(Clone, Debug, Default)]
pub struct PlatformFamilyTable {
    entries: HashMap<String, PlatformFamily>,
}

impl PlatformFamilyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the family of a flavor.
    pub fn insert(&mut self, flavor: impl Into<String>, family: PlatformFamily) {
        self.entries.insert(flavor.into(), family);
    }

    /// Builds a table from platform descriptors, using each descriptor's own family.
    pub fn from_platforms<'a>(platforms: impl IntoIterator<Item = &'a Platform>) -> Self {
        let entries = platforms
            .into_iter()
            .map(|p| (p.flavor().to_string(), p.family()))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PlatformFamilyLookup for PlatformFamilyTable {
    fn family_of(&self, platform: &Platform) -> Option<PlatformFamily> {
        self.entries.get(platform.flavor()).copied()
    }
}
