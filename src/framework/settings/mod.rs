//! Configuration structures for prebuilt framework rules.

mod builder;
mod framework;
mod linkage;

pub use builder::FrameworkSettingsBuilder;
pub use framework::{ExportedLinkerFlags, FrameworkSettings, PlatformLinkerFlags};
pub use linkage::{LinkMode, Linkage};
