//! Prebuilt Apple framework rules.
//!
//! A [`PrebuiltFramework`] represents an already compiled `.framework` or
//! `.xcframework` bundle as a node of a native build graph. It
//!
//! 1. filters the platforms it applies to ([`PlatformFilter`]),
//! 2. picks the XCFramework slice for a platform ([`xcframework`]),
//! 3. synthesizes link inputs, adding `-rpath` entries for shared linkage ([`link`]),
//! 4. exposes direct and transitive preprocessor inputs ([`preprocessor`]),
//! 5. memoizes both per key across graph workers ([`cache`]),
//! 6. plans the steps that stage the bundle ([`staging`]).
//!
//! # Example
//!
//! ```no_run
//! use kodegen_prebuilt_framework::framework::{
//!     FrameworkSettingsBuilder, LinkMode, NativeLinkable, Platform, PlatformFamilyTable,
//!     PrebuiltFramework,
//! };
//! use std::sync::Arc;
//!
//! # fn example() -> kodegen_prebuilt_framework::framework::Result<()> {
//! let device = Platform::new("iphoneos-arm64", "iphoneos", ["arm64"]);
//! let families = Arc::new(PlatformFamilyTable::from_platforms([&device]));
//!
//! let settings = FrameworkSettingsBuilder::new()
//!     .target("//third-party/foo:Foo".parse()?)
//!     .bundle_path("vendor/Foo.xcframework")
//!     .build()?;
//! let rule = PrebuiltFramework::new(settings, Vec::new(), families)?;
//!
//! let input = rule.native_link_input(&device, LinkMode::Shared, false)?;
//! println!("{:?}", input.args);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
mod graph;
pub mod link;
mod platform;
pub mod preprocessor;
mod refs;
mod rule;
mod settings;
pub mod staging;
mod target;
pub mod utils;
pub mod xcframework;

pub use error::{Error, Result};
pub use graph::{BuildRule, GraphNode, NativeLinkable, PreprocessorDep};
pub use link::{LinkCacheKey, LinkInput};
pub use platform::{
    Platform, PlatformFamily, PlatformFamilyLookup, PlatformFamilyTable, PlatformFilter,
};
pub use preprocessor::{PreprocessorInput, TransitivePreprocessorInput};
pub use refs::{FrameworkRef, LibraryRef, SourceTree};
pub use rule::PrebuiltFramework;
pub use settings::{
    ExportedLinkerFlags, FrameworkSettings, FrameworkSettingsBuilder, LinkMode, Linkage,
    PlatformLinkerFlags,
};
pub use staging::{BuildableContext, RecordedArtifact, Step};
pub use target::BuildTarget;
