//! Prebuilt Apple framework rules for native build graphs.
//!
//! This library models precompiled `.framework` and `.xcframework` bundles as
//! dependency graph nodes:
//! - XCFramework slice selection from `Info.plist`
//! - Per-platform link and preprocessor inputs, memoized across graph workers
//! - Deterministic staging of the bundle into the generated-output tree
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod framework;

// Re-export commonly used types
pub use error::{CliError, FrameworkToolError, Result};
