//! Error types for prebuilt framework rules.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for framework rule operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while describing, inspecting or staging a prebuilt framework.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Filesystem operation failed on a specific path.
    #[error("{context} {path}: {error}")]
    Fs {
        /// What was being attempted.
        context: &'static str,
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying error.
        error: io::Error,
    },

    /// The XCFramework Info.plist exists but could not be parsed.
    #[error("corrupt XCFramework manifest {path}: {source}")]
    CorruptManifest {
        /// Manifest location.
        path: PathBuf,
        /// Parser error.
        source: plist::Error,
    },

    /// An XCFramework has no slice for the requested platform.
    #[error("{target}: bundle {bundle} has no slice for platform {platform}")]
    NoSliceForPlatform {
        /// Rule that needed the slice.
        target: String,
        /// Bundle that was inspected.
        bundle: PathBuf,
        /// Platform flavor that was requested.
        platform: String,
    },

    /// A build target string could not be parsed.
    #[error("invalid build target `{0}`: expected `//base/path:name`")]
    InvalidBuildTarget(String),

    /// A staging step failed.
    #[error("step `{step}` failed: {source}")]
    StepFailed {
        /// Step description.
        step: String,
        /// Underlying failure.
        source: Box<Error>,
    },

    /// Invalid supported-platform or linker-flag pattern.
    #[error("invalid platform pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Directory walk failure while copying a bundle.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix could not be stripped.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Adds path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] carrying `context` and `path`.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Turns missing values or foreign errors into [`Error::GenericError`].
pub trait Context<T> {
    /// Attaches a message describing what was expected.
    fn context<C: Display + Send + Sync + 'static>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display + Send + Sync + 'static>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display + Send + Sync + 'static>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Returns early with [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::framework::Error::GenericError(format!($($arg)*)))
    };
}
