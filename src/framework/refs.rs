//! Framework and library references handed to compilers and linkers.

use std::{convert::Infallible, fmt, path::PathBuf, str::FromStr};

/// Xcode source tree a framework path is relative to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceTree {
    /// `$SDKROOT`
    SdkRoot,
    /// `$PLATFORM_DIR`
    PlatformDir,
    /// `$DEVELOPER_DIR`
    DeveloperDir,
    /// `$BUILT_PRODUCTS_DIR`
    BuiltProductsDir,
}

impl SourceTree {
    const ALL: [SourceTree; 4] = [
        Self::SdkRoot,
        Self::PlatformDir,
        Self::DeveloperDir,
        Self::BuiltProductsDir,
    ];

    pub fn variable(self) -> &'static str {
        match self {
            Self::SdkRoot => "$SDKROOT",
            Self::PlatformDir => "$PLATFORM_DIR",
            Self::DeveloperDir => "$DEVELOPER_DIR",
            Self::BuiltProductsDir => "$BUILT_PRODUCTS_DIR",
        }
    }
}

/// A framework a consumer must search and link against.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(into = "String")]
pub enum FrameworkRef {
    /// Path inside a toolchain source tree, e.g. `$SDKROOT/System/Library/Frameworks/UIKit.framework`.
    SourceTree {
        /// Tree the path is relative to.
        root: SourceTree,
        /// Path below the tree root, without a leading slash.
        path: String,
    },
    /// Path on disk, typically a rule's staged output.
    Path(PathBuf),
}

impl FrameworkRef {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn sdk(path: impl Into<String>) -> Self {
        Self::SourceTree {
            root: SourceTree::SdkRoot,
            path: path.into(),
        }
    }
}

impl fmt::Display for FrameworkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceTree { root, path } => write!(f, "{}/{}", root.variable(), path),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<FrameworkRef> for String {
    fn from(framework: FrameworkRef) -> Self {
        framework.to_string()
    }
}

impl FromStr for FrameworkRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for root in SourceTree::ALL {
            if let Some(path) = s
                .strip_prefix(root.variable())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                return Ok(Self::SourceTree {
                    root,
                    path: path.to_string(),
                });
            }
        }
        Ok(Self::Path(PathBuf::from(s)))
    }
}

/// A library a consumer must link against.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct LibraryRef(pub PathBuf);
