//! Apple platform descriptors consumed by framework rules.
//!
//! A [`Platform`] is supplied per build configuration (from the project file or by the
//! caller). Rules never construct one themselves; they only read its flavor,
//! architectures, family and simulator flag.

mod family;
mod filter;

pub use family::{PlatformFamilyLookup, PlatformFamilyTable};
pub use filter::PlatformFilter;

use std::fmt;

/// Operating system family of an Apple SDK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    /// macOS (`macosx` SDK)
    MacOs,
    /// iOS and iPadOS (`iphoneos`, `iphonesimulator`)
    Ios,
    /// tvOS (`appletvos`, `appletvsimulator`)
    TvOs,
    /// watchOS (`watchos`, `watchsimulator`)
    WatchOs,
    /// visionOS (`xros`, `xrsimulator`)
    VisionOs,
    /// DriverKit (`driverkit`)
    DriverKit,
    /// Anything not recognised from the SDK name
    Other,
}

impl PlatformFamily {
    /// Classifies an SDK name such as `iphonesimulator` or `macosx`.
    pub fn from_sdk_name(sdk: &str) -> Self {
        match sdk {
            "macosx" | "macos" => Self::MacOs,
            "iphoneos" | "iphonesimulator" => Self::Ios,
            "appletvos" | "appletvsimulator" => Self::TvOs,
            "watchos" | "watchsimulator" => Self::WatchOs,
            "xros" | "xrsimulator" | "visionos" | "visionsimulator" => Self::VisionOs,
            "driverkit" => Self::DriverKit,
            _ => Self::Other,
        }
    }

    /// Platform token used by `SupportedPlatform` in XCFramework manifests.
    pub fn manifest_name(self) -> Option<&'static str> {
        match self {
            Self::MacOs => Some("macos"),
            Self::Ios => Some("ios"),
            Self::TvOs => Some("tvos"),
            Self::WatchOs => Some("watchos"),
            Self::VisionOs => Some("xros"),
            Self::DriverKit => Some("driverkit"),
            Self::Other => None,
        }
    }
}

/// A concrete target platform: one SDK plus the architectures built for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Platform {
    flavor: String,
    sdk: String,
    architectures: Vec<String>,
    family: PlatformFamily,
    simulator: bool,
}

impl Platform {
    /// Creates a platform, deriving family and simulator flag from the SDK name.
    ///
    /// ```
    /// use kodegen_prebuilt_framework::framework::{Platform, PlatformFamily};
    ///
    /// let platform = Platform::new("iphonesimulator-arm64", "iphonesimulator", ["arm64"]);
    /// assert_eq!(platform.family(), PlatformFamily::Ios);
    /// assert!(platform.is_simulator());
    /// ```
    pub fn new<I, S>(flavor: impl Into<String>, sdk: impl Into<String>, architectures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sdk = sdk.into();
        Self {
            flavor: flavor.into(),
            family: PlatformFamily::from_sdk_name(&sdk),
            simulator: sdk.ends_with("simulator"),
            architectures: architectures.into_iter().map(Into::into).collect(),
            sdk,
        }
    }

    /// Overrides the derived family.
    pub fn with_family(mut self, family: PlatformFamily) -> Self {
        self.family = family;
        self
    }

    /// Overrides the derived simulator flag.
    pub fn with_simulator(mut self, simulator: bool) -> Self {
        self.simulator = simulator;
        self
    }

    /// Flavor string identifying this platform, e.g. `iphoneos-arm64`.
    pub fn flavor(&self) -> &str {
        &self.flavor
    }

    /// SDK name, e.g. `iphoneos`.
    pub fn sdk(&self) -> &str {
        &self.sdk
    }

    /// Architectures in the order the toolchain lists them.
    pub fn architectures(&self) -> &[String] {
        &self.architectures
    }

    pub fn family(&self) -> PlatformFamily {
        self.family
    }

    pub fn is_simulator(&self) -> bool {
        self.simulator
    }

    /// Token matched against XCFramework `SupportedPlatform` values.
    ///
    /// Falls back to the SDK name for platforms outside the known families.
    pub fn canonical_name(&self) -> &str {
        self.family.manifest_name().unwrap_or(&self.sdk)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flavor)
    }
}
