//! Shared fixtures for integration tests.
#![allow(dead_code)]

use kodegen_prebuilt_framework::framework::{
    BuildTarget, FrameworkSettingsBuilder, GraphNode, Platform, PlatformFamily,
    PlatformFamilyTable, PrebuiltFramework,
};
use plist::{Dictionary, Value};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

/// One `AvailableLibraries` entry.
pub struct Library<'a> {
    pub identifier: &'a str,
    pub path: &'a str,
    pub platform: &'a str,
    pub architectures: &'a [&'a str],
    pub variant: Option<&'a str>,
}

/// Device slice and simulator slice of an iOS XCFramework.
pub fn ios_libraries() -> Vec<Library<'static>> {
    vec![
        Library {
            identifier: "ios-arm64",
            path: "Foo.framework",
            platform: "ios",
            architectures: &["arm64"],
            variant: None,
        },
        Library {
            identifier: "ios-arm64_x86_64-simulator",
            path: "Foo.framework",
            platform: "ios",
            architectures: &["x86_64", "arm64"],
            variant: Some("simulator"),
        },
    ]
}

/// Creates `<dir>/<name>` with an `Info.plist` listing `libraries` and a stub
/// binary inside every slice.
pub fn write_xcframework(dir: &Path, name: &str, libraries: &[Library<'_>]) -> PathBuf {
    let bundle = dir.join(name);
    fs::create_dir_all(&bundle).unwrap();

    let mut entries = Vec::new();
    for library in libraries {
        let slice = bundle.join(library.identifier).join(library.path);
        fs::create_dir_all(&slice).unwrap();
        fs::write(slice.join("Foo"), b"binary").unwrap();

        let mut entry = Dictionary::new();
        entry.insert("LibraryIdentifier".into(), Value::String(library.identifier.into()));
        entry.insert("LibraryPath".into(), Value::String(library.path.into()));
        entry.insert(
            "SupportedArchitectures".into(),
            Value::Array(
                library
                    .architectures
                    .iter()
                    .map(|a| Value::String((*a).into()))
                    .collect(),
            ),
        );
        entry.insert("SupportedPlatform".into(), Value::String(library.platform.into()));
        if let Some(variant) = library.variant {
            entry.insert("SupportedPlatformVariant".into(), Value::String(variant.into()));
        }
        entries.push(Value::Dictionary(entry));
    }

    let mut root = Dictionary::new();
    root.insert("AvailableLibraries".into(), Value::Array(entries));
    root.insert("CFBundlePackageType".into(), Value::String("XFWK".into()));
    Value::Dictionary(root)
        .to_file_xml(bundle.join("Info.plist"))
        .unwrap();

    bundle
}

/// Creates an ordinary `<dir>/<name>` framework with a versioned layout.
pub fn write_framework(dir: &Path, name: &str) -> PathBuf {
    let bundle = dir.join(name);
    let version = bundle.join("Versions").join("A");
    fs::create_dir_all(version.join("Headers")).unwrap();
    fs::write(version.join("Foo"), b"binary").unwrap();
    fs::write(version.join("Headers").join("Foo.h"), b"#import <Foundation/Foundation.h>\n").unwrap();
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink("A", bundle.join("Versions").join("Current")).unwrap();
        std::os::unix::fs::symlink("Versions/Current/Foo", bundle.join("Foo")).unwrap();
    }
    bundle
}

pub fn ios_device() -> Platform {
    Platform::new("iphoneos-arm64", "iphoneos", ["arm64"])
}

pub fn ios_simulator() -> Platform {
    Platform::new("iphonesimulator-arm64", "iphonesimulator", ["arm64"])
}

pub fn macos() -> Platform {
    Platform::new("macosx-arm64", "macosx", ["arm64"])
}

/// Family table covering the three fixture platforms.
pub fn families() -> Arc<PlatformFamilyTable> {
    let mut table = PlatformFamilyTable::new();
    table.insert("iphoneos-arm64", PlatformFamily::Ios);
    table.insert("iphonesimulator-arm64", PlatformFamily::Ios);
    table.insert("macosx-arm64", PlatformFamily::MacOs);
    Arc::new(table)
}

pub fn target(name: &str) -> BuildTarget {
    BuildTarget::new("third-party", name)
}

/// Builds a rule for `bundle` with outputs under `out_root`.
pub fn rule_with(
    name: &str,
    bundle: &Path,
    out_root: &Path,
    deps: Vec<Arc<dyn GraphNode>>,
    configure: impl FnOnce(FrameworkSettingsBuilder) -> FrameworkSettingsBuilder,
) -> PrebuiltFramework {
    let builder = FrameworkSettingsBuilder::new()
        .target(target(name))
        .bundle_path(bundle)
        .out_root(out_root);
    let settings = configure(builder).build().unwrap();
    PrebuiltFramework::new(settings, deps, families()).unwrap()
}

pub fn rule(name: &str, bundle: &Path, out_root: &Path) -> PrebuiltFramework {
    rule_with(name, bundle, out_root, Vec::new(), |b| b)
}
