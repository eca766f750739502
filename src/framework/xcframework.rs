//! XCFramework manifest inspection and slice selection.
//!
//! An `.xcframework` directory holds one slice per platform variant, each described
//! by an entry of the `AvailableLibraries` array in its top-level `Info.plist`:
//!
//! ```xml
//! <dict>
//!     <key>LibraryIdentifier</key>      <string>ios-arm64_x86_64-simulator</string>
//!     <key>LibraryPath</key>            <string>Foo.framework</string>
//!     <key>SupportedArchitectures</key> <array><string>arm64</string><string>x86_64</string></array>
//!     <key>SupportedPlatform</key>      <string>ios</string>
//!     <key>SupportedPlatformVariant</key> <string>simulator</string>
//! </dict>
//! ```
//!
//! Entries are scanned in manifest order and the first one that names the platform,
//! lists one of its architectures and agrees on simulator-ness wins.

use crate::framework::{
    Platform,
    error::{Error, ErrorExt, Result},
};
use plist::{Dictionary, Value};
use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

/// Manifest file name at the root of an XCFramework.
pub const MANIFEST_FILE_NAME: &str = "Info.plist";

/// Directory extension marking a multi-platform bundle.
pub const XCFRAMEWORK_EXTENSION: &str = "xcframework";

const AVAILABLE_LIBRARIES: &str = "AvailableLibraries";
const LIBRARY_IDENTIFIER: &str = "LibraryIdentifier";
const LIBRARY_PATH: &str = "LibraryPath";
const SUPPORTED_ARCHITECTURES: &str = "SupportedArchitectures";
const SIMULATOR_VARIANT: &str = "simulator";

/// Whether a bundle path names an XCFramework.
pub fn is_xcframework(bundle: &Path) -> bool {
    bundle
        .extension()
        .is_some_and(|ext| ext == XCFRAMEWORK_EXTENSION)
}

/// Parsed `Info.plist` of an XCFramework.
#[derive(Clone, Debug)]
pub struct XcFrameworkManifest {
    path: PathBuf,
    root: Value,
}

impl XcFrameworkManifest {
    /// Reads `<bundle>/Info.plist`.
    ///
    /// Returns `Ok(None)` when the manifest does not exist, and
    /// [`Error::CorruptManifest`] when it exists but cannot be parsed.
    pub fn load(bundle: &Path) -> Result<Option<Self>> {
        let path = bundle.join(MANIFEST_FILE_NAME);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).fs_context("failed to open XCFramework manifest", &path),
        };

        let root = Value::from_reader(BufReader::new(file)).map_err(|source| {
            Error::CorruptManifest {
                path: path.clone(),
                source,
            }
        })?;

        Ok(Some(Self { path, root }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Dictionary entries of `AvailableLibraries`, in manifest order.
    ///
    /// Non-dictionary entries are skipped.
    pub fn libraries(&self) -> impl Iterator<Item = &Dictionary> {
        self.root
            .as_dictionary()
            .and_then(|root| root.get(AVAILABLE_LIBRARIES))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_dictionary)
    }

    /// Relative `<LibraryIdentifier>/<LibraryPath>` of the slice for `platform`.
    pub fn slice_for(&self, platform: &Platform) -> Option<String> {
        let platform_name = platform.canonical_name();

        for library in self.libraries() {
            if !contains_value(library, platform_name) {
                continue;
            }
            let Some(supported) = library
                .get(SUPPORTED_ARCHITECTURES)
                .and_then(Value::as_array)
            else {
                continue;
            };
            // The variant applies to the whole entry, so checking it once before the
            // architecture scan is equivalent to checking it per architecture.
            if contains_value(library, SIMULATOR_VARIANT) != platform.is_simulator() {
                continue;
            }

            let arch_matches = platform
                .architectures()
                .iter()
                .any(|arch| supported.iter().any(|s| s.as_string() == Some(arch.as_str())));
            if !arch_matches {
                continue;
            }

            match (
                string_field(library, LIBRARY_IDENTIFIER),
                string_field(library, LIBRARY_PATH),
            ) {
                (Some(identifier), Some(library_path)) => {
                    return Some(format!("{identifier}/{library_path}"));
                }
                _ => {
                    log::debug!(
                        "{}: library entry for {} lacks {} or {}, skipping",
                        self.path.display(),
                        platform,
                        LIBRARY_IDENTIFIER,
                        LIBRARY_PATH
                    );
                }
            }
        }

        None
    }
}

/// Resolves the slice of `bundle` matching `platform`.
///
/// A missing manifest is logged and yields an empty string, as does a manifest
/// without a matching entry. Callers that need a concrete slice must treat the
/// empty string as "no slice for this platform".
pub fn resolve_slice(bundle: &Path, platform: &Platform) -> Result<String> {
    let Some(manifest) = XcFrameworkManifest::load(bundle)? else {
        log::warn!(
            "Could not open XCFramework manifest {}, ignoring",
            bundle.join(MANIFEST_FILE_NAME).display()
        );
        return Ok(String::new());
    };

    let slice = manifest.slice_for(platform).unwrap_or_default();
    log::debug!(
        "Resolved slice `{}` of {} for {}",
        slice,
        bundle.display(),
        platform
    );
    Ok(slice)
}

fn contains_value(dict: &Dictionary, needle: &str) -> bool {
    dict.values().any(|v| v.as_string() == Some(needle))
}

fn string_field<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a str> {
    dict.get(key).and_then(Value::as_string)
}
