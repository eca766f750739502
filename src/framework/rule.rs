//! The prebuilt framework rule.

use super::{
    BuildRule, BuildTarget, BuildableContext, FrameworkRef, FrameworkSettings, GraphNode,
    LinkCacheKey, LinkInput, LinkMode, Linkage, NativeLinkable, Platform, PlatformFamilyLookup,
    PlatformFilter, PreprocessorDep, PreprocessorInput, Result, Step, TransitivePreprocessorInput,
    cache::MemoCache,
    error::{Context, Error},
    link::rpath_args,
    preprocessor::collect_transitive_input,
    xcframework,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

/// A precompiled `.framework` or `.xcframework` bundle in the build graph.
///
/// The rule copies the bundle into its generated-output directory and describes
/// it to consumers: which platforms it supports, which frameworks and linker flags
/// a dependent must use, and where the staged slice lives. Link and transitive
/// preprocessor inputs are computed once per key and shared by all graph workers.
pub struct PrebuiltFramework {
    settings: FrameworkSettings,
    /// `<gen path of target>/<bundle file name>`
    output_path: PathBuf,
    framework_name: String,
    is_xcframework: bool,
    filter: PlatformFilter,
    deps: Vec<Arc<dyn GraphNode>>,
    families: Arc<dyn PlatformFamilyLookup>,
    link_cache: MemoCache<LinkCacheKey, LinkInput>,
    preprocessor_cache: MemoCache<String, TransitivePreprocessorInput>,
}

impl fmt::Debug for PrebuiltFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrebuiltFramework")
            .field("target", self.settings.target())
            .field("output_path", &self.output_path)
            .field("is_xcframework", &self.is_xcframework)
            .field("filter", &self.filter.pattern())
            .field(
                "deps",
                &self.deps.iter().map(|d| d.target()).collect::<Vec<_>>(),
            )
            .field("link_cache", &self.link_cache)
            .field("preprocessor_cache", &self.preprocessor_cache)
            .finish()
    }
}

impl PrebuiltFramework {
    /// Creates the rule.
    ///
    /// # Arguments
    /// * `settings` - Bundle location, exported frameworks/flags and platform pattern
    /// * `deps` - Declared dependencies
    /// * `families` - Toolchain family table used to choose rpath layouts
    ///
    /// # Errors
    ///
    /// Fails if the bundle path has no file name or the platform pattern is invalid.
    pub fn new(
        settings: FrameworkSettings,
        deps: Vec<Arc<dyn GraphNode>>,
        families: Arc<dyn PlatformFamilyLookup>,
    ) -> Result<Self> {
        let framework_name = settings
            .bundle_path()
            .file_name()
            .context(format!(
                "{}: bundle path {} has no file name",
                settings.target(),
                settings.bundle_path().display()
            ))?
            .to_string_lossy()
            .into_owned();
        let output_path = settings
            .target()
            .gen_path(settings.out_root())
            .join(&framework_name);
        let is_xcframework = xcframework::is_xcframework(settings.bundle_path());
        let filter = PlatformFilter::new(settings.supported_platforms_regex())?;

        Ok(Self {
            settings,
            output_path,
            framework_name,
            is_xcframework,
            filter,
            deps,
            families,
            link_cache: MemoCache::new(),
            preprocessor_cache: MemoCache::new(),
        })
    }

    pub fn target(&self) -> &BuildTarget {
        self.settings.target()
    }

    pub fn settings(&self) -> &FrameworkSettings {
        &self.settings
    }

    /// Where the bundle is staged.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_xcframework(&self) -> bool {
        self.is_xcframework
    }

    pub fn deps(&self) -> &[Arc<dyn GraphNode>] {
        &self.deps
    }

    /// Whether this framework contributes anything on `platform`.
    pub fn supports(&self, platform: &Platform) -> bool {
        self.filter.supports(platform)
    }

    /// Slice of the XCFramework matching `platform`, relative to the bundle root.
    ///
    /// Empty for ordinary frameworks, a missing manifest, or no matching slice.
    pub fn resolve_slice(&self, platform: &Platform) -> Result<String> {
        if !self.is_xcframework {
            return Ok(String::new());
        }
        xcframework::resolve_slice(self.settings.bundle_path(), platform)
    }

    /// Path consumers reference for `platform`.
    ///
    /// Ordinary frameworks resolve to the staged output itself. XCFrameworks resolve
    /// to the staged slice and fail with [`Error::NoSliceForPlatform`] when the
    /// manifest has none.
    pub fn declared_output(&self, platform: &Platform) -> Result<PathBuf> {
        if !self.is_xcframework {
            return Ok(self.output_path.clone());
        }

        let slice = self.resolve_slice(platform)?;
        if slice.is_empty() {
            return Err(Error::NoSliceForPlatform {
                target: self.target().to_string(),
                bundle: self.settings.bundle_path().to_path_buf(),
                platform: platform.flavor().to_string(),
            });
        }
        Ok(self.output_path.join(slice))
    }

    /// Public frameworks plus the staged framework itself.
    fn exported_frameworks(&self, platform: &Platform) -> Result<BTreeSet<FrameworkRef>> {
        let mut frameworks = self.settings.frameworks().clone();
        frameworks.insert(FrameworkRef::path(self.declared_output(platform)?));
        Ok(frameworks)
    }

    fn link_input_uncached(&self, platform: &Platform, link_mode: LinkMode) -> Result<LinkInput> {
        if !self.supports(platform) {
            return Ok(LinkInput::empty());
        }

        log::debug!(
            "{}: computing {} link input for {}",
            self.target(),
            link_mode,
            platform
        );

        let mut args = self.settings.exported_linker_flags(platform);
        let frameworks = self.exported_frameworks(platform)?;

        if link_mode == LinkMode::Shared {
            args.extend(rpath_args(platform, self.families.as_ref()));
        }

        Ok(LinkInput::new(args, frameworks, BTreeSet::new()))
    }
}

impl GraphNode for PrebuiltFramework {
    fn target(&self) -> &BuildTarget {
        self.settings.target()
    }

    fn as_preprocessor_dep(&self) -> Option<&dyn PreprocessorDep> {
        Some(self)
    }

    fn as_native_linkable(&self) -> Option<&dyn NativeLinkable> {
        Some(self)
    }
}

impl BuildRule for PrebuiltFramework {
    /// Stages the bundle: create the parent directory, clear old output, then copy.
    ///
    /// The bundle is copied rather than linked so the output stays an ordinary
    /// directory when archived and unpacked on another machine.
    fn build_steps(&self, context: &mut BuildableContext) -> Vec<Step> {
        let parent = self
            .output_path
            .parent()
            .unwrap_or_else(|| self.settings.out_root())
            .to_path_buf();

        let steps = vec![
            Step::Mkdir { path: parent },
            Step::RemoveRecursive {
                path: self.output_path.clone(),
            },
            Step::CopyContents {
                from: self.settings.bundle_path().to_path_buf(),
                to: self.output_path.clone(),
            },
        ];

        context.record_artifact(&self.output_path, self.is_cacheable());
        steps
    }

    fn output_name(&self) -> String {
        self.framework_name.clone()
    }

    /// Always false.
    ///
    /// Framework bundles contain symbolic links that do not survive an artifact
    /// cache round trip; the restored copy holds duplicate resources and fails
    /// `codesign` validation.
    fn is_cacheable(&self) -> bool {
        false
    }
}

impl PreprocessorDep for PrebuiltFramework {
    fn preprocessor_deps(&self, platform: &Platform) -> Vec<&dyn PreprocessorDep> {
        if !self.supports(platform) {
            return Vec::new();
        }
        self.deps
            .iter()
            .filter_map(|dep| dep.as_preprocessor_dep())
            .collect()
    }

    fn preprocessor_input(&self, platform: &Platform) -> Result<PreprocessorInput> {
        if !self.supports(platform) {
            return Ok(PreprocessorInput::empty());
        }
        Ok(PreprocessorInput::new(self.exported_frameworks(platform)?))
    }

    fn transitive_preprocessor_input(
        &self,
        platform: &Platform,
    ) -> Result<Arc<TransitivePreprocessorInput>> {
        self.preprocessor_cache
            .get_or_try_compute(platform.flavor().to_string(), || {
                collect_transitive_input(self, platform)
            })
    }
}

impl NativeLinkable for PrebuiltFramework {
    fn native_linkable_deps(&self) -> Vec<&dyn NativeLinkable> {
        self.deps
            .iter()
            .filter_map(|dep| dep.as_native_linkable())
            .collect()
    }

    fn native_linkable_deps_for_platform(&self, platform: &Platform) -> Vec<&dyn NativeLinkable> {
        if !self.supports(platform) {
            return Vec::new();
        }
        self.native_linkable_deps()
    }

    fn native_linkable_exported_deps(&self) -> Vec<&dyn NativeLinkable> {
        Vec::new()
    }

    /// `force_whole` keys the cache but does not change a framework's contribution.
    fn native_link_input(
        &self,
        platform: &Platform,
        link_mode: LinkMode,
        force_whole: bool,
    ) -> Result<Arc<LinkInput>> {
        self.link_cache
            .get_or_try_compute(LinkCacheKey::new(platform, link_mode, force_whole), || {
                self.link_input_uncached(platform, link_mode)
            })
    }

    fn preferred_linkage(&self, _platform: &Platform) -> Linkage {
        self.settings.preferred_linkage()
    }

    fn shared_libraries(&self, _platform: &Platform) -> Result<BTreeMap<String, PathBuf>> {
        Ok(BTreeMap::new())
    }
}
