//! Project configuration: platforms and framework rules from a TOML file.
//!
//! ```toml
//! out_root = "buck-out"
//!
//! [[platform]]
//! flavor = "macosx-arm64"
//! sdk = "macosx"
//! architectures = ["arm64"]
//!
//! [[framework]]
//! target = "//third-party/foo:Foo"
//! path = "vendor/Foo.xcframework"
//! preferred_linkage = "shared"
//! frameworks = ["$SDKROOT/System/Library/Frameworks/Foundation.framework"]
//! exported_linker_flags = ["-ObjC"]
//! deps = ["//third-party/bar:Bar"]
//! ```
//!
//! Relative paths resolve against the directory holding the file.

use crate::error::{CliError, FrameworkToolError, Result};
use crate::framework::{
    BuildTarget, FrameworkRef, FrameworkSettingsBuilder, GraphNode, Linkage, Platform,
    PlatformFamily, PlatformFamilyTable, PrebuiltFramework,
};
use serde::Deserialize;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::{Path, PathBuf},
    sync::Arc,
};

/// Toolchain platform entry (`[[platform]]`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlatformEntry {
    flavor: String,
    sdk: String,
    architectures: Vec<String>,
    /// Overrides the family derived from `sdk`.
    #[serde(default)]
    family: Option<PlatformFamily>,
    /// Overrides the simulator flag derived from `sdk`.
    #[serde(default)]
    simulator: Option<bool>,
}

/// Framework rule entry (`[[framework]]`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrameworkEntry {
    target: String,
    path: PathBuf,
    #[serde(default)]
    preferred_linkage: Linkage,
    #[serde(default)]
    frameworks: Vec<String>,
    #[serde(default)]
    supported_platforms_regex: Option<String>,
    #[serde(default)]
    exported_linker_flags: Vec<String>,
    /// `[pattern, [flags...]]` pairs, applied in order.
    #[serde(default)]
    exported_platform_linker_flags: Vec<(String, Vec<String>)>,
    #[serde(default)]
    deps: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectFile {
    #[serde(default = "default_out_root")]
    out_root: PathBuf,
    #[serde(default, rename = "platform")]
    platforms: Vec<PlatformEntry>,
    #[serde(default, rename = "framework")]
    frameworks: Vec<FrameworkEntry>,
}

fn default_out_root() -> PathBuf {
    PathBuf::from("buck-out")
}

/// Fully constructed project: platforms, family table and wired rules.
#[derive(Debug)]
pub struct Project {
    out_root: PathBuf,
    platforms: Vec<Platform>,
    families: Arc<PlatformFamilyTable>,
    rules: BTreeMap<BuildTarget, Arc<PrebuiltFramework>>,
}

impl Project {
    pub fn out_root(&self) -> &Path {
        &self.out_root
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn families(&self) -> &PlatformFamilyTable {
        &self.families
    }

    /// Platform with the given flavor.
    pub fn platform(&self, flavor: &str) -> Result<&Platform> {
        self.platforms
            .iter()
            .find(|p| p.flavor() == flavor)
            .ok_or_else(|| {
                FrameworkToolError::Cli(CliError::InvalidArguments {
                    reason: format!(
                        "Unknown platform: {flavor}. Configured platforms: {}",
                        self.platforms
                            .iter()
                            .map(Platform::flavor)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                })
            })
    }

    /// Rule for a target string such as `//third-party/foo:Foo`.
    pub fn rule(&self, target: &str) -> Result<&Arc<PrebuiltFramework>> {
        let target: BuildTarget = target.parse()?;
        self.rules.get(&target).ok_or_else(|| {
            FrameworkToolError::Cli(CliError::InvalidArguments {
                reason: format!("Unknown framework target: {target}"),
            })
        })
    }

    /// All rules, ordered by target.
    pub fn rules(&self) -> impl Iterator<Item = &Arc<PrebuiltFramework>> {
        self.rules.values()
    }
}

/// Loads a project file from disk.
pub fn load_project(config_path: &Path) -> Result<Project> {
    let contents = std::fs::read_to_string(config_path).map_err(|e| {
        FrameworkToolError::Cli(CliError::ExecutionFailed {
            command: "read_config".to_string(),
            reason: format!("Failed to read {}: {}", config_path.display(), e),
        })
    })?;

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    parse_project(&contents, base_dir)
}

/// Parses project TOML, resolving relative paths against `base_dir`.
pub fn parse_project(contents: &str, base_dir: &Path) -> Result<Project> {
    let file: ProjectFile = toml::from_str(contents)?;

    let out_root = base_dir.join(&file.out_root);

    let platforms: Vec<Platform> = file
        .platforms
        .into_iter()
        .map(|entry| {
            let mut platform = Platform::new(entry.flavor, entry.sdk, entry.architectures);
            if let Some(family) = entry.family {
                platform = platform.with_family(family);
            }
            if let Some(simulator) = entry.simulator {
                platform = platform.with_simulator(simulator);
            }
            platform
        })
        .collect();

    let mut seen = HashSet::new();
    for platform in &platforms {
        if !seen.insert(platform.flavor()) {
            return Err(FrameworkToolError::config(format!(
                "duplicate platform flavor `{}`",
                platform.flavor()
            )));
        }
    }

    let families = Arc::new(PlatformFamilyTable::from_platforms(&platforms));

    let mut entries = HashMap::new();
    let mut order = Vec::new();
    for entry in file.frameworks {
        let target: BuildTarget = entry.target.parse()?;
        if entries.contains_key(&target) {
            return Err(FrameworkToolError::config(format!(
                "duplicate framework target `{target}`"
            )));
        }
        order.push(target.clone());
        entries.insert(target, entry);
    }

    let mut wiring = RuleWiring {
        entries: &entries,
        base_dir,
        out_root: &out_root,
        families: &families,
        built: BTreeMap::new(),
        visiting: Vec::new(),
    };
    for target in &order {
        wiring.build(target)?;
    }
    let rules = wiring.built;

    log::debug!(
        "Loaded {} platforms and {} framework rules",
        platforms.len(),
        rules.len()
    );

    Ok(Project {
        out_root,
        platforms,
        families,
        rules,
    })
}

/// Constructs rules dependencies-first so each rule receives its built deps.
struct RuleWiring<'a> {
    entries: &'a HashMap<BuildTarget, FrameworkEntry>,
    base_dir: &'a Path,
    out_root: &'a Path,
    families: &'a Arc<PlatformFamilyTable>,
    built: BTreeMap<BuildTarget, Arc<PrebuiltFramework>>,
    visiting: Vec<BuildTarget>,
}

impl RuleWiring<'_> {
    fn build(&mut self, target: &BuildTarget) -> Result<Arc<PrebuiltFramework>> {
        if let Some(rule) = self.built.get(target) {
            return Ok(rule.clone());
        }
        if self.visiting.contains(target) {
            let cycle = self
                .visiting
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(FrameworkToolError::config(format!(
                "dependency cycle: {cycle} -> {target}"
            )));
        }
        let entries = self.entries;
        let entry = entries.get(target).ok_or_else(|| {
            FrameworkToolError::config(format!("unknown dependency `{target}`"))
        })?;

        self.visiting.push(target.clone());
        let mut deps: Vec<Arc<dyn GraphNode>> = Vec::with_capacity(entry.deps.len());
        for dep in &entry.deps {
            let dep_target: BuildTarget = dep.parse()?;
            deps.push(self.build(&dep_target)?);
        }
        self.visiting.pop();

        let mut builder = FrameworkSettingsBuilder::new()
            .target(target.clone())
            .bundle_path(self.base_dir.join(&entry.path))
            .out_root(self.out_root)
            .preferred_linkage(entry.preferred_linkage)
            .frameworks(entry.frameworks.iter().map(|f| resolve_framework_ref(f, self.base_dir)))
            .exported_linker_flags(entry.exported_linker_flags.clone());
        for (pattern, flags) in &entry.exported_platform_linker_flags {
            builder = builder.exported_platform_linker_flags(pattern.clone(), flags.clone());
        }
        if let Some(pattern) = &entry.supported_platforms_regex {
            builder = builder.supported_platforms_regex(pattern.clone());
        }

        let families: Arc<dyn crate::framework::PlatformFamilyLookup> = self.families.clone();
        let rule = Arc::new(PrebuiltFramework::new(builder.build()?, deps, families)?);
        self.built.insert(target.clone(), rule.clone());
        Ok(rule)
    }
}

/// Source-tree references pass through; relative paths resolve against `base_dir`.
fn resolve_framework_ref(raw: &str, base_dir: &Path) -> FrameworkRef {
    match raw.parse::<FrameworkRef>() {
        Ok(FrameworkRef::Path(path)) if path.is_relative() => {
            FrameworkRef::Path(base_dir.join(path))
        }
        Ok(framework) => framework,
        Err(never) => match never {},
    }
}
