//! Command line argument parsing and validation.

use crate::framework::LinkMode;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Prebuilt framework rule inspector and stager
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_prebuilt_framework",
    version,
    about = "Describe and stage prebuilt Apple frameworks and XCFrameworks",
    long_about = "Loads framework rules and platforms from a project file and answers the questions a \
native build graph asks of them: which XCFramework slice applies to a platform, what a consumer \
must pass to the linker, which framework search inputs propagate, and how the bundle is staged.

Usage:
  kodegen_prebuilt_framework slice --config frameworks.toml --target //vendor:Foo --platform iphoneos-arm64
  kodegen_prebuilt_framework link --config frameworks.toml --target //vendor:Foo --platform macosx-arm64 --link-mode shared
  kodegen_prebuilt_framework stage --config frameworks.toml"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(ClapArgs, Debug, Clone)]
pub struct ProjectArgs {
    /// Project file declaring platforms and framework rules
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "KODEGEN_FRAMEWORK_CONFIG",
        default_value = "frameworks.toml"
    )]
    pub config: PathBuf,
}

/// Target and platform selection.
#[derive(ClapArgs, Debug, Clone)]
pub struct RuleArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Framework target, e.g. //third-party/foo:Foo
    #[arg(short, long, value_name = "TARGET")]
    pub target: String,

    /// Platform flavor, e.g. iphonesimulator-arm64
    #[arg(short, long, value_name = "FLAVOR")]
    pub platform: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the XCFramework slice selected for a platform
    Slice(RuleArgs),

    /// Print the link input (JSON) a consumer receives
    Link {
        #[command(flatten)]
        rule: RuleArgs,

        /// Link mode: static, static-pic, shared
        #[arg(short, long, default_value = "static")]
        link_mode: LinkMode,

        /// Request whole-archive linking
        #[arg(long)]
        force_whole: bool,
    },

    /// Print the transitive preprocessor input (JSON) for a platform
    Preprocessor(RuleArgs),

    /// Stage one framework, or every configured framework
    Stage {
        #[command(flatten)]
        project: ProjectArgs,

        /// Only stage this target
        #[arg(short, long, value_name = "TARGET")]
        target: Option<String>,

        /// Print the planned steps without running them
        #[arg(long)]
        dry_run: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let (target, platform) = match &self.command {
            Command::Slice(rule) | Command::Preprocessor(rule) | Command::Link { rule, .. } => {
                (Some(rule.target.as_str()), Some(rule.platform.as_str()))
            }
            Command::Stage { target, .. } => (target.as_deref(), None),
        };

        if let Some(target) = target.filter(|t| !t.starts_with("//")) {
            return Err(format!(
                "Invalid target: {target}. Targets look like //path/to:name"
            ));
        }
        if platform.is_some_and(str::is_empty) {
            return Err("Platform cannot be empty".to_string());
        }

        Ok(())
    }

    /// Project file of the selected subcommand.
    pub fn config(&self) -> &PathBuf {
        match &self.command {
            Command::Slice(rule) | Command::Preprocessor(rule) | Command::Link { rule, .. } => {
                &rule.project.config
            }
            Command::Stage { project, .. } => &project.config,
        }
    }
}
