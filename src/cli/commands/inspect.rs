//! Read-only queries against a configured framework rule.

use crate::cli::RuleArgs;
use crate::config::Project;
use crate::error::Result;
use crate::framework::{LinkMode, NativeLinkable, PreprocessorDep};

/// Prints the XCFramework slice chosen for the platform.
///
/// Prints an empty line for ordinary frameworks and for platforms without a slice.
pub fn print_slice(project: &Project, args: &RuleArgs) -> Result<()> {
    let rule = project.rule(&args.target)?;
    let platform = project.platform(&args.platform)?;

    let slice = rule.resolve_slice(platform)?;
    if slice.is_empty() && rule.is_xcframework() {
        log::warn!("{}: no slice for {}", rule.target(), platform);
    }
    println!("{slice}");
    Ok(())
}

/// Prints the link input as pretty JSON.
pub fn print_link_input(
    project: &Project,
    args: &RuleArgs,
    link_mode: LinkMode,
    force_whole: bool,
) -> Result<()> {
    let rule = project.rule(&args.target)?;
    let platform = project.platform(&args.platform)?;

    let input = rule.native_link_input(platform, link_mode, force_whole)?;
    println!("{}", serde_json::to_string_pretty(&*input)?);
    Ok(())
}

/// Prints the transitive preprocessor input as pretty JSON keyed by target.
pub fn print_preprocessor_input(project: &Project, args: &RuleArgs) -> Result<()> {
    let rule = project.rule(&args.target)?;
    let platform = project.platform(&args.platform)?;

    let inputs = rule.transitive_preprocessor_input(platform)?;
    println!("{}", serde_json::to_string_pretty(&*inputs)?);
    Ok(())
}
