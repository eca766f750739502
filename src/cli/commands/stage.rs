//! Staging of configured frameworks into the output root.

use crate::config::Project;
use crate::error::Result;
use crate::framework::{BuildRule, BuildableContext, staging::execute_steps};

/// Plans and runs the staging steps of one target, or of every configured target.
pub async fn stage(project: &Project, target: Option<&str>, dry_run: bool) -> Result<()> {
    let rules = match target {
        Some(target) => vec![project.rule(target)?],
        None => project.rules().collect(),
    };

    for rule in rules {
        let mut context = BuildableContext::new();
        let steps = rule.build_steps(&mut context);

        if dry_run {
            for step in &steps {
                println!("{step}");
            }
            continue;
        }

        log::info!("Staging {} ({} steps)", rule.target(), steps.len());
        execute_steps(&steps).await?;

        for artifact in context.artifacts() {
            println!(
                "{} {}{}",
                rule.target(),
                artifact.path.display(),
                if artifact.cacheable { "" } else { " (not cacheable)" }
            );
        }
    }

    Ok(())
}
