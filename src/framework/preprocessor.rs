//! Preprocessor inputs and their transitive aggregation over the dependency graph.

use super::{BuildTarget, FrameworkRef, Platform, PreprocessorDep, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Compiler search inputs a dependency exposes to its consumers.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PreprocessorInput {
    /// Frameworks to add to the framework search path.
    pub frameworks: BTreeSet<FrameworkRef>,
}

impl PreprocessorInput {
    pub fn new(frameworks: BTreeSet<FrameworkRef>) -> Self {
        Self { frameworks }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

/// Preprocessor inputs of a node and everything it depends on, keyed by target.
pub type TransitivePreprocessorInput = BTreeMap<BuildTarget, PreprocessorInput>;

/// Collects `node`'s own input and the transitive inputs of its preprocessor deps.
///
/// Dependencies are asked for their own (usually cached) transitive maps, so a
/// diamond in the graph is walked once per node and platform.
pub fn collect_transitive_input(
    node: &dyn PreprocessorDep,
    platform: &Platform,
) -> Result<TransitivePreprocessorInput> {
    let mut inputs = TransitivePreprocessorInput::new();
    inputs.insert(node.target().clone(), node.preprocessor_input(platform)?);

    for dep in node.preprocessor_deps(platform) {
        let dep_inputs = dep.transitive_preprocessor_input(platform)?;
        inputs.extend(
            dep_inputs
                .iter()
                .map(|(target, input)| (target.clone(), input.clone())),
        );
    }

    Ok(inputs)
}
