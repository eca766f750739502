//! Capabilities a rule exposes to the build graph.
//!
//! Rules implement only the capabilities they have. Graph code discovers them
//! through [`GraphNode`] instead of downcasting.

use super::{
    BuildTarget, BuildableContext, LinkInput, LinkMode, Linkage, Platform, PreprocessorInput,
    Result, Step, TransitivePreprocessorInput,
};
use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

/// A node in the dependency graph.
pub trait GraphNode: Send + Sync {
    fn target(&self) -> &BuildTarget;

    fn as_preprocessor_dep(&self) -> Option<&dyn PreprocessorDep> {
        None
    }

    fn as_native_linkable(&self) -> Option<&dyn NativeLinkable> {
        None
    }
}

/// A node that produces files through build steps.
pub trait BuildRule: GraphNode {
    /// Ordered steps producing the rule's output. Artifacts are recorded in `context`.
    fn build_steps(&self, context: &mut BuildableContext) -> Vec<Step>;

    /// File name of the produced output.
    fn output_name(&self) -> String;

    /// Whether the output may be stored in and fetched from a shared artifact cache.
    fn is_cacheable(&self) -> bool {
        true
    }
}

/// A node contributing compiler search inputs to its consumers.
pub trait PreprocessorDep: GraphNode {
    /// Dependencies whose inputs propagate through this node on `platform`.
    fn preprocessor_deps(&self, platform: &Platform) -> Vec<&dyn PreprocessorDep>;

    /// This node's own contribution.
    fn preprocessor_input(&self, platform: &Platform) -> Result<PreprocessorInput>;

    /// This node's contribution plus those of everything upstream.
    fn transitive_preprocessor_input(
        &self,
        platform: &Platform,
    ) -> Result<Arc<TransitivePreprocessorInput>>;
}

/// A node contributing to native link lines.
pub trait NativeLinkable: GraphNode {
    fn native_linkable_deps(&self) -> Vec<&dyn NativeLinkable>;

    fn native_linkable_deps_for_platform(&self, platform: &Platform) -> Vec<&dyn NativeLinkable>;

    fn native_linkable_exported_deps(&self) -> Vec<&dyn NativeLinkable>;

    fn native_link_input(
        &self,
        platform: &Platform,
        link_mode: LinkMode,
        force_whole: bool,
    ) -> Result<Arc<LinkInput>>;

    fn preferred_linkage(&self, platform: &Platform) -> Linkage;

    /// Shared libraries to package next to a consumer, keyed by soname.
    fn shared_libraries(&self, platform: &Platform) -> Result<BTreeMap<String, PathBuf>>;
}
