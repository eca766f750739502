//! Build steps and artifact bookkeeping for staging a prebuilt bundle.

use super::{
    Result,
    error::Error,
    utils::fs,
};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// One filesystem operation of a rule's build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Create a directory and its parents.
    Mkdir { path: PathBuf },
    /// Remove a file or directory tree; absence is fine.
    RemoveRecursive { path: PathBuf },
    /// Copy the contents of one directory into another.
    CopyContents { from: PathBuf, to: PathBuf },
}

impl Step {
    /// Short name of the operation.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Mkdir { .. } => "mkdir",
            Self::RemoveRecursive { .. } => "rm",
            Self::CopyContents { .. } => "cp",
        }
    }

    /// Runs the step.
    ///
    /// Failures are reported as [`Error::StepFailed`] carrying the step description.
    pub async fn execute(&self) -> Result<()> {
        log::debug!("Executing step: {self}");

        let result = match self {
            Self::Mkdir { path } => fs::create_dir_all(path).await,
            Self::RemoveRecursive { path } => fs::remove_all(path).await,
            Self::CopyContents { from, to } => fs::copy_dir_contents(from, to).await,
        };

        result.map_err(|source| Error::StepFailed {
            step: self.to_string(),
            source: Box::new(source),
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mkdir { path } => write!(f, "mkdir -p {}", path.display()),
            Self::RemoveRecursive { path } => write!(f, "rm -rf {}", path.display()),
            Self::CopyContents { from, to } => {
                write!(f, "cp -R {}/. {}", from.display(), to.display())
            }
        }
    }
}

/// Runs steps in order, stopping at the first failure.
pub async fn execute_steps(steps: &[Step]) -> Result<()> {
    for step in steps {
        step.execute().await?;
    }
    Ok(())
}

/// An output a rule declared while producing its build steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedArtifact {
    pub path: PathBuf,
    /// Whether the artifact may go to a shared artifact cache.
    pub cacheable: bool,
}

/// Collects the artifacts rules record while producing build steps.
#[derive(Clone, Debug, Default)]
pub struct BuildableContext {
    artifacts: Vec<RecordedArtifact>,
}

impl BuildableContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_artifact(&mut self, path: impl AsRef<Path>, cacheable: bool) {
        self.artifacts.push(RecordedArtifact {
            path: path.as_ref().to_path_buf(),
            cacheable,
        });
    }

    pub fn artifacts(&self) -> &[RecordedArtifact] {
        &self.artifacts
    }
}
