//! Error types for catalogue loading, dependency resolution and installation.

use std::io;
use std::path::PathBuf;

/// Problems with a feature catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("cannot read catalogue '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed catalogue: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid feature id: '{0}'")]
    InvalidId(String),

    #[error("duplicate feature: {0}")]
    Duplicate(String),

    #[error("feature '{feature}' has an invalid content path: '{path}'")]
    InvalidPath { feature: String, path: String },

    #[error("feature '{feature}' depends on unknown feature '{dependency}'")]
    UnknownDependency { feature: String, dependency: String },
}

/// Problems turning a feature request into an install plan.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown feature: {}", .0.join(", "))]
    UnknownFeatures(Vec<String>),

    #[error("dependency cycle involving feature '{0}'")]
    DependencyCycle(String),
}

/// Problems copying or removing template content.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to handle source: {}", .0.display())]
    Unsupported(PathBuf),

    #[error("refusing to touch '{}': not inside the project directory", .0.display())]
    OutsideProject(PathBuf),
}

impl InstallError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Top-level error for a `ptc` run.
#[derive(Debug, thiserror::Error)]
pub enum PtcError {
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error("refusing to modify the template directory '{}'", .0.display())]
    DangerousDirectory(PathBuf),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error("{failed} item(s) could not be processed")]
    Incomplete { failed: usize },
}

pub type Result<T, E = PtcError> = std::result::Result<T, E>;
