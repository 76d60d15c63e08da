//! Runtime configuration for a `ptc` run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CatalogueError;
use crate::feature::Catalogue;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the template entries.
    pub template_root: PathBuf,
    /// Project directory features are installed into.
    pub destination: PathBuf,
    /// JSON catalogue to use instead of the built-in one.
    pub catalogue: Option<PathBuf>,
}

impl Config {
    pub fn new(template_root: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
            destination: destination.into(),
            catalogue: None,
        }
    }

    pub fn with_catalogue(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalogue = Some(path.into());
        self
    }

    /// True when the destination is the template root itself.
    pub fn is_dangerous(&self) -> bool {
        same_dir(&self.template_root, &self.destination)
    }

    pub fn catalogue(&self) -> Result<Catalogue, CatalogueError> {
        match &self.catalogue {
            Some(path) => Catalogue::load(path),
            None => Ok(Catalogue::builtin()),
        }
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
