//! Installer — copies feature content from the template root into a project.
//!
//! Existing entries in the destination are never overwritten. Per-item
//! failures are reported and counted, then installation moves on.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::InstallError;
use crate::feature::{Catalogue, Content, Feature, is_contained};
use crate::graph::DependencyGraph;

/// What happened to a single content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Installed,
    AlreadyExists,
    MissingSource,
}

/// Tally of an add or remove run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub installed: usize,
    pub skipped: usize,
    pub missing: usize,
    pub removed: usize,
    pub hooks: usize,
    pub failed: usize,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Installed => self.installed += 1,
            Outcome::AlreadyExists => self.skipped += 1,
            Outcome::MissingSource => self.missing += 1,
        }
    }
}

pub struct Installer {
    template_root: PathBuf,
    destination: PathBuf,
}

impl Installer {
    pub fn new(template_root: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            template_root: template_root.into(),
            destination: destination.into(),
        }
    }

    /// Copy one template entry, `rel` being relative to both roots.
    pub fn install_item(&self, rel: &Path) -> Result<Outcome, InstallError> {
        if !is_contained(rel) {
            return Err(InstallError::OutsideProject(rel.to_path_buf()));
        }
        let src = self.template_root.join(rel);
        let dst = self.destination.join(rel);

        if !src.exists() {
            warn!("template source does not exist: {}", src.display());
            return Ok(Outcome::MissingSource);
        }
        if fs::symlink_metadata(&dst).is_ok() {
            debug!("keeping existing {}", dst.display());
            return Ok(Outcome::AlreadyExists);
        }

        if src.is_file() {
            install_file(&src, &dst)?;
        } else if src.is_dir() {
            copy_tree(&src, &dst)?;
        } else {
            return Err(InstallError::Unsupported(src));
        }
        Ok(Outcome::Installed)
    }

    /// Install every feature of `plan`, level by level.
    pub fn add(
        &self,
        plan: &DependencyGraph,
        catalogue: &Catalogue,
        out: &mut dyn Write,
    ) -> io::Result<Report> {
        let mut report = Report::default();

        for level in plan.levels() {
            for id in level {
                writeln!(out, "- adding: {id}")?;
                let Some(feature) = catalogue.get(id.as_str()) else {
                    warn!("planned feature '{id}' is not in the catalogue");
                    writeln!(out, "    ... ERROR: unknown feature: {id}")?;
                    report.failed += 1;
                    continue;
                };
                for item in &feature.content {
                    match item {
                        Content::Path(rel) => {
                            writeln!(out, "  - installing: {}", rel.display())?;
                            if let Some(dir) = self.missing_parent(rel) {
                                writeln!(out, "    ... creating directory: {}", dir.display())?;
                            }
                            match self.install_item(rel) {
                                Ok(outcome) => {
                                    let line = match outcome {
                                        Outcome::Installed => "    ... done".to_string(),
                                        Outcome::AlreadyExists => {
                                            "    ... already exists.".to_string()
                                        }
                                        Outcome::MissingSource => format!(
                                            "    ... ERROR: source does not exist: {}",
                                            self.template_root.join(rel).display()
                                        ),
                                    };
                                    writeln!(out, "{line}")?;
                                    report.record(outcome);
                                }
                                Err(e) => {
                                    writeln!(out, "    ... ERROR: {e}")?;
                                    report.failed += 1;
                                }
                            }
                        }
                        Content::Hook(hook) => {
                            writeln!(out, "  - calling: {hook}")?;
                            hook.run(out)?;
                            report.hooks += 1;
                        }
                    }
                }
            }
        }
        Ok(report)
    }

    /// Delete the path content of `features` from the destination.
    ///
    /// Dependencies are left alone since other features may still need them.
    pub fn remove(&self, features: &[&Feature], out: &mut dyn Write) -> io::Result<Report> {
        let mut report = Report::default();

        for feature in features {
            writeln!(out, "- removing: {}", feature.id)?;
            for rel in feature.paths() {
                writeln!(out, "  - deleting: {}", rel.display())?;
                match self.remove_item(rel) {
                    Ok(true) => {
                        writeln!(out, "    ... done")?;
                        report.removed += 1;
                    }
                    Ok(false) => {
                        writeln!(out, "    ... not installed.")?;
                        report.skipped += 1;
                    }
                    Err(e) => {
                        writeln!(out, "    ... ERROR: {e}")?;
                        report.failed += 1;
                    }
                }
            }
        }
        Ok(report)
    }

    /// Parent directory of `rel` that installing the file `rel` will create.
    fn missing_parent<'a>(&self, rel: &'a Path) -> Option<&'a Path> {
        let parent = rel.parent().filter(|p| !p.as_os_str().is_empty())?;
        let creates = self.template_root.join(rel).is_file()
            && fs::symlink_metadata(self.destination.join(rel)).is_err()
            && !self.destination.join(parent).exists();
        creates.then_some(parent)
    }

    /// Returns false when there was nothing to delete.
    fn remove_item(&self, rel: &Path) -> Result<bool, InstallError> {
        let dst = self.destination.join(rel);
        if !is_contained(rel) || same_dir(&dst, &self.destination) {
            return Err(InstallError::OutsideProject(dst));
        }
        let Ok(meta) = fs::symlink_metadata(&dst) else {
            return Ok(false);
        };
        let result = if meta.is_dir() {
            fs::remove_dir_all(&dst)
        } else {
            fs::remove_file(&dst)
        };
        result.map_err(|e| InstallError::io(&dst, e))?;
        debug!("removed {}", dst.display());
        Ok(true)
    }
}

fn install_file(src: &Path, dst: &Path) -> Result<(), InstallError> {
    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            debug!("creating directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| InstallError::io(parent, e))?;
        }
    }
    fs::copy(src, dst).map_err(|e| InstallError::io(dst, e))?;
    debug!("copied {} -> {}", src.display(), dst.display());
    Ok(())
}

/// Recursive copy that merges into existing directories and keeps existing files.
fn copy_tree(src: &Path, dst: &Path) -> Result<(), InstallError> {
    fs::create_dir_all(dst).map_err(|e| InstallError::io(dst, e))?;

    let entries = fs::read_dir(src).map_err(|e| InstallError::io(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| InstallError::io(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        // Follows symlinks like `install_item` does, without opening the entry.
        let meta = fs::metadata(&from).map_err(|e| InstallError::io(&from, e))?;
        if meta.is_dir() {
            copy_tree(&from, &to)?;
        } else if !meta.is_file() {
            return Err(InstallError::Unsupported(from));
        } else if fs::symlink_metadata(&to).is_ok() {
            debug!("keeping existing {}", to.display());
        } else {
            fs::copy(&from, &to).map_err(|e| InstallError::io(&to, e))?;
        }
    }
    Ok(())
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_install.rs"]
mod tests;
