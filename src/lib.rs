//! ptc — project template creator.
//!
//! Installs template "features" (build scripts, docs setup, coverage
//! config, …) into a project directory, pulling in whatever each feature
//! depends on first.
//!
//! Public API: `list_features()`, `add_features()`, `remove_features()`.

pub mod config;
pub mod dummy;
pub mod error;
pub mod feature;
pub mod graph;
pub mod install;

use std::io::Write;

use log::info;

pub use config::Config;
pub use dummy::Dummy;
pub use error::{PtcError, Result};
pub use feature::{Catalogue, Feature, FeatureId};
pub use graph::DependencyGraph;
pub use install::{Installer, Report};

/// Print every feature of the catalogue, in catalogue order.
pub fn list_features(catalogue: &Catalogue, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Features:")?;
    for feature in catalogue.iter() {
        writeln!(out, "- {}", feature.id)?;
    }
    Ok(())
}

/// Install `requested` and their dependencies into `config.destination`.
pub fn add_features<S: AsRef<str>>(
    config: &Config,
    requested: &[S],
    out: &mut dyn Write,
) -> Result<Report> {
    guard(config)?;
    let catalogue = config.catalogue()?;
    writeln!(out, "add features")?;

    let plan = DependencyGraph::resolve(&catalogue, requested)?;
    let installer = Installer::new(&config.template_root, &config.destination);
    let report = installer.add(&plan, &catalogue, out)?;
    info!("add finished: {report:?}");
    finish(report)
}

/// Delete the content of `requested` from `config.destination`.
pub fn remove_features<S: AsRef<str>>(
    config: &Config,
    requested: &[S],
    out: &mut dyn Write,
) -> Result<Report> {
    guard(config)?;
    let catalogue = config.catalogue()?;
    catalogue.check_known(requested)?;
    writeln!(out, "remove features")?;

    let features: Vec<&Feature> = requested
        .iter()
        .filter_map(|id| catalogue.get(id.as_ref()))
        .collect();
    let installer = Installer::new(&config.template_root, &config.destination);
    let report = installer.remove(&features, out)?;
    info!("remove finished: {report:?}");
    finish(report)
}

fn guard(config: &Config) -> Result<()> {
    if config.is_dangerous() {
        return Err(PtcError::DangerousDirectory(config.destination.clone()));
    }
    Ok(())
}

fn finish(report: Report) -> Result<Report> {
    if report.is_success() {
        Ok(report)
    } else {
        Err(PtcError::Incomplete {
            failed: report.failed,
        })
    }
}
