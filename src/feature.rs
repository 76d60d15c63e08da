//! Feature catalogue — what can be installed and what each feature needs.
//!
//! A feature names the template entries it copies (`Content::Path`), the
//! built-in actions it runs (`Content::Hook`) and the features it depends
//! on. A feature with dependencies but no content works as a package.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use log::info;
use regex::Regex;
use serde::Deserialize;

use crate::error::{CatalogueError, ResolveError};

static FEATURE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("feature id pattern"));

// ── Identifiers ──────────────────────────────────────────────────────────────

/// A validated feature name: lowercase letters, digits and dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn parse(id: &str) -> Result<Self, CatalogueError> {
        if FEATURE_ID.is_match(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(CatalogueError::InvalidId(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FeatureId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Content ──────────────────────────────────────────────────────────────────

/// Built-in actions a feature may run while being installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hook {
    Sonar,
}

impl Hook {
    pub fn name(self) -> &'static str {
        match self {
            Hook::Sonar => "sonar",
        }
    }

    /// Run the hook, reporting progress to `out`.
    pub fn run(self, out: &mut dyn Write) -> io::Result<()> {
        match self {
            Hook::Sonar => {
                info!("running sonar hook");
                writeln!(out, "    ... executing stuff for sonar")
            }
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One item of a feature's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// File or directory, relative to the template root.
    Path(PathBuf),
    Hook(Hook),
}

impl Content {
    fn path(feature: &str, raw: &str) -> Result<Self, CatalogueError> {
        let path = Path::new(raw);
        if !is_contained(path) {
            return Err(CatalogueError::InvalidPath {
                feature: feature.to_string(),
                path: raw.to_string(),
            });
        }
        Ok(Content::Path(path.to_path_buf()))
    }
}

/// True for a relative path naming something strictly below its root:
/// no `..`, no root or prefix, and at least one normal component.
pub(crate) fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}

// ── Features ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub id: FeatureId,
    pub dependencies: Vec<FeatureId>,
    pub content: Vec<Content>,
}

impl Feature {
    /// Path content only, in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.content.iter().filter_map(|c| match c {
            Content::Path(p) => Some(p.as_path()),
            Content::Hook(_) => None,
        })
    }

    pub fn is_package(&self) -> bool {
        self.content.is_empty() && !self.dependencies.is_empty()
    }
}

// ── Catalogue file format ────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalogue {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFeature {
    id: String,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    content: Vec<RawContent>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContent {
    Path(String),
    Hook { hook: Hook },
}

// ── Catalogue ────────────────────────────────────────────────────────────────

/// Ordered set of features, addressable by id.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    features: Vec<Feature>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// The catalogue bundled with `ptc`.
    pub fn builtin() -> Self {
        let p = |s: &str| Content::Path(PathBuf::from(s));

        let entries: Vec<(&str, Vec<&str>, Vec<Content>)> = vec![
            (
                "base",
                vec![],
                vec![p("CMakeLists.txt"), p("LICENSE"), p("README.md")],
            ),
            ("doxygen", vec![], vec![p("doxygen")]),
            (
                "linux-build-script",
                vec!["base"],
                vec![p("build.sh"), p("configure.sh")],
            ),
            (
                "windows-build-script",
                vec!["base"],
                vec![p("build.bat"), p("setup-environment.bat")],
            ),
            ("visual-studio", vec![], vec![p("create_VS_solution.bat.bat")]),
            (
                "sonar",
                vec![],
                vec![p("sonar-project.properties"), Content::Hook(Hook::Sonar)],
            ),
            (
                "coverage",
                vec![],
                vec![p("coverage.ignore"), p("cmake/modules/CodeCoverage.cmake")],
            ),
            // packages
            ("linux", vec!["linux-build-script"], vec![]),
            ("windows", vec!["windows-build-script", "visual-studio"], vec![]),
        ];

        let mut catalogue = Catalogue::default();
        for (id, deps, content) in entries {
            catalogue.push(Feature {
                id: FeatureId(id.to_string()),
                dependencies: deps.into_iter().map(|d| FeatureId(d.to_string())).collect(),
                content,
            });
        }
        catalogue
    }

    /// Parse a JSON catalogue document.
    pub fn from_json(src: &str) -> Result<Self, CatalogueError> {
        let raw: RawCatalogue = serde_json::from_str(src)?;

        let mut catalogue = Catalogue::default();
        for rf in raw.features {
            let id = FeatureId::parse(&rf.id)?;
            if catalogue.index.contains_key(id.as_str()) {
                return Err(CatalogueError::Duplicate(rf.id));
            }
            let dependencies = rf
                .dependencies
                .iter()
                .map(|d| FeatureId::parse(d))
                .collect::<Result<Vec<_>, _>>()?;
            let content = rf
                .content
                .into_iter()
                .map(|c| match c {
                    RawContent::Path(s) => Content::path(&rf.id, &s),
                    RawContent::Hook { hook } => Ok(Content::Hook(hook)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            catalogue.push(Feature {
                id,
                dependencies,
                content,
            });
        }

        // Dependencies may point forward, so check them once everything is known.
        for feature in &catalogue.features {
            let missing = feature
                .dependencies
                .iter()
                .find(|d| !catalogue.contains(d.as_str()));
            if let Some(dep) = missing {
                return Err(CatalogueError::UnknownDependency {
                    feature: feature.id.to_string(),
                    dependency: dep.to_string(),
                });
            }
        }
        Ok(catalogue)
    }

    /// Read and parse a JSON catalogue file.
    pub fn load(path: &Path) -> Result<Self, CatalogueError> {
        let src = fs::read_to_string(path).map_err(|source| CatalogueError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&src)
    }

    fn push(&mut self, feature: Feature) {
        self.index
            .insert(feature.id.as_str().to_string(), self.features.len());
        self.features.push(feature);
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.index.get(id).map(|&i| &self.features[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Feature ids in catalogue order.
    pub fn ids(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Fails with every id that is not in the catalogue.
    pub fn check_known<S: AsRef<str>>(&self, ids: &[S]) -> Result<(), ResolveError> {
        let unknown: Vec<String> = ids
            .iter()
            .map(AsRef::as_ref)
            .filter(|id| !self.contains(id))
            .map(str::to_string)
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ResolveError::UnknownFeatures(unknown))
        }
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_feature.rs"]
mod tests;
