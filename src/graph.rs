//! Dependency graph — turns a feature request into install levels.
//!
//! Requested features and everything they transitively depend on become
//! nodes of a petgraph `DiGraph`; each edge points from a dependency to
//! the feature that needs it. Level 0 holds features without
//! dependencies, every other feature sits one level above its deepest
//! dependency, so installing level by level satisfies every dependency.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::ResolveError;
use crate::feature::{Catalogue, FeatureId};

pub struct DependencyGraph {
    pub digraph: DiGraph<FeatureId, ()>,
    /// Maps feature id → petgraph NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
    /// Topological order, dependencies first.
    order: Vec<NodeIndex>,
}

impl DependencyGraph {
    /// Resolve `requested` against `catalogue`.
    pub fn resolve<S: AsRef<str>>(
        catalogue: &Catalogue,
        requested: &[S],
    ) -> Result<Self, ResolveError> {
        catalogue.check_known(requested)?;

        let mut digraph: DiGraph<FeatureId, ()> = DiGraph::new();
        let mut node_index: HashMap<String, NodeIndex> = HashMap::new();
        let mut expanded: HashSet<String> = HashSet::new();

        let mut pending: Vec<&FeatureId> = Vec::new();
        for id in requested {
            if let Some(feature) = catalogue.get(id.as_ref()) {
                ensure_node(&mut digraph, &mut node_index, &feature.id);
                pending.push(&feature.id);
            }
        }

        while let Some(id) = pending.pop() {
            if !expanded.insert(id.as_str().to_string()) {
                continue;
            }
            let Some(feature) = catalogue.get(id.as_str()) else {
                return Err(ResolveError::UnknownFeatures(vec![id.to_string()]));
            };
            catalogue.check_known(feature.dependencies.as_slice())?;

            let to = node_index[id.as_str()];
            for dep in &feature.dependencies {
                let from = ensure_node(&mut digraph, &mut node_index, dep);
                if digraph.find_edge(from, to).is_none() {
                    digraph.add_edge(from, to, ());
                }
                pending.push(dep);
            }
        }

        let order = toposort(&digraph, None)
            .map_err(|cycle| ResolveError::DependencyCycle(digraph[cycle.node_id()].to_string()))?;

        debug!(
            "resolved {} feature(s) with {} dependency edge(s)",
            digraph.node_count(),
            digraph.edge_count()
        );

        Ok(Self {
            digraph,
            node_index,
            order,
        })
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Sorted direct dependencies of `id`. Empty if `id` is not in the graph.
    pub fn dependencies_of(&self, id: &str) -> Vec<String> {
        match self.node_index.get(id) {
            None => vec![],
            Some(&idx) => {
                let mut result: Vec<String> = self
                    .digraph
                    .neighbors_directed(idx, petgraph::Direction::Incoming)
                    .map(|n| self.digraph[n].to_string())
                    .collect();
                result.sort();
                result
            }
        }
    }

    /// Features grouped by level, lowest first; ids sorted within a level.
    pub fn levels(&self) -> Vec<Vec<FeatureId>> {
        let mut level_of: HashMap<NodeIndex, usize> = HashMap::new();
        let mut by_level: BTreeMap<usize, Vec<FeatureId>> = BTreeMap::new();

        for &idx in &self.order {
            let level = self
                .digraph
                .neighbors_directed(idx, petgraph::Direction::Incoming)
                .filter_map(|dep| level_of.get(&dep))
                .map(|l| l + 1)
                .max()
                .unwrap_or(0);
            level_of.insert(idx, level);
            by_level
                .entry(level)
                .or_default()
                .push(self.digraph[idx].clone());
        }

        by_level
            .into_values()
            .map(|mut ids| {
                ids.sort();
                ids
            })
            .collect()
    }

    /// Levels flattened into a single install sequence.
    pub fn install_order(&self) -> Vec<FeatureId> {
        self.levels().into_iter().flatten().collect()
    }
}

fn ensure_node(
    digraph: &mut DiGraph<FeatureId, ()>,
    node_index: &mut HashMap<String, NodeIndex>,
    id: &FeatureId,
) -> NodeIndex {
    if let Some(&idx) = node_index.get(id.as_str()) {
        return idx;
    }
    let idx = digraph.add_node(id.clone());
    node_index.insert(id.as_str().to_string(), idx);
    idx
}

#[cfg(test)]
#[path = "../tests/rust/test_graph.rs"]
mod tests;
