use super::*;

fn ids(level: &[FeatureId]) -> Vec<&str> {
    level.iter().map(FeatureId::as_str).collect()
}

fn catalogue(json: &str) -> Catalogue {
    Catalogue::from_json(json).unwrap()
}

// ── Resolution ───────────────────────────────────────────────────────────────

#[test]
fn test_single_feature_without_dependencies() {
    let g = DependencyGraph::resolve(&Catalogue::builtin(), &["doxygen"]).unwrap();
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.levels().len(), 1);
    assert_eq!(ids(&g.levels()[0]), vec!["doxygen"]);
}

#[test]
fn test_package_pulls_transitive_dependencies() {
    let g = DependencyGraph::resolve(&Catalogue::builtin(), &["linux"]).unwrap();
    assert_eq!(g.node_count(), 3);
    assert!(g.contains("base"));
    assert!(g.contains("linux-build-script"));
    let levels = g.levels();
    assert_eq!(levels.len(), 3);
    assert_eq!(ids(&levels[0]), vec!["base"]);
    assert_eq!(ids(&levels[1]), vec!["linux-build-script"]);
    assert_eq!(ids(&levels[2]), vec!["linux"]);
}

#[test]
fn test_levels_sorted_within_level() {
    let g = DependencyGraph::resolve(&Catalogue::builtin(), &["windows", "sonar", "coverage"])
        .unwrap();
    let levels = g.levels();
    assert_eq!(
        ids(&levels[0]),
        vec!["base", "coverage", "sonar", "visual-studio"]
    );
    assert_eq!(ids(&levels[1]), vec!["windows-build-script"]);
    assert_eq!(ids(&levels[2]), vec!["windows"]);
}

#[test]
fn test_level_is_one_above_deepest_dependency() {
    let cat = catalogue(
        r#"{"features": [
            {"id": "a"},
            {"id": "b", "dependencies": ["a"]},
            {"id": "c", "dependencies": ["a", "b"]}
        ]}"#,
    );
    let g = DependencyGraph::resolve(&cat, &["c"]).unwrap();
    let levels = g.levels();
    assert_eq!(levels.len(), 3);
    assert_eq!(ids(&levels[2]), vec!["c"]);
    assert_eq!(g.dependencies_of("c"), vec!["a", "b"]);
}

#[test]
fn test_shared_dependency_appears_once() {
    let g = DependencyGraph::resolve(&Catalogue::builtin(), &["linux", "windows"]).unwrap();
    let order = g.install_order();
    assert_eq!(order.iter().filter(|id| id.as_str() == "base").count(), 1);
    assert_eq!(order.first().map(FeatureId::as_str), Some("base"));
}

#[test]
fn test_repeated_request_is_deduplicated() {
    let g = DependencyGraph::resolve(&Catalogue::builtin(), &["base", "base"]).unwrap();
    assert_eq!(g.node_count(), 1);
}

#[test]
fn test_install_order_respects_dependencies() {
    let g = DependencyGraph::resolve(&Catalogue::builtin(), &["windows", "linux"]).unwrap();
    let order: Vec<String> = g.install_order().iter().map(|id| id.to_string()).collect();
    let pos = |id: &str| order.iter().position(|x| x == id).unwrap();
    assert!(pos("base") < pos("linux-build-script"));
    assert!(pos("base") < pos("windows-build-script"));
    assert!(pos("windows-build-script") < pos("windows"));
    assert!(pos("visual-studio") < pos("windows"));
}

// ── Rejections ───────────────────────────────────────────────────────────────

#[test]
fn test_unknown_requested_features() {
    let err = DependencyGraph::resolve(&Catalogue::builtin(), &["base", "rust", "go"])
        .err()
        .unwrap();
    assert_eq!(
        err,
        ResolveError::UnknownFeatures(vec!["rust".to_string(), "go".to_string()])
    );
}

#[test]
fn test_cycle_is_reported() {
    let cat = catalogue(
        r#"{"features": [
            {"id": "a", "dependencies": ["b"]},
            {"id": "b", "dependencies": ["a"]}
        ]}"#,
    );
    let err = DependencyGraph::resolve(&cat, &["a"]).err().unwrap();
    assert!(matches!(err, ResolveError::DependencyCycle(ref id) if id == "a" || id == "b"));
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let cat = catalogue(r#"{"features": [{"id": "a", "dependencies": ["a"]}]}"#);
    let err = DependencyGraph::resolve(&cat, &["a"]).err().unwrap();
    assert_eq!(err, ResolveError::DependencyCycle("a".to_string()));
}

#[test]
fn test_dependencies_of_absent_feature() {
    let g = DependencyGraph::resolve(&Catalogue::builtin(), &["base"]).unwrap();
    assert!(g.dependencies_of("linux").is_empty());
}
