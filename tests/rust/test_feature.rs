use super::*;

// ── FeatureId ────────────────────────────────────────────────────────────────

#[test]
fn test_feature_id_accepts_kebab_case() {
    assert_eq!(FeatureId::parse("linux-build-script").unwrap().as_str(), "linux-build-script");
    assert!(FeatureId::parse("c11").is_ok());
}

#[test]
fn test_feature_id_rejects_bad_names() {
    for bad in ["", "-lead", "Upper", "with space", "dot.ted", "under_score"] {
        assert!(
            matches!(FeatureId::parse(bad), Err(CatalogueError::InvalidId(_))),
            "{bad:?} should be rejected"
        );
    }
}

// ── Built-in catalogue ───────────────────────────────────────────────────────

#[test]
fn test_builtin_order() {
    let cat = Catalogue::builtin();
    assert_eq!(
        cat.ids(),
        vec![
            "base",
            "doxygen",
            "linux-build-script",
            "windows-build-script",
            "visual-studio",
            "sonar",
            "coverage",
            "linux",
            "windows",
        ]
    );
    assert_eq!(cat.len(), 9);
}

#[test]
fn test_builtin_base_content() {
    let cat = Catalogue::builtin();
    let base = cat.get("base").unwrap();
    let paths: Vec<&Path> = base.paths().collect();
    assert_eq!(
        paths,
        vec![
            Path::new("CMakeLists.txt"),
            Path::new("LICENSE"),
            Path::new("README.md")
        ]
    );
    assert!(base.dependencies.is_empty());
}

#[test]
fn test_builtin_sonar_has_hook() {
    let cat = Catalogue::builtin();
    let sonar = cat.get("sonar").unwrap();
    assert!(sonar.content.contains(&Content::Hook(Hook::Sonar)));
    assert_eq!(sonar.paths().count(), 1);
}

#[test]
fn test_builtin_packages() {
    let cat = Catalogue::builtin();
    let windows = cat.get("windows").unwrap();
    assert!(windows.is_package());
    let deps: Vec<&str> = windows.dependencies.iter().map(FeatureId::as_str).collect();
    assert_eq!(deps, vec!["windows-build-script", "visual-studio"]);
    assert!(!cat.get("base").unwrap().is_package());
}

#[test]
fn test_check_known_lists_every_unknown() {
    let cat = Catalogue::builtin();
    assert!(cat.check_known(&["base", "sonar"]).is_ok());
    assert_eq!(
        cat.check_known(&["nope", "base", "other"]),
        Err(ResolveError::UnknownFeatures(vec![
            "nope".to_string(),
            "other".to_string()
        ]))
    );
}

// ── Hooks ────────────────────────────────────────────────────────────────────

#[test]
fn test_sonar_hook_reports_progress() {
    let mut out = Vec::new();
    Hook::Sonar.run(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "    ... executing stuff for sonar\n"
    );
    assert_eq!(Hook::Sonar.to_string(), "sonar");
}

// ── JSON catalogues ──────────────────────────────────────────────────────────

#[test]
fn test_from_json_basic() {
    let cat = Catalogue::from_json(
        r#"{"features": [
            {"id": "app", "dependencies": ["core"], "content": ["src/main.cpp", {"hook": "sonar"}]},
            {"id": "core", "content": ["CMakeLists.txt"]}
        ]}"#,
    )
    .unwrap();
    assert_eq!(cat.ids(), vec!["app", "core"]);
    let app = cat.get("app").unwrap();
    assert_eq!(
        app.content,
        vec![
            Content::Path(PathBuf::from("src/main.cpp")),
            Content::Hook(Hook::Sonar)
        ]
    );
    assert_eq!(app.dependencies[0].as_str(), "core");
}

#[test]
fn test_from_json_defaults_are_empty() {
    let cat = Catalogue::from_json(r#"{"features": [{"id": "bare"}]}"#).unwrap();
    let bare = cat.get("bare").unwrap();
    assert!(bare.dependencies.is_empty());
    assert!(bare.content.is_empty());
    assert!(!bare.is_package());
}

#[test]
fn test_from_json_malformed() {
    assert!(matches!(
        Catalogue::from_json("{not json"),
        Err(CatalogueError::Malformed(_))
    ));
    assert!(matches!(
        Catalogue::from_json(r#"{"features": [{"id": "x", "content": [{"hook": "nope"}]}]}"#),
        Err(CatalogueError::Malformed(_))
    ));
}

#[test]
fn test_from_json_duplicate() {
    let err = Catalogue::from_json(r#"{"features": [{"id": "a"}, {"id": "a"}]}"#).unwrap_err();
    assert!(matches!(err, CatalogueError::Duplicate(id) if id == "a"));
}

#[test]
fn test_from_json_rejects_escaping_paths() {
    for bad in ["../secret", "/etc/passwd", "", ".", "./", "./."] {
        let doc = format!(r#"{{"features": [{{"id": "a", "content": ["{bad}"]}}]}}"#);
        assert!(
            matches!(
                Catalogue::from_json(&doc),
                Err(CatalogueError::InvalidPath { .. })
            ),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_from_json_unknown_dependency() {
    let err =
        Catalogue::from_json(r#"{"features": [{"id": "a", "dependencies": ["b"]}]}"#).unwrap_err();
    match err {
        CatalogueError::UnknownDependency { feature, dependency } => {
            assert_eq!(feature, "a");
            assert_eq!(dependency, "b");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalogue::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CatalogueError::Read { .. }));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalogue.json");
    std::fs::write(&path, r#"{"features": [{"id": "only", "content": ["a.txt"]}]}"#).unwrap();
    let cat = Catalogue::load(&path).unwrap();
    assert_eq!(cat.ids(), vec!["only"]);
}

#[test]
fn test_is_contained() {
    assert!(is_contained(Path::new("doxygen")));
    assert!(is_contained(Path::new("./cmake/modules")));
    assert!(!is_contained(Path::new(".")));
    assert!(!is_contained(Path::new("")));
    assert!(!is_contained(Path::new("a/../..")));
}
