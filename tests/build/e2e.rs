//! End-to-end tests for the build workflow.

use std::fs;

use docsift::{run_build, BuildError, QueryEngine, SiteSearchNode};
use tempfile::TempDir;

use super::common::{fixture, ids};

#[test]
fn test_run_build_e2e_basic() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let summary = run_build(fixture("valid").as_ref(), &output_path).unwrap();
    assert_eq!(summary.documents, 3);
    assert!(summary.terms > 0);

    let written = summary.output.expect("node file should be written");
    let name = written.file_name().unwrap().to_str().unwrap();
    assert_eq!(name, format!("site-search-{}.json", &summary.content_digest[..8]));

    let node: SiteSearchNode = serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
    assert!(node.verify_digest());

    let engine = QueryEngine::from_node(&node).unwrap();
    assert_eq!(ids(&engine.search("toit")), vec!["intro", "cloud-api"]);
}

#[test]
fn test_rebuild_replaces_node() {
    let content = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(
        content.path().join("manifest.json"),
        r#"{"version": 1, "documents": ["page.json"]}"#,
    )
    .unwrap();
    fs::write(content.path().join("menu.json"), r#"{"items": []}"#).unwrap();

    let mut digests = Vec::new();
    for body in ["first", "second"] {
        fs::write(
            content.path().join("page.json"),
            format!(r#"{{"id": "page", "slug": "page/", "rawBody": "{}"}}"#, body),
        )
        .unwrap();
        let summary = run_build(content.path(), output.path()).unwrap();
        digests.push(summary.content_digest);
    }
    assert_ne!(digests[0], digests[1]);

    let files: Vec<_> = fs::read_dir(output.path()).unwrap().collect();
    assert_eq!(files.len(), 1);

    let path = files[0].as_ref().unwrap().path();
    let node: SiteSearchNode = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(node.id, "SiteSearch");
    assert_eq!(node.content_digest(), digests[1]);
    let engine = QueryEngine::from_node(&node).unwrap();
    assert_eq!(ids(&engine.search("second")), vec!["page"]);
    assert!(engine.search("first").is_empty());
}

#[test]
fn test_run_build_e2e_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let err = run_build(temp_dir.path(), &output_path).unwrap_err();
    assert!(matches!(err, BuildError::ContentQuery(_)));
    assert!(err.to_string().contains("manifest.json"));
    assert!(!output_path.exists());
}

#[test]
fn test_run_build_e2e_invalid_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let err = run_build(fixture("invalid-manifest").as_ref(), temp_dir.path()).unwrap_err();
    assert!(matches!(err, BuildError::ContentQuery(_)));
    assert!(err.to_string().starts_with("🚨 ERROR"));
}

#[test]
fn test_run_build_e2e_missing_document() {
    let temp_dir = TempDir::new().unwrap();
    let err = run_build(fixture("missing-doc").as_ref(), temp_dir.path()).unwrap_err();
    assert!(err.to_string().contains("does-not-exist.json"));
}

#[test]
fn test_run_build_e2e_orphan_menu_publishes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let err = run_build(fixture("orphan-menu").as_ref(), &output_path).unwrap_err();
    match err {
        BuildError::MissingMenuTarget { path } => assert_eq!(path, "/reference/stdlib"),
        other => panic!("expected missing menu target, got {}", other),
    }
    assert!(!output_path.exists());
}
