//! Tests for manifest parsing and validation.

use docsift::build::{InputManifest, MANIFEST_VERSION};
use docsift::{ContentError, DirectorySource};

use super::common::fixture;

#[test]
fn test_valid_fixture_manifest() {
    let source = DirectorySource::open(fixture("valid")).unwrap();
    let manifest = source.manifest();
    assert_eq!(manifest.version, MANIFEST_VERSION);
    assert_eq!(
        manifest.documents,
        vec!["intro.json", "cloud-api.json", "setup.json"]
    );
    assert_eq!(manifest.menu, "menu.json");
}

#[test]
fn test_invalid_manifest_is_parse_error() {
    let err = DirectorySource::open(fixture("invalid-manifest")).err().unwrap();
    match err {
        ContentError::Parse { path, .. } => assert!(path.ends_with("manifest.json")),
        other => panic!("expected parse error, got {}", other),
    }
}

#[test]
fn test_missing_manifest_is_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = DirectorySource::open(dir.path()).err().unwrap();
    assert!(matches!(err, ContentError::Read { .. }));
    assert!(err.to_string().contains("manifest.json"));
}

#[test]
fn test_blank_document_name_rejected() {
    let manifest: InputManifest =
        serde_json::from_str(r#"{"version": 1, "documents": ["a.json", " "]}"#).unwrap();
    assert!(matches!(
        manifest.validate(),
        Err(ContentError::Manifest(_))
    ));
}
