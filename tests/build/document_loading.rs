//! Tests for loading pages and the menu from a content directory.

use docsift::{ContentError, ContentSource, DirectorySource, IndexBuilder};

use super::common::fixture;

#[test]
fn test_documents_load_in_manifest_order() {
    let source = DirectorySource::open(fixture("valid")).unwrap();
    let docs = source.documents().unwrap();
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["intro", "cloud-api", "setup"]);
}

#[test]
fn test_heading_value_field_is_read() {
    let source = DirectorySource::open(fixture("valid")).unwrap();
    let docs = source.documents().unwrap();
    assert_eq!(docs[0].headings[0].text, "Toit at a glance");
    assert_eq!(docs[0].headings[0].depth, 1);
    assert_eq!(docs[2].title.as_deref(), Some("Setting up"));
}

#[test]
fn test_menu_loads_nested_children() {
    let source = DirectorySource::open(fixture("valid")).unwrap();
    let menu = source.menu().unwrap();
    let paths: Vec<&str> = menu.entries().iter().map(|e| e.path).collect();
    assert_eq!(
        paths,
        vec!["/", "/intro", "/tutorials/setup", "/api/cloud"]
    );
}

#[test]
fn test_missing_document_file_fails() {
    let source = DirectorySource::open(fixture("missing-doc")).unwrap();
    match source.documents() {
        Err(ContentError::Read { path, .. }) => {
            assert!(path.ends_with("does-not-exist.json"))
        }
        other => panic!("expected read error, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_yaml_menu_loads_nested_children() {
    let source = DirectorySource::open(fixture("yaml-menu")).unwrap();
    let menu = source.menu().unwrap();
    assert_eq!(menu.items.len(), 3);
    assert_eq!(menu.items[2].children[0].name, "Cloud API");

    let paths: Vec<&str> = menu.entries().iter().map(|e| e.path).collect();
    assert_eq!(
        paths,
        vec!["/", "/intro/", "/tutorials/setup", "/api/cloud"]
    );
}

#[test]
fn test_yaml_menu_names_become_titles() {
    let source = DirectorySource::open(fixture("yaml-menu")).unwrap();
    let docs = source.documents().unwrap();
    let menu = source.menu().unwrap();
    let derived = IndexBuilder::default().derive_documents(&docs, &menu).unwrap();

    let titles: Vec<&str> = derived.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Introduction", "Cloud API", "Guides"]);
}
