//! Tests for document derivation, index construction and export.

use docsift::snapshot::{field_cfg_key, field_map_key, REGISTRY_KEY, STORE_KEY};
use docsift::{
    export_snapshot, BuildError, DocumentConfig, IndexBuilder, Menu, SiteSearchNode, Snapshot,
};

use super::common::{capture_warnings, make_menu, make_source, sample_corpus};

#[test]
fn test_derived_fields() {
    let mut doc = make_source("a", "guide/", "Guide", "Body text");
    doc.headings.push(docsift::build::Heading {
        text: "Step one".into(),
        depth: 2,
    });
    doc.headings.push(docsift::build::Heading {
        text: "Step two".into(),
        depth: 2,
    });
    let derived = IndexBuilder::default()
        .derive_documents(&[doc], &Menu::default())
        .unwrap();
    let d = &derived[0];
    assert_eq!(d.path, "/guide");
    assert_eq!(d.title, "Guide");
    assert_eq!(d.h1, "Guide");
    assert_eq!(d.h2, "Step one Step two");
    assert_eq!(d.h3, "");
    assert_eq!(d.raw_body, "Body text");
}

#[test]
fn test_untitled_page_still_builds() {
    let mut doc = make_source("a", "blank", "", "some words here");
    doc.headings.clear();
    let (derived, logs) =
        capture_warnings(|| IndexBuilder::default().derive_documents(&[doc], &Menu::default()));
    assert_eq!(derived.unwrap()[0].title, "");

    let warning = logs
        .lines()
        .find(|line| line.contains("no title"))
        .expect("untitled page should be logged");
    assert!(warning.contains("WARN"));
    assert!(warning.contains("/blank"));
}

#[test]
fn test_page_without_menu_entry_is_logged() {
    let docs = vec![
        make_source("a", "intro", "Intro", "body"),
        make_source("b", "hidden/", "Hidden", "body"),
    ];
    let menu = make_menu(&[("Intro", "/intro")]);
    let (derived, logs) = capture_warnings(|| IndexBuilder::default().derive_documents(&docs, &menu));
    assert_eq!(derived.unwrap().len(), 2);

    let warnings: Vec<&str> = logs.lines().filter(|l| l.contains("no menu entry")).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("/hidden"));
}

#[test]
fn test_titled_page_in_menu_logs_nothing() {
    let (docs, menu) = sample_corpus();
    let (derived, logs) = capture_warnings(|| IndexBuilder::default().derive_documents(&docs, &menu));
    assert_eq!(derived.unwrap().len(), 2);
    assert_eq!(logs, "");
}

#[test]
fn test_orphan_menu_entry_names_path() {
    let docs = vec![make_source("a", "intro", "Intro", "body")];
    let menu = make_menu(&[("Intro", "/intro"), ("Missing", "/reference/stdlib")]);
    let err = IndexBuilder::default().build(&docs, &menu).unwrap_err();
    assert!(err.to_string().contains("/reference/stdlib"));
    assert!(matches!(err, BuildError::MissingMenuTarget { .. }));
}

#[test]
fn test_snapshot_keys() {
    let (docs, menu) = sample_corpus();
    let builder = IndexBuilder::default();
    let index = builder.build_index(&builder.derive_documents(&docs, &menu).unwrap());
    let snapshot = export_snapshot(&index).unwrap();

    let mut expected = vec![REGISTRY_KEY.to_string(), STORE_KEY.to_string()];
    for spec in &DocumentConfig::site_default().index {
        expected.push(field_cfg_key(&spec.field));
        expected.push(field_map_key(&spec.field));
    }
    expected.sort();
    let keys: Vec<String> = snapshot.keys().map(str::to_string).collect();
    assert_eq!(keys, expected);
    assert_eq!(snapshot.get(REGISTRY_KEY).unwrap(), &serde_json::json!(["a", "b"]));
}

#[test]
fn test_store_holds_display_fields_only() {
    let (docs, menu) = sample_corpus();
    let node = IndexBuilder::default().build(&docs, &menu).unwrap();
    let snapshot = Snapshot::from_json(&node.index).unwrap();
    let store = snapshot.get(STORE_KEY).unwrap();
    assert_eq!(
        store["a"],
        serde_json::json!({
            "path": "/intro",
            "title": "Introduction",
            "excerpt": "Excerpt for Introduction"
        })
    );
}

#[test]
fn test_node_digest_and_config() {
    let (docs, menu) = sample_corpus();
    let node: SiteSearchNode = IndexBuilder::default().build(&docs, &menu).unwrap();
    assert_eq!(node.internal.node_type, "SiteSearch");
    assert_eq!(node.content_digest(), docsift::content_digest(&node.index));
    let config: DocumentConfig = serde_json::from_str(&node.document_config).unwrap();
    assert_eq!(config, DocumentConfig::site_default());
}

#[test]
fn test_same_corpus_same_digest() {
    let (docs, menu) = sample_corpus();
    let first = IndexBuilder::default().build(&docs, &menu).unwrap();
    let second = IndexBuilder::default().build(&docs, &menu).unwrap();
    assert_eq!(first.content_digest(), second.content_digest());
    assert_eq!(first.id, second.id);
}
