//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::build::{Heading, IndexBuilder, SourceDocument};
use crate::engine::QueryEngine;
use crate::menu::{Menu, MenuItem};
use crate::snapshot::SiteSearchNode;

/// A page with one level-1 heading.
pub fn make_source(id: &str, slug: &str, heading: &str, body: &str) -> SourceDocument {
    SourceDocument {
        id: id.to_string(),
        slug: slug.to_string(),
        excerpt: format!("Excerpt for {}", heading),
        raw_body: body.to_string(),
        headings: vec![Heading {
            text: heading.to_string(),
            depth: 1,
        }],
        title: None,
    }
}

/// A flat menu from `(name, path)` pairs.
pub fn make_menu(entries: &[(&str, &str)]) -> Menu {
    Menu {
        items: entries
            .iter()
            .map(|(name, path)| MenuItem {
                name: name.to_string(),
                path: path.to_string(),
                children: Vec::new(),
            })
            .collect(),
    }
}

/// The two-page corpus: an introduction and a cloud API page, both about toit.
pub fn sample_corpus() -> (Vec<SourceDocument>, Menu) {
    let docs = vec![
        make_source(
            "a",
            "intro/",
            "Introduction",
            "Toit is a language for microcontrollers",
        ),
        make_source(
            "b",
            "api/cloud/",
            "Cloud API",
            "Connect your device to the Toit cloud",
        ),
    ];
    let menu = make_menu(&[("Introduction", "/intro"), ("Cloud API", "/api/cloud")]);
    (docs, menu)
}

/// Build a node with the site configuration.
pub fn build_node(docs: &[SourceDocument], menu: &Menu) -> SiteSearchNode {
    match IndexBuilder::default().build(docs, menu) {
        Ok(node) => node,
        Err(e) => panic!("test corpus failed to build: {}", e),
    }
}

/// Build and load a ready engine.
pub fn engine_for(docs: &[SourceDocument], menu: &Menu) -> QueryEngine {
    match QueryEngine::from_node(&build_node(docs, menu)) {
        Ok(engine) => engine,
        Err(e) => panic!("test node failed to load: {}", e),
    }
}

/// A synthetic corpus of `count` pages for benches and property tests.
pub fn synthetic_corpus(count: usize) -> Vec<SourceDocument> {
    const WORDS: &[&str] = &[
        "toit", "device", "cloud", "language", "microcontroller", "network", "sensor", "deploy",
        "package", "container", "firmware", "wifi", "console", "monitor", "install", "update",
    ];
    (0..count)
        .map(|i| {
            let body: Vec<&str> = (0..40).map(|j| WORDS[(i * 7 + j * 3) % WORDS.len()]).collect();
            make_source(
                &format!("doc-{}", i),
                &format!("docs/page-{}/", i),
                &format!("{} guide {}", WORDS[i % WORDS.len()], i),
                &body.join(" "),
            )
        })
        .collect()
}
