// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build-time index construction.
//!
//! ```text
//! ContentSource ─▶ derive_documents ─▶ build_index ─▶ export_snapshot ─▶ SiteSearchNode ─▶ DataLayer
//!  (pages, menu)    (path, title,       (DocumentIndex)  (chunks until      (index, config,
//!                    h1..h4, body)                        "store")           digest)
//! ```
//!
//! A build either publishes exactly one node or fails. Problems that only
//! make the result worse (a page that is not in the menu, a page without a
//! title) are logged and the build goes on.

pub mod data_layer;
pub mod document;
pub mod manifest;
pub mod parallel;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::thread;

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::config::DocumentConfig;
use crate::error::{BuildError, BuildResult};
use crate::index::{DocumentIndex, SnapshotCollector};
use crate::menu::Menu;
use crate::snapshot::{SiteSearchNode, Snapshot};
use crate::types::IndexableDocument;
use crate::utils::normalize_path;

pub use data_layer::*;
pub use document::*;
pub use manifest::*;
pub use parallel::*;

/// What a finished build produced.
#[derive(Clone, Debug)]
pub struct BuildSummary {
    pub documents: usize,
    pub terms: usize,
    pub index_bytes: usize,
    pub content_digest: String,
    /// File the node was written to, when written to disk.
    pub output: Option<PathBuf>,
}

/// Turns source documents into a published search node.
#[derive(Clone, Debug, Default)]
pub struct IndexBuilder {
    config: DocumentConfig,
}

impl IndexBuilder {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Check the menu, then derive one indexable document per page.
    pub fn derive_documents(
        &self,
        docs: &[SourceDocument],
        menu: &Menu,
    ) -> BuildResult<Vec<IndexableDocument>> {
        check_menu_targets(menu, docs)?;

        let mut titles: HashMap<String, &str> = HashMap::new();
        for entry in menu.entries() {
            titles.entry(normalize_path(entry.path)).or_insert(entry.name);
        }

        docs.iter()
            .map(|doc| {
                let path = doc.path();
                if doc.id.is_empty() {
                    return Err(BuildError::MissingDocumentId { path });
                }

                let menu_title = titles.get(&path).copied();
                if menu_title.is_none() {
                    tracing::warn!(path = %path, "page has no menu entry");
                }

                let derived = doc.to_indexable(menu_title);
                if derived.title.is_empty() {
                    tracing::warn!(path = %path, "page has no title and no headings");
                }
                Ok(derived)
            })
            .collect()
    }

    /// Add every document, in order, to a fresh index.
    pub fn build_index(&self, docs: &[IndexableDocument]) -> DocumentIndex {
        let mut index = DocumentIndex::new(self.config.clone());
        for doc in docs {
            index.add(doc);
        }
        tracing::debug!(documents = index.len(), "built document index");
        index
    }

    /// The full pipeline, minus publishing.
    pub fn build(&self, docs: &[SourceDocument], menu: &Menu) -> BuildResult<SiteSearchNode> {
        let derived = self.derive_documents(docs, menu)?;
        let index = self.build_index(&derived);
        let snapshot = export_snapshot(&index)?;
        Ok(SiteSearchNode::new(&snapshot, &self.config)?)
    }
}

/// Every menu path except `/` must belong to a page.
pub fn check_menu_targets(menu: &Menu, docs: &[SourceDocument]) -> BuildResult<()> {
    let paths: HashSet<String> = docs.iter().map(SourceDocument::path).collect();
    for entry in menu.entries() {
        let path = normalize_path(entry.path);
        if path != "/" && !paths.contains(&path) {
            return Err(BuildError::MissingMenuTarget {
                path: entry.path.to_string(),
            });
        }
    }
    Ok(())
}

/// Export `index` on a separate thread and wait for the `store` chunk.
///
/// Fails if the export errors, panics, or ends without producing `store`.
pub fn export_snapshot(index: &DocumentIndex) -> BuildResult<Snapshot> {
    let collector = SnapshotCollector::new();

    let (complete, exported) = thread::scope(|scope| {
        let producer = scope.spawn(|| {
            let _guard = collector.close_on_drop();
            index.export(&collector)
        });
        let complete = collector.wait();
        (complete, producer.join())
    });

    match exported {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(BuildError::Serialize(e)),
        Err(_) => return Err(BuildError::IncompleteExport),
    }
    if !complete {
        return Err(BuildError::IncompleteExport);
    }

    let snapshot = collector
        .into_snapshot()
        .ok_or(BuildError::IncompleteExport)?;
    tracing::debug!(chunks = snapshot.len(), "index export complete");
    Ok(snapshot)
}

/// Build from `source` and publish the node to `layer`.
pub fn build_site_search(
    source: &dyn ContentSource,
    layer: &mut dyn DataLayer,
) -> BuildResult<BuildSummary> {
    let docs = source.documents()?;
    let menu = source.menu()?;
    publish(&IndexBuilder::default(), &docs, &menu, layer)
}

fn publish(
    builder: &IndexBuilder,
    docs: &[SourceDocument],
    menu: &Menu,
    layer: &mut dyn DataLayer,
) -> BuildResult<BuildSummary> {
    let derived = builder.derive_documents(docs, menu)?;
    let index = builder.build_index(&derived);
    let terms = index.fields().iter().map(|field| field.term_count()).sum();
    let snapshot = export_snapshot(&index)?;
    let node = SiteSearchNode::new(&snapshot, builder.config())?;

    let summary = BuildSummary {
        documents: index.len(),
        terms,
        index_bytes: node.index.len(),
        content_digest: node.content_digest().to_string(),
        output: None,
    };
    layer.create_node(node)?;
    tracing::info!(
        documents = summary.documents,
        terms = summary.terms,
        digest = %summary.content_digest,
        "published search node"
    );
    Ok(summary)
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// Build a content directory into `output_dir`.
pub fn run_build(input_dir: &Path, output_dir: &Path) -> BuildResult<BuildSummary> {
    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();

    let source = DirectorySource::open(input_dir)?;

    #[cfg(feature = "parallel")]
    let load_pb = multi.add(ProgressBar::new(source.manifest().documents.len() as u64));
    #[cfg(feature = "parallel")]
    {
        load_pb.set_style(create_progress_style());
        load_pb.set_prefix("Loading");
        load_pb.set_message("documents...");
    }
    #[cfg(feature = "parallel")]
    let source = source.with_progress(load_pb.clone());

    let docs = source.documents()?;
    let menu = source.menu()?;

    #[cfg(feature = "parallel")]
    load_pb.finish_with_message(format!("loaded {} documents", docs.len()));

    if docs.is_empty() {
        tracing::warn!(input = %input_dir.display(), "no documents listed; index will be empty");
    }

    let mut layer = FileDataLayer::new(output_dir);
    let mut summary = publish(&IndexBuilder::default(), &docs, &menu, &mut layer)?;
    summary.output = layer.written().last().cloned();
    Ok(summary)
}
