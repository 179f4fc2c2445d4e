//! Build-time search indexes and client-side multi-field querying for
//! documentation sites.
//!
//! A site build turns every documentation page into a handful of searchable
//! fields, indexes them, and publishes the index as a single JSON record. The
//! browser (through the `wasm` binding) or any native caller loads that record
//! and answers queries against it.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐     ┌───────────────┐     ┌────────────────┐
//! │    build/     │────▶│    index/     │────▶│  snapshot.rs   │
//! │ (sources,     │     │ (FieldIndex,  │     │ (chunks, node, │
//! │  titles, menu)│     │  export)      │     │  digest)       │
//! └───────────────┘     └───────────────┘     └────────────────┘
//!                                                      │
//!                                                      ▼
//!                       ┌───────────────┐     ┌────────────────┐
//!                       │   wasm.rs     │◀────│    engine/     │
//!                       │ (SiteSearch)  │     │ (import, merge,│
//!                       └───────────────┘     │  EngineCell)   │
//!                                             └────────────────┘
//! ```
//!
//! # Ranking
//!
//! Fields are searched independently. Each returns its matches in relevance
//! order (earlier occurrence first, registration order on ties), and the
//! groups are concatenated in descending field priority: `title`, `h1`, `h2`,
//! `h3`, `rawBody`. A document keeps the position of its first appearance.
//!
//! # Usage
//!
//! ```
//! use docsift::{testing, QueryEngine};
//!
//! let (docs, menu) = testing::sample_corpus();
//! let node = docsift::IndexBuilder::default().build(&docs, &menu).unwrap();
//!
//! let engine = QueryEngine::from_node(&node).unwrap();
//! let results = engine.search("Introduction");
//! assert_eq!(results[0].path, "/intro");
//! ```

pub mod build;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod menu;
pub mod snapshot;
pub mod testing;
pub mod tokenize;
mod types;
mod utils;

#[cfg(feature = "wasm")]
mod wasm;

pub use build::{
    build_site_search, export_snapshot, run_build, BuildSummary, ContentSource, DataLayer,
    DirectorySource, FileDataLayer, IndexBuilder, MemoryDataLayer, MemorySource, SourceDocument,
};
pub use config::{DocumentConfig, FieldSpec, Tokenize};
pub use engine::{EngineCell, EngineState, QueryEngine, ResultMerger};
pub use error::{BuildError, ContentError, EngineError};
pub use index::{ChunkSink, DocumentIndex, FieldHits, FieldIndex, Hit, SnapshotCollector};
pub use menu::{flatten, Menu, MenuItem, TreeNode};
pub use snapshot::{content_digest, SiteSearchNode, Snapshot};
pub use types::{DocSlot, IndexableDocument, QueryResult, StoredRecord};
pub use utils::{normalize, normalize_path};

#[cfg(feature = "wasm")]
pub use wasm::SiteSearch;
