//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

use docsift::{DirectorySource, DocumentIndex, IndexBuilder, QueryEngine, QueryResult, ResultMerger};

// Re-export canonical test utilities from docsift::testing
pub use docsift::testing::{build_node, engine_for, make_menu, make_source, sample_corpus};

/// Directory containing the build fixtures.
pub const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

/// Path to one fixture directory.
pub fn fixture(name: &str) -> String {
    format!("{}/{}", BUILD_FIXTURES_DIR, name)
}

/// Ids of `results`, in order.
pub fn ids(results: &[QueryResult]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

/// Engine loaded from the `valid` fixture, built in memory.
pub fn valid_fixture_engine() -> QueryEngine {
    let source = DirectorySource::open(fixture("valid")).expect("valid fixture should open");
    let docs = docsift::ContentSource::documents(&source).expect("documents should load");
    let menu = docsift::ContentSource::menu(&source).expect("menu should load");
    engine_for(&docs, &menu)
}

/// The in-memory index for the sample corpus, before any export.
pub fn sample_index() -> DocumentIndex {
    let (docs, menu) = sample_corpus();
    let builder = IndexBuilder::default();
    let derived = builder
        .derive_documents(&docs, &menu)
        .expect("sample corpus should derive");
    builder.build_index(&derived)
}

/// Search an in-memory index and merge the field groups like the engine does.
pub fn search_in_memory(index: &DocumentIndex, query: &str) -> Vec<QueryResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let groups = index.search(query);
    let mut merger = ResultMerger::new();
    merger.merge_all(&groups);
    merger.into_results()
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with warnings on this thread captured, and return them with its result.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
