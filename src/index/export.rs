// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Chunked export and import of a [`DocumentIndex`].
//!
//! Export pushes named chunks into a [`ChunkSink`]. Field chunks may be
//! produced concurrently and in any order; the `store` chunk is always the
//! last one produced, so a consumer treats its arrival as "export complete".
//! [`SnapshotCollector`] is that consumer: it gathers chunks from any thread
//! and lets a waiter block until `store` has been seen.
//!
//! Import is the reverse: feed chunks back one at a time, then [`validate`]
//! before answering queries.
//!
//! [`validate`]: DocumentIndex::validate

use std::collections::BTreeMap;

use parking_lot::{Condvar, Mutex};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde_json::Value;

use super::{DocumentIndex, FieldIndex, PostingMap};
use crate::config::FieldSpec;
use crate::error::{EngineError, EngineResult};
use crate::snapshot::{field_cfg_key, field_map_key, ChunkKind, Snapshot, REGISTRY_KEY, STORE_KEY};
use crate::types::StoredRecord;

/// Receiver of exported chunks. May be called from several threads at once.
pub trait ChunkSink: Sync {
    fn accept(&self, key: &str, data: Value);
}

impl DocumentIndex {
    /// Emit every chunk of this index into `sink`, ending with `store`.
    pub fn export(&self, sink: &dyn ChunkSink) -> Result<(), serde_json::Error> {
        sink.accept(REGISTRY_KEY, serde_json::to_value(self.registry())?);

        #[cfg(feature = "parallel")]
        self.fields()
            .par_iter()
            .try_for_each(|field| export_field(field, sink))?;

        #[cfg(not(feature = "parallel"))]
        for field in self.fields() {
            export_field(field, sink)?;
        }

        sink.accept(STORE_KEY, serde_json::to_value(self.store())?);
        Ok(())
    }

    /// Load one exported chunk into this index.
    ///
    /// `<field>.cfg` must match this index's own config for that field: an
    /// index built with different tokenization would answer queries wrongly.
    pub fn import(&mut self, key: &str, data: Value) -> EngineResult<()> {
        let kind = ChunkKind::parse(key).ok_or_else(|| EngineError::UnknownChunk {
            key: key.to_string(),
        })?;

        match kind {
            ChunkKind::Registry => {
                let registry: Vec<String> = serde_json::from_value(data)
                    .map_err(|e| EngineError::malformed_chunk(key, e))?;
                let mut sorted: Vec<&String> = registry.iter().collect();
                sorted.sort_unstable();
                if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
                    return Err(EngineError::malformed_chunk(key, "duplicate document id"));
                }
                self.set_registry(registry);
            }
            ChunkKind::Store => {
                let store: BTreeMap<String, StoredRecord> = serde_json::from_value(data)
                    .map_err(|e| EngineError::malformed_chunk(key, e))?;
                self.set_store(store);
            }
            ChunkKind::FieldConfig(name) => {
                let spec: FieldSpec = serde_json::from_value(data)
                    .map_err(|e| EngineError::malformed_chunk(key, e))?;
                let expected = self.field(name).ok_or_else(|| EngineError::UnknownChunk {
                    key: key.to_string(),
                })?;
                if *expected.spec() != spec {
                    return Err(EngineError::ConfigMismatch {
                        field: name.to_string(),
                    });
                }
            }
            ChunkKind::FieldMap(name) => {
                let map: PostingMap = serde_json::from_value(data)
                    .map_err(|e| EngineError::malformed_chunk(key, e))?;
                let field = self.field_mut(name).ok_or_else(|| EngineError::UnknownChunk {
                    key: key.to_string(),
                })?;
                check_map(field.spec(), &map).map_err(|reason| EngineError::malformed_chunk(key, reason))?;
                field.set_map(map);
            }
        }
        Ok(())
    }

    /// Check cross-chunk consistency after an import.
    ///
    /// Every posting must point at a registered slot and every registered id
    /// must have a stored record.
    pub fn validate(&self) -> EngineResult<()> {
        let registered = self.registry().len();
        for field in self.fields() {
            if let Some(max) = field.max_doc() {
                if max.as_usize() >= registered {
                    return Err(EngineError::MalformedIndex(format!(
                        "field '{}' references doc slot {} but only {} documents are registered",
                        field.name(),
                        max.get(),
                        registered
                    )));
                }
            }
        }
        if let Some(id) = self.registry().iter().find(|id| self.stored(id).is_none()) {
            return Err(EngineError::MalformedIndex(format!(
                "document '{}' has no stored fields",
                id
            )));
        }
        Ok(())
    }
}

fn export_field(field: &FieldIndex, sink: &dyn ChunkSink) -> Result<(), serde_json::Error> {
    sink.accept(&field_cfg_key(field.name()), serde_json::to_value(field.spec())?);
    sink.accept(&field_map_key(field.name()), serde_json::to_value(field.map())?);
    Ok(())
}

/// Posting lists must be non-empty, sorted, and within the field's resolution.
fn check_map(spec: &FieldSpec, map: &PostingMap) -> Result<(), String> {
    let slots = spec.slots();
    for (term, postings) in map {
        if postings.is_empty() {
            return Err(format!("term '{}' has no postings", term));
        }
        if postings.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(format!("postings for '{}' are not sorted", term));
        }
        if let Some(posting) = postings.iter().find(|p| p.slot() >= slots) {
            return Err(format!(
                "term '{}' has relevance slot {} outside resolution {}",
                term,
                posting.slot(),
                slots
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
struct Collected {
    chunks: BTreeMap<String, Value>,
    complete: bool,
    closed: bool,
}

/// Thread-safe chunk collector with a completion signal.
///
/// Completion fires exactly once, on the first `store` chunk. Chunks recorded
/// twice under the same key keep the latest value.
#[derive(Debug, Default)]
pub struct SnapshotCollector {
    inner: Mutex<Collected>,
    signal: Condvar,
}

impl SnapshotCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a chunk. Returns `true` for the one call that completes the export.
    pub fn record(&self, key: &str, data: Value) -> bool {
        let mut inner = self.inner.lock();
        inner.chunks.insert(key.to_string(), data);
        if key == STORE_KEY && !inner.complete {
            inner.complete = true;
            self.signal.notify_all();
            return true;
        }
        false
    }

    pub fn is_complete(&self) -> bool {
        self.inner.lock().complete
    }

    /// Number of distinct chunk keys recorded so far.
    pub fn len(&self) -> usize {
        self.inner.lock().chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark the producer as finished, complete or not. Wakes every waiter.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        self.signal.notify_all();
    }

    /// Closes the collector when dropped, even if the producer panicked.
    pub fn close_on_drop(&self) -> CloseGuard<'_> {
        CloseGuard(self)
    }

    /// Block until `store` arrives or the producer closes. Returns whether
    /// the export completed.
    pub fn wait(&self) -> bool {
        let mut inner = self.inner.lock();
        while !inner.complete && !inner.closed {
            self.signal.wait(&mut inner);
        }
        inner.complete
    }

    /// The collected snapshot, or `None` if `store` never arrived.
    pub fn into_snapshot(self) -> Option<Snapshot> {
        let inner = self.inner.into_inner();
        inner
            .complete
            .then(|| Snapshot::from_chunks(inner.chunks))
    }
}

impl ChunkSink for SnapshotCollector {
    fn accept(&self, key: &str, data: Value) {
        self.record(key, data);
    }
}

/// See [`SnapshotCollector::close_on_drop`].
pub struct CloseGuard<'a>(&'a SnapshotCollector);

impl Drop for CloseGuard<'_> {
    fn drop(&mut self) {
        self.0.close();
    }
}
