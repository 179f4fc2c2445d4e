// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-time engine: load a snapshot, answer queries.
//!
//! Loading is split in two so a UI thread can interleave it with other work:
//!
//! 1. [`QueryEngine::prepare`] parses both JSON strings, rebuilds an empty
//!    index from the config and queues every chunk.
//! 2. [`QueryEngine::import_next`] imports one chunk per call. After the last
//!    one the snapshot is validated and the engine becomes ready.
//!
//! [`QueryEngine::load`] does both in one go. Until the engine is ready every
//! query returns an empty list; once ready, queries are `&self` and cannot
//! fail.
//!
//! # Merging
//!
//! The index returns one group of hits per field, highest-priority field
//! first. The engine walks those groups in order and keeps the first
//! appearance of each document (see [`ResultMerger`]). There is no cross-field
//! re-scoring: a title match always outranks a body-only match.

pub mod cell;
pub mod dedup;

use std::collections::{HashSet, VecDeque};

use serde_json::Value;

use crate::config::DocumentConfig;
use crate::error::{EngineError, EngineResult};
use crate::index::DocumentIndex;
use crate::snapshot::{SiteSearchNode, Snapshot, REGISTRY_KEY, STORE_KEY};
use crate::types::QueryResult;

pub use cell::{EngineCell, EngineState};
pub use dedup::ResultMerger;

/// A document index being loaded from, or loaded from, a snapshot.
#[derive(Debug)]
pub struct QueryEngine {
    index: DocumentIndex,
    pending: VecDeque<(String, Value)>,
    imported: HashSet<String>,
    failure: Option<EngineError>,
    ready: bool,
}

impl QueryEngine {
    /// Parse `index_json` and `document_config_json` and queue every chunk.
    pub fn prepare(index_json: &str, document_config_json: &str) -> EngineResult<Self> {
        let config: DocumentConfig = serde_json::from_str(document_config_json)
            .map_err(|e| EngineError::MalformedConfig(e.to_string()))?;
        let snapshot =
            Snapshot::from_json(index_json).map_err(|e| EngineError::MalformedIndex(e.to_string()))?;
        Self::from_snapshot(snapshot, config)
    }

    /// Queue the chunks of an already-parsed snapshot.
    pub fn from_snapshot(snapshot: Snapshot, config: DocumentConfig) -> EngineResult<Self> {
        check_config(&config)?;
        let pending: VecDeque<(String, Value)> = snapshot.into_chunks().into_iter().collect();
        tracing::debug!(chunks = pending.len(), "prepared query engine");
        Ok(Self {
            index: DocumentIndex::new(config),
            pending,
            imported: HashSet::new(),
            failure: None,
            ready: false,
        })
    }

    /// Prepare and import everything.
    pub fn load(index_json: &str, document_config_json: &str) -> EngineResult<Self> {
        let mut engine = Self::prepare(index_json, document_config_json)?;
        engine.import_all()?;
        Ok(engine)
    }

    /// Load from a published search node.
    pub fn from_node(node: &SiteSearchNode) -> EngineResult<Self> {
        if !node.verify_digest() {
            tracing::warn!(id = %node.id, "search node digest does not match its index");
        }
        Self::load(&node.index, &node.document_config)
    }

    /// Import one queued chunk.
    ///
    /// Returns `Ok(true)` while there was work to do and `Ok(false)` once the
    /// engine is ready. The call that imports the last chunk also validates
    /// the snapshot. A failure is sticky: every later call returns it again.
    pub fn import_next(&mut self) -> EngineResult<bool> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.ready {
            return Ok(false);
        }

        let step = match self.pending.pop_front() {
            Some((key, value)) => self.import_chunk(key, value),
            None => self.finish(),
        };
        let step = step.and_then(|()| {
            if self.pending.is_empty() && !self.ready {
                self.finish()
            } else {
                Ok(())
            }
        });

        match step {
            Ok(()) => Ok(true),
            Err(err) => {
                tracing::warn!(error = %err, "search index failed to load");
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Import every remaining chunk.
    pub fn import_all(&mut self) -> EngineResult<()> {
        while self.import_next()? {}
        Ok(())
    }

    fn import_chunk(&mut self, key: String, value: Value) -> EngineResult<()> {
        self.index.import(&key, value)?;
        self.imported.insert(key);
        Ok(())
    }

    fn finish(&mut self) -> EngineResult<()> {
        for key in [REGISTRY_KEY, STORE_KEY] {
            if !self.imported.contains(key) {
                return Err(EngineError::MissingChunk {
                    key: key.to_string(),
                });
            }
        }
        self.index.validate()?;
        self.ready = true;
        tracing::debug!(documents = self.index.len(), "query engine ready");
        Ok(())
    }

    /// True once every chunk has been imported and validated.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Chunks still waiting to be imported.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    pub fn document_count(&self) -> usize {
        self.index.len()
    }

    /// Search every field and merge the groups, first occurrence wins.
    ///
    /// Empty while not ready, and for a blank query.
    pub fn search(&self, text: &str) -> Vec<QueryResult> {
        if !self.ready || text.trim().is_empty() {
            return Vec::new();
        }
        let groups = self.index.search(text);
        let mut merger = ResultMerger::new();
        merger.merge_all(&groups);
        merger.into_results()
    }

    /// [`search`](Self::search), capped at `limit` results after merging.
    pub fn search_limited(&self, text: &str, limit: usize) -> Vec<QueryResult> {
        let mut results = self.search(text);
        results.truncate(limit);
        results
    }
}

/// Reject configs no index could have been built with.
fn check_config(config: &DocumentConfig) -> EngineResult<()> {
    let mut names = HashSet::new();
    for spec in &config.index {
        if spec.field.is_empty() {
            return Err(EngineError::MalformedConfig("field with empty name".to_string()));
        }
        if spec.resolution == 0 {
            return Err(EngineError::MalformedConfig(format!(
                "field '{}' has resolution 0",
                spec.field
            )));
        }
        if !names.insert(spec.field.as_str()) {
            return Err(EngineError::MalformedConfig(format!(
                "field '{}' is configured twice",
                spec.field
            )));
        }
    }
    Ok(())
}
