// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lazily-initialized, shareable query engine.
//!
//! A page keeps one engine for its whole lifetime and builds it on first use.
//! `EngineCell` makes that explicit: one initialization (concurrent callers
//! wait for it), then shared `&QueryEngine` access. A failed initialization
//! is remembered and reported as [`EngineState::Failed`], so "the index is
//! broken" never looks like "no results".

use std::sync::OnceLock;

use super::QueryEngine;
use crate::error::{EngineError, EngineResult};
use crate::snapshot::SiteSearchNode;
use crate::types::QueryResult;

/// Where an [`EngineCell`] is in its life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing loaded yet.
    Pending,
    Ready,
    Failed(EngineError),
}

#[derive(Debug, Default)]
pub struct EngineCell {
    slot: OnceLock<Result<QueryEngine, EngineError>>,
}

impl EngineCell {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// The engine, running `load` if nobody has yet.
    ///
    /// `load` runs at most once per cell. Its engine is fully imported before
    /// it is stored.
    pub fn get_or_load<F>(&self, load: F) -> EngineResult<&QueryEngine>
    where
        F: FnOnce() -> EngineResult<QueryEngine>,
    {
        self.slot
            .get_or_init(|| {
                let mut engine = load()?;
                engine.import_all()?;
                Ok(engine)
            })
            .as_ref()
            .map_err(|err| err.clone())
    }

    /// [`get_or_load`](Self::get_or_load) from a published node.
    pub fn get_or_load_node(&self, node: &SiteSearchNode) -> EngineResult<&QueryEngine> {
        self.get_or_load(|| QueryEngine::prepare(&node.index, &node.document_config))
    }

    /// The engine, if it loaded successfully.
    pub fn get(&self) -> Option<&QueryEngine> {
        self.slot.get().and_then(|loaded| loaded.as_ref().ok())
    }

    pub fn state(&self) -> EngineState {
        match self.slot.get() {
            None => EngineState::Pending,
            Some(Ok(_)) => EngineState::Ready,
            Some(Err(err)) => EngineState::Failed(err.clone()),
        }
    }

    /// Search the loaded engine. Empty while pending or failed; check
    /// [`state`](Self::state) to tell those apart from "no match".
    pub fn search(&self, text: &str) -> Vec<QueryResult> {
        self.get()
            .map(|engine| engine.search(text))
            .unwrap_or_default()
    }
}
