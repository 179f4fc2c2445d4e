// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for building and loading search indexes.
//!
//! Build-time failures ([`BuildError`]) abort the whole site build; nothing is
//! published. Recoverable problems (a page without a title, a page missing
//! from the menu) are not errors at all: they are logged with `tracing::warn!`
//! and the build carries on.
//!
//! Query-engine failures ([`EngineError`]) only happen while loading a
//! snapshot. Once an engine is ready, queries cannot fail; an empty result is
//! just an empty `Vec`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of the content source (the upstream content query).
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid manifest: {0}")]
    Manifest(String),
}

/// Fatal error of the index builder.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("🚨 ERROR: loading site content failed: {0}")]
    ContentQuery(#[from] ContentError),

    #[error("🚨 ERROR: the menu path {path} does not have a corresponding content document")]
    MissingMenuTarget { path: String },

    #[error("🚨 ERROR: content document at {path} has no id")]
    MissingDocumentId { path: String },

    #[error("index export finished without emitting the store chunk")]
    IncompleteExport,

    #[error("failed to serialize search index: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Failure to turn a snapshot back into a queryable index.
///
/// `Clone` so an [`EngineCell`](crate::EngineCell) can hand the same failure
/// to every caller that asks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("malformed documentConfig: {0}")]
    MalformedConfig(String),

    #[error("malformed index: {0}")]
    MalformedIndex(String),

    #[error("chunk '{key}' is malformed: {reason}")]
    MalformedChunk { key: String, reason: String },

    #[error("unknown chunk '{key}'")]
    UnknownChunk { key: String },

    #[error("snapshot is missing the '{key}' chunk")]
    MissingChunk { key: String },

    #[error("field '{field}' was indexed with a different configuration")]
    ConfigMismatch { field: String },
}

impl EngineError {
    pub(crate) fn malformed_chunk(key: &str, reason: impl ToString) -> Self {
        EngineError::MalformedChunk {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
