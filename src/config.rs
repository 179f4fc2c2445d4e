// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index configuration: which fields are indexed, how, and in what priority.
//!
//! The config is serialized next to the index as `documentConfig` so the
//! query side can rebuild an identical, empty index before importing chunks.
//! Its JSON shape is part of the snapshot format:
//!
//! ```json
//! {
//!   "store": ["path", "title", "excerpt"],
//!   "index": [
//!     { "field": "title", "tokenize": "forward", "optimize": true, "resolution": 9 },
//!     { "field": "rawBody", "tokenize": "strict", "optimize": true, "resolution": 3, "minlength": 3 }
//!   ]
//! }
//! ```
//!
//! `resolution` is the priority weight. Result groups are merged in descending
//! resolution order and are never re-sorted by score across fields.

use serde::{Deserialize, Serialize};

pub const FIELD_ID: &str = "id";
pub const FIELD_PATH: &str = "path";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_EXCERPT: &str = "excerpt";
pub const FIELD_H1: &str = "h1";
pub const FIELD_H2: &str = "h2";
pub const FIELD_H3: &str = "h3";
pub const FIELD_RAW_BODY: &str = "rawBody";

/// How a field's text is split into searchable units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tokenize {
    /// Every prefix of a token is indexed, so partial words match.
    Forward,
    /// Only whole tokens are indexed; a query term must match exactly.
    Strict,
}

impl Tokenize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tokenize::Forward => "forward",
            Tokenize::Strict => "strict",
        }
    }
}

/// Per-field indexing options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: String,
    pub tokenize: Tokenize,
    /// Compact posting lists to one entry per (term, document).
    #[serde(default)]
    pub optimize: bool,
    /// Priority weight and number of relevance slots. Must be at least 1.
    pub resolution: u8,
    /// Tokens shorter than this (in characters) are neither indexed nor queried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minlength: Option<usize>,
}

impl FieldSpec {
    pub fn new(field: &str, tokenize: Tokenize, resolution: u8) -> Self {
        Self {
            field: field.to_string(),
            tokenize,
            optimize: true,
            resolution,
            minlength: None,
        }
    }

    pub fn with_minlength(mut self, minlength: usize) -> Self {
        self.minlength = Some(minlength);
        self
    }

    /// Effective minimum token length (1 when unset).
    #[inline]
    pub fn min_token_len(&self) -> usize {
        self.minlength.unwrap_or(1).max(1)
    }

    /// Effective number of relevance slots (never 0).
    #[inline]
    pub fn slots(&self) -> u8 {
        self.resolution.max(1)
    }
}

/// The full document config: stored fields plus indexed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub store: Vec<String>,
    pub index: Vec<FieldSpec>,
}

impl DocumentConfig {
    /// The configuration every documentation site build uses.
    pub fn site_default() -> Self {
        Self {
            store: vec![
                FIELD_PATH.to_string(),
                FIELD_TITLE.to_string(),
                FIELD_EXCERPT.to_string(),
            ],
            index: vec![
                FieldSpec::new(FIELD_TITLE, Tokenize::Forward, 9),
                FieldSpec::new(FIELD_H1, Tokenize::Forward, 8),
                FieldSpec::new(FIELD_H2, Tokenize::Forward, 6),
                FieldSpec::new(FIELD_H3, Tokenize::Forward, 4),
                FieldSpec::new(FIELD_RAW_BODY, Tokenize::Strict, 3).with_minlength(3),
            ],
        }
    }

    /// Indexed fields ordered by descending priority.
    ///
    /// The sort is stable: fields with equal resolution keep their declared order.
    pub fn fields_by_priority(&self) -> Vec<&FieldSpec> {
        let mut fields: Vec<&FieldSpec> = self.index.iter().collect();
        fields.sort_by(|a, b| b.resolution.cmp(&a.resolution));
        fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.index.iter().find(|spec| spec.field == name)
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self::site_default()
    }
}
