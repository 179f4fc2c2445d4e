// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The documents that flow through the search pipeline.
//!
//! A source document becomes an [`IndexableDocument`] at build time, its
//! stored fields survive the snapshot as a [`StoredRecord`], and a query turns
//! a stored record back into a [`QueryResult`].
//!
//! # Invariants
//!
//! - **IndexableDocument**: `!id.is_empty() ∧ path.starts_with('/')`, and the
//!   path never ends with `/` unless it is the root itself.
//! - **DocSlot**: `slot < registry.len()` for the index that handed it out.
//!   Slots are registration order, which is also the final tie-breaker for
//!   ranking within a field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{FIELD_EXCERPT, FIELD_PATH, FIELD_TITLE};

// =============================================================================
// NEWTYPES
// =============================================================================

/// Position of a document in the index registry.
///
/// Postings refer to documents by slot rather than by their string id, which
/// keeps the exported posting maps compact. Use `as_usize()` for indexing into
/// the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct DocSlot(pub u32);

impl DocSlot {
    /// Create a slot, validating it's within the registry.
    #[inline]
    pub fn new(slot: u32, registered: usize) -> Option<Self> {
        if (slot as usize) < registered {
            Some(DocSlot(slot))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for registry indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocSlot {
    fn from(slot: u32) -> Self {
        DocSlot(slot)
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// A document with every searchable field flattened into a string.
///
/// One per source document. Heading fields hold all headings of that depth
/// joined by single spaces; `h4` is derived for completeness even though the
/// site configuration does not index it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexableDocument {
    pub id: String,
    pub path: String,
    pub title: String,
    pub excerpt: String,
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
    pub raw_body: String,
}

impl IndexableDocument {
    /// Look up a field by the name used in the index configuration.
    ///
    /// Names follow the serialized (camelCase) form, so the body is `rawBody`.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "id" => &self.id,
            "path" => &self.path,
            "title" => &self.title,
            "excerpt" => &self.excerpt,
            "h1" => &self.h1,
            "h2" => &self.h2,
            "h3" => &self.h3,
            "h4" => &self.h4,
            "rawBody" => &self.raw_body,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// The subset of a document's fields kept in the snapshot's `store` chunk.
///
/// Only the fields named in the config's `store` list end up here, so a result
/// can be rendered without going back to the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredRecord(BTreeMap<String, String>);

impl StoredRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: &str) {
        self.0.insert(field.to_string(), value.to_string());
    }

    /// Stored value for `field`, or `""` when the field was not stored.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decorate the record with its id to form a displayable result.
    pub fn to_result(&self, id: &str) -> QueryResult {
        QueryResult {
            id: id.to_string(),
            title: self.get(FIELD_TITLE).to_string(),
            path: self.get(FIELD_PATH).to_string(),
            excerpt: self.get(FIELD_EXCERPT).to_string(),
        }
    }
}

/// One search hit as the UI renders it.
///
/// Built fresh for every query; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryResult {
    pub id: String,
    pub title: String,
    pub path: String,
    pub excerpt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup_uses_serialized_names() {
        let doc = IndexableDocument {
            id: "a".to_string(),
            raw_body: "body text".to_string(),
            h2: "Setup".to_string(),
            ..Default::default()
        };
        assert_eq!(doc.field("rawBody"), Some("body text"));
        assert_eq!(doc.field("h2"), Some("Setup"));
        assert_eq!(doc.field("raw_body"), None);
        assert_eq!(doc.field("unknown"), None);
    }

    #[test]
    fn test_stored_record_missing_field_is_empty() {
        let mut record = StoredRecord::new();
        record.insert("path", "/intro");
        let result = record.to_result("a");
        assert_eq!(result.path, "/intro");
        assert_eq!(result.title, "");
        assert_eq!(result.id, "a");
    }

    #[test]
    fn test_stored_record_serializes_as_plain_map() {
        let mut record = StoredRecord::new();
        record.insert("title", "Intro");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"title":"Intro"}"#);
    }

    #[test]
    fn test_doc_slot_bounds() {
        assert_eq!(DocSlot::new(2, 3), Some(DocSlot(2)));
        assert_eq!(DocSlot::new(3, 3), None);
    }
}
