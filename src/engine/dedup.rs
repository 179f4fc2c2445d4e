// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result deduplication across field groups.
//!
//! A document should appear at most once in search results. A page titled
//! "Cloud API" that also mentions "cloud" in its body matches both the
//! `title` and the `rawBody` field; it must show up once, where the title
//! group puts it.
//!
//! `ResultMerger` keys on the document id only and keeps the **first**
//! occurrence. Feeding it groups in descending field priority is what makes
//! "first" mean "best". It never re-sorts.
//!
//! **Invariant**: Each document appears at most once in search results.
//!
//! **Verified by**:
//! - `prop_no_duplicate_ids_in_results` (tests/property.rs)
//! - `test_title_and_body_match_appears_once` (tests/search/deduplication.rs)

use std::collections::HashSet;

use crate::index::FieldHits;
use crate::types::QueryResult;

/// Order-preserving, first-occurrence-wins result merger.
#[derive(Debug, Default)]
pub struct ResultMerger {
    seen: HashSet<String>,
    results: Vec<QueryResult>,
}

impl ResultMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `result` unless its id was already merged. Returns whether it was added.
    pub fn merge(&mut self, result: QueryResult) -> bool {
        if self.seen.contains(&result.id) {
            return false;
        }
        self.seen.insert(result.id.clone());
        self.results.push(result);
        true
    }

    /// Merge every hit of one field group, in the group's order.
    pub fn merge_group(&mut self, group: &FieldHits<'_>) {
        for hit in &group.hits {
            if !self.seen.contains(hit.id) {
                self.merge(hit.doc.to_result(hit.id));
            }
        }
    }

    /// Merge groups in the order given.
    pub fn merge_all<'a>(&mut self, groups: impl IntoIterator<Item = &'a FieldHits<'a>>) {
        for group in groups {
            self.merge_group(group);
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn into_results(self) -> Vec<QueryResult> {
        self.results
    }
}
