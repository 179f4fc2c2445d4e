// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-field inverted index.
//!
//! Each indexed field keeps its own term → posting list map. A posting is a
//! `(doc slot, relevance slot)` pair: the relevance slot says how early in the
//! field the term occurs, bucketed into `resolution` slots.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTINGS_SORTED**: every posting list is sorted by `(doc, slot)`
//! 2. **NON_EMPTY**: every term in the map has at least one posting
//! 3. **SLOT_BOUNDED**: `slot < resolution` for every posting
//! 4. **OPTIMIZED_UNIQUE**: with `optimize`, at most one posting per (term, doc)
//!
//! # Relevance
//!
//! A document's relevance for a query is the sum, over query terms, of the
//! best (lowest) slot that term reaches in the document. Lower sorts first;
//! ties go to the document registered first.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::FieldSpec;
use crate::tokenize::FieldTokenizer;
use crate::types::DocSlot;

/// One occurrence (or, when optimized, the best occurrence) of a term.
///
/// Serialized as a two-element array `[doc, slot]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Posting(pub DocSlot, pub u8);

impl Posting {
    #[inline]
    pub fn doc(&self) -> DocSlot {
        self.0
    }

    #[inline]
    pub fn slot(&self) -> u8 {
        self.1
    }
}

/// Term → postings map for one field.
pub type PostingMap = BTreeMap<String, Vec<Posting>>;

/// Relevance slot for a token at `position` in a field of `token_count` tokens.
#[inline]
pub fn relevance_slot(position: usize, token_count: usize, slots: u8) -> u8 {
    if token_count == 0 {
        return 0;
    }
    let slot = position * slots as usize / token_count;
    slot.min(slots as usize - 1) as u8
}

/// Inverted index over a single document field.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    spec: FieldSpec,
    tokenizer: FieldTokenizer,
    map: PostingMap,
}

impl FieldIndex {
    pub fn new(spec: FieldSpec) -> Self {
        let tokenizer = FieldTokenizer::for_spec(&spec);
        Self {
            spec,
            tokenizer,
            map: BTreeMap::new(),
        }
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.field
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.map.len()
    }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.map.get(term).map(Vec::as_slice)
    }

    /// Index `text` as the content of this field for `doc`.
    ///
    /// The caller removes any previous postings for `doc` first.
    pub fn add(&mut self, doc: DocSlot, text: &str) {
        let field_terms = self.tokenizer.index_terms(text);
        if field_terms.terms.is_empty() {
            return;
        }
        let slots = self.spec.slots();
        let count = field_terms.token_count;

        if self.spec.optimize {
            let mut best: HashMap<String, u8> = HashMap::new();
            for (term, position) in field_terms.terms {
                let slot = relevance_slot(position, count, slots);
                best.entry(term)
                    .and_modify(|existing| *existing = (*existing).min(slot))
                    .or_insert(slot);
            }
            for (term, slot) in best {
                insert_sorted(self.map.entry(term).or_default(), Posting(doc, slot));
            }
        } else {
            for (term, position) in field_terms.terms {
                let slot = relevance_slot(position, count, slots);
                insert_sorted(self.map.entry(term).or_default(), Posting(doc, slot));
            }
        }
    }

    /// Drop every posting that belongs to `doc`.
    pub fn remove(&mut self, doc: DocSlot) {
        self.map.retain(|_, postings| {
            postings.retain(|posting| posting.doc() != doc);
            !postings.is_empty()
        });
    }

    /// Documents matching every query term, best relevance first.
    pub fn search(&self, query: &str) -> Vec<DocSlot> {
        let terms = self.tokenizer.query_terms(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scores: Option<HashMap<DocSlot, u32>> = None;
        for term in &terms {
            let Some(postings) = self.map.get(term) else {
                return Vec::new();
            };

            let mut best: HashMap<DocSlot, u8> = HashMap::new();
            for posting in postings {
                best.entry(posting.doc())
                    .and_modify(|slot| *slot = (*slot).min(posting.slot()))
                    .or_insert(posting.slot());
            }

            scores = Some(match scores {
                None => best
                    .into_iter()
                    .map(|(doc, slot)| (doc, u32::from(slot)))
                    .collect(),
                Some(mut acc) => {
                    acc.retain(|doc, _| best.contains_key(doc));
                    for (doc, score) in acc.iter_mut() {
                        *score += best.get(doc).copied().map(u32::from).unwrap_or(0);
                    }
                    acc
                }
            });

            if scores.as_ref().is_some_and(HashMap::is_empty) {
                return Vec::new();
            }
        }

        let mut ranked: Vec<(u32, DocSlot)> = scores
            .unwrap_or_default()
            .into_iter()
            .map(|(doc, score)| (score, doc))
            .collect();
        ranked.sort_unstable();
        ranked.into_iter().map(|(_, doc)| doc).collect()
    }

    pub fn map(&self) -> &PostingMap {
        &self.map
    }

    /// Replace the posting map with an imported one.
    pub fn set_map(&mut self, map: PostingMap) {
        self.map = map;
    }

    /// Highest doc slot referenced by any posting.
    pub fn max_doc(&self) -> Option<DocSlot> {
        self.map
            .values()
            .filter_map(|postings| postings.last())
            .map(Posting::doc)
            .max()
    }
}

/// Insert keeping the list sorted. Appends are the common case during a build.
fn insert_sorted(postings: &mut Vec<Posting>, posting: Posting) {
    match postings.last() {
        Some(last) if *last > posting => {
            let at = postings.partition_point(|p| *p <= posting);
            postings.insert(at, posting);
        }
        _ => postings.push(posting),
    }
}
