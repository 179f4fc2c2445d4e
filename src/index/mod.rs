// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multi-field document index.
//!
//! A [`DocumentIndex`] owns one [`FieldIndex`] per configured field, a
//! registry mapping doc slots back to string ids, and the stored fields used
//! to render results. Searching runs every field independently and returns
//! one result group per field, in descending field priority. Merging those
//! groups is the query engine's job.
//!
//! The index serializes itself as a set of named chunks (see [`export`]) and
//! can be rebuilt chunk by chunk on the other side.

pub mod export;
pub mod field;

use std::collections::{BTreeMap, HashMap};

use crate::config::DocumentConfig;
use crate::types::{DocSlot, IndexableDocument, StoredRecord};

pub use export::{ChunkSink, SnapshotCollector};
pub use field::{FieldIndex, Posting, PostingMap};

/// A document matched by one field, with its stored fields attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'a> {
    pub id: &'a str,
    pub doc: &'a StoredRecord,
}

/// All hits from a single field, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHits<'a> {
    pub field: &'a str,
    pub hits: Vec<Hit<'a>>,
}

/// The searchable index for a whole corpus.
#[derive(Debug, Clone)]
pub struct DocumentIndex {
    config: DocumentConfig,
    /// Field indexes in descending priority.
    fields: Vec<FieldIndex>,
    /// Slot → document id, in registration order.
    registry: Vec<String>,
    slots: HashMap<String, DocSlot>,
    store: BTreeMap<String, StoredRecord>,
}

impl DocumentIndex {
    /// Create an empty index for `config`.
    pub fn new(config: DocumentConfig) -> Self {
        let fields = config
            .fields_by_priority()
            .into_iter()
            .cloned()
            .map(FieldIndex::new)
            .collect();
        Self {
            config,
            fields,
            registry: Vec::new(),
            slots: HashMap::new(),
            store: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn fields(&self) -> &[FieldIndex] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldIndex> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Registered ids in slot order.
    pub fn registry(&self) -> &[String] {
        &self.registry
    }

    pub fn stored(&self, id: &str) -> Option<&StoredRecord> {
        self.store.get(id)
    }

    /// Add a document, or replace it if its id is already registered.
    ///
    /// A replaced document keeps its slot, so its tie-break position is the
    /// position of its first registration. Documents without an id are skipped.
    pub fn add(&mut self, doc: &IndexableDocument) -> Option<DocSlot> {
        if doc.id.is_empty() {
            tracing::warn!(path = %doc.path, "skipping document without id");
            return None;
        }

        let slot = match self.slots.get(&doc.id) {
            Some(&slot) => {
                for field in &mut self.fields {
                    field.remove(slot);
                }
                slot
            }
            None => {
                let slot = DocSlot(self.registry.len() as u32);
                self.registry.push(doc.id.clone());
                self.slots.insert(doc.id.clone(), slot);
                slot
            }
        };

        for field in &mut self.fields {
            let text = doc.field(&field.spec().field).unwrap_or("");
            field.add(slot, text);
        }

        let mut record = StoredRecord::new();
        for name in &self.config.store {
            if let Some(value) = doc.field(name) {
                record.insert(name, value);
            }
        }
        self.store.insert(doc.id.clone(), record);

        Some(slot)
    }

    /// Search every field, enriching each hit with its stored record.
    ///
    /// Groups come back in descending field priority; fields without a match
    /// are omitted. Within a group, hits are in that field's relevance order.
    pub fn search(&self, query: &str) -> Vec<FieldHits<'_>> {
        self.fields
            .iter()
            .filter_map(|field| {
                let hits: Vec<Hit<'_>> = field
                    .search(query)
                    .into_iter()
                    .filter_map(|slot| self.hit(slot))
                    .collect();
                if hits.is_empty() {
                    None
                } else {
                    Some(FieldHits {
                        field: field.name(),
                        hits,
                    })
                }
            })
            .collect()
    }

    fn hit(&self, slot: DocSlot) -> Option<Hit<'_>> {
        let id = self.registry.get(slot.as_usize())?;
        let doc = self.store.get(id)?;
        Some(Hit { id, doc })
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut FieldIndex> {
        self.fields.iter_mut().find(|field| field.name() == name)
    }

    pub(crate) fn set_registry(&mut self, registry: Vec<String>) {
        self.slots = registry
            .iter()
            .enumerate()
            .map(|(slot, id)| (id.clone(), DocSlot(slot as u32)))
            .collect();
        self.registry = registry;
    }

    pub(crate) fn set_store(&mut self, store: BTreeMap<String, StoredRecord>) {
        self.store = store;
    }

    pub(crate) fn store(&self) -> &BTreeMap<String, StoredRecord> {
        &self.store
    }
}
