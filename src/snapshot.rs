// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The serialized form of a built index, and the node that carries it.
//!
//! A [`Snapshot`] is a flat map of chunk key → JSON value:
//!
//! ```text
//! "reg"            ids in registration order        ["a", "b"]
//! "<field>.cfg"    the field's FieldSpec            {"field":"title",...}
//! "<field>.map"    term → [[slot, relevance], ...]  {"cloud":[[1,0]],...}
//! "store"          id → stored fields               {"a":{"path":"/intro",...}}
//! ```
//!
//! The `store` chunk is always emitted last, and a snapshot without it is
//! incomplete. The [`SiteSearchNode`] wraps the JSON-encoded snapshot, the
//! JSON-encoded config and a SHA-256 content digest; it is the single record
//! a site build publishes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::config::DocumentConfig;

/// Registered document ids.
pub const REGISTRY_KEY: &str = "reg";

/// Stored fields per document id. Emitted last.
pub const STORE_KEY: &str = "store";

/// Node type of the published search record.
pub const SEARCH_NODE_TYPE: &str = "SiteSearch";

/// Id of the published search record. Every build reuses it, so a rebuild
/// replaces the previous node.
pub const SEARCH_NODE_ID: &str = "SiteSearch";

/// Key of a field's config chunk.
pub fn field_cfg_key(field: &str) -> String {
    format!("{}.cfg", field)
}

/// Key of a field's posting map chunk.
pub fn field_map_key(field: &str) -> String {
    format!("{}.map", field)
}

/// What a chunk key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind<'a> {
    Registry,
    Store,
    FieldConfig(&'a str),
    FieldMap(&'a str),
}

impl<'a> ChunkKind<'a> {
    pub fn parse(key: &'a str) -> Option<Self> {
        match key {
            REGISTRY_KEY => Some(ChunkKind::Registry),
            STORE_KEY => Some(ChunkKind::Store),
            _ => match key.rsplit_once('.')? {
                (field, "cfg") if !field.is_empty() => Some(ChunkKind::FieldConfig(field)),
                (field, "map") if !field.is_empty() => Some(ChunkKind::FieldMap(field)),
                _ => None,
            },
        }
    }
}

/// Exported index chunks, keyed by chunk name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    chunks: BTreeMap<String, Value>,
}

impl Snapshot {
    pub fn from_chunks(chunks: BTreeMap<String, Value>) -> Self {
        Self { chunks }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.chunks.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.chunks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// A snapshot is complete once it holds the `store` chunk.
    pub fn is_complete(&self) -> bool {
        self.chunks.contains_key(STORE_KEY)
    }

    pub fn into_chunks(self) -> BTreeMap<String, Value> {
        self.chunks
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.chunks)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Lowercase hex SHA-256 of `content`.
pub fn content_digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Node metadata, mirroring the data layer's `internal` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInternal {
    #[serde(rename = "type")]
    pub node_type: String,
    pub content_digest: String,
}

/// The published search record: `{id, index, documentConfig, internal}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSearchNode {
    pub id: String,
    /// JSON-encoded [`Snapshot`].
    pub index: String,
    /// JSON-encoded [`DocumentConfig`].
    pub document_config: String,
    pub internal: NodeInternal,
}

impl SiteSearchNode {
    pub fn new(snapshot: &Snapshot, config: &DocumentConfig) -> serde_json::Result<Self> {
        let index = snapshot.to_json()?;
        let document_config = serde_json::to_string(config)?;
        let digest = content_digest(&index);
        Ok(Self {
            id: SEARCH_NODE_ID.to_string(),
            index,
            document_config,
            internal: NodeInternal {
                node_type: SEARCH_NODE_TYPE.to_string(),
                content_digest: digest,
            },
        })
    }

    pub fn content_digest(&self) -> &str {
        &self.internal.content_digest
    }

    /// Does the stored digest still match the index payload?
    pub fn verify_digest(&self) -> bool {
        content_digest(&self.index) == self.internal.content_digest
    }
}
