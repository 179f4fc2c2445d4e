// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where the finished search node goes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, BuildResult};
use crate::snapshot::SiteSearchNode;

/// Receiver of the single record a site build publishes.
pub trait DataLayer {
    fn create_node(&mut self, node: SiteSearchNode) -> BuildResult<()>;
}

/// Keeps created nodes in memory.
#[derive(Debug, Default)]
pub struct MemoryDataLayer {
    nodes: Vec<SiteSearchNode>,
}

impl MemoryDataLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[SiteSearchNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<SiteSearchNode> {
        self.nodes
    }
}

impl DataLayer for MemoryDataLayer {
    fn create_node(&mut self, node: SiteSearchNode) -> BuildResult<()> {
        self.nodes.push(node);
        Ok(())
    }
}

/// Writes the node as `site-search-<digest8>.json` into a directory.
///
/// A site has one search node, so writing a node removes every other
/// `site-search-*.json` in the directory.
#[derive(Debug)]
pub struct FileDataLayer {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileDataLayer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in creation order. Only the last one still exists.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name a node is written under.
    pub fn file_name(node: &SiteSearchNode) -> String {
        let digest = node.content_digest();
        format!("site-search-{}.json", &digest[..digest.len().min(8)])
    }
}

impl DataLayer for FileDataLayer {
    fn create_node(&mut self, node: SiteSearchNode) -> BuildResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| BuildError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let name = Self::file_name(&node);
        let path = self.dir.join(&name);
        let json = serde_json::to_string_pretty(&node)?;
        fs::write(&path, json).map_err(|source| BuildError::Io {
            path: path.clone(),
            source,
        })?;
        self.remove_stale(&name)?;

        tracing::info!(path = %path.display(), "wrote search node");
        self.written.push(path);
        Ok(())
    }
}

impl FileDataLayer {
    fn remove_stale(&self, current: &str) -> BuildResult<()> {
        let entries = fs::read_dir(&self.dir).map_err(|source| BuildError::Io {
            path: self.dir.clone(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| BuildError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name != current && is_node_file(name) {
                let stale = entry.path();
                fs::remove_file(&stale).map_err(|source| BuildError::Io {
                    path: stale.clone(),
                    source,
                })?;
                tracing::debug!(path = %stale.display(), "removed previous search node");
            }
        }
        Ok(())
    }
}

fn is_node_file(name: &str) -> bool {
    name.starts_with("site-search-") && name.ends_with(".json")
}
