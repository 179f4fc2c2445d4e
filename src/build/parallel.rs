// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Content sources and parallel document loading.
//!
//! The builder does not care where pages come from, only that it gets them
//! in corpus order together with the navigation menu. [`ContentSource`] is
//! that seam. [`DirectorySource`] reads a content directory laid out as
//!
//! ```text
//! content/
//!   manifest.json     {"version": 1, "documents": ["intro.json", ...], "menu": "menu.json"}
//!   menu.json         {"items": [{"name": "Introduction", "path": "/intro"}, ...]}
//!   intro.json        {"id": "intro", "slug": "intro/", "rawBody": "...", ...}
//! ```
//!
//! The menu may also be YAML (`"menu": "menu.yaml"`), with the same shape:
//!
//! ```text
//! items:
//!   - name: Introduction
//!     path: /intro
//!     children: [...]
//! ```
//!
//! Reading and parsing the page files is embarrassingly parallel, so with the
//! `parallel` feature it runs on rayon. Results are collected back in manifest
//! order, so registration order (and with it ranking ties) does not depend on
//! thread scheduling.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{InputManifest, SourceDocument};
use crate::error::ContentError;
use crate::menu::Menu;

/// Where the builder gets its pages and menu from.
pub trait ContentSource {
    /// Every page, in corpus order.
    fn documents(&self) -> Result<Vec<SourceDocument>, ContentError>;

    fn menu(&self) -> Result<Menu, ContentError>;
}

/// In-memory content, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    pub documents: Vec<SourceDocument>,
    pub menu: Menu,
}

impl MemorySource {
    pub fn new(documents: Vec<SourceDocument>, menu: Menu) -> Self {
        Self { documents, menu }
    }
}

impl ContentSource for MemorySource {
    fn documents(&self) -> Result<Vec<SourceDocument>, ContentError> {
        Ok(self.documents.clone())
    }

    fn menu(&self) -> Result<Menu, ContentError> {
        Ok(self.menu.clone())
    }
}

/// A content directory described by `manifest.json`.
pub struct DirectorySource {
    root: PathBuf,
    manifest: InputManifest,
    #[cfg(feature = "parallel")]
    progress: Option<ProgressBar>,
}

impl DirectorySource {
    /// Read and validate `<root>/manifest.json`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ContentError> {
        let root = root.as_ref().to_path_buf();
        let manifest: InputManifest = read_json(&root.join("manifest.json"))?;
        manifest.validate()?;
        tracing::debug!(
            root = %root.display(),
            documents = manifest.documents.len(),
            "opened content directory"
        );
        Ok(Self {
            root,
            manifest,
            #[cfg(feature = "parallel")]
            progress: None,
        })
    }

    /// Report loading progress on `progress`.
    #[cfg(feature = "parallel")]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &InputManifest {
        &self.manifest
    }

    fn load_document(&self, filename: &str) -> Result<SourceDocument, ContentError> {
        read_json(&self.root.join(filename))
    }
}

impl ContentSource for DirectorySource {
    #[cfg(feature = "parallel")]
    fn documents(&self) -> Result<Vec<SourceDocument>, ContentError> {
        let counter = AtomicUsize::new(0);
        let total = self.manifest.documents.len();

        self.manifest
            .documents
            .par_iter()
            .map(|filename| {
                let doc = self.load_document(filename)?;

                if let Some(progress) = &self.progress {
                    let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
                    progress.set_position(count as u64);
                    if count % 10 == 0 || count == total {
                        progress.set_message(format!("{}/{}", count, total));
                    }
                }

                Ok(doc)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn documents(&self) -> Result<Vec<SourceDocument>, ContentError> {
        self.manifest
            .documents
            .iter()
            .map(|filename| self.load_document(filename))
            .collect()
    }

    fn menu(&self) -> Result<Menu, ContentError> {
        read_menu(&self.root.join(&self.manifest.menu))
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let content = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a menu file, as YAML for `.yaml`/`.yml` and as JSON otherwise.
fn read_menu(path: &Path) -> Result<Menu, ContentError> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if !is_yaml {
        return read_json(path);
    }

    let content = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ContentError::ParseYaml {
        path: path.to_path_buf(),
        source,
    })
}
