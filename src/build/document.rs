// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::types::IndexableDocument;
use crate::utils::normalize_path;

/// A heading extracted from a page's markdown.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Heading {
    #[serde(alias = "value")]
    pub text: String,
    pub depth: u8,
}

/// A page as the content source hands it over.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub raw_body: String,
    #[serde(default)]
    pub headings: Vec<Heading>,
    /// Front-matter title, when the page sets one.
    #[serde(default)]
    pub title: Option<String>,
}

impl SourceDocument {
    /// Routable path for this page.
    pub fn path(&self) -> String {
        normalize_path(&self.slug)
    }

    /// All headings of `depth`, joined by single spaces.
    pub fn headings_at(&self, depth: u8) -> String {
        self.headings
            .iter()
            .filter(|heading| heading.depth == depth)
            .map(|heading| heading.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Text of the first heading on the page, whatever its depth.
    pub fn first_heading(&self) -> Option<&str> {
        self.headings.first().map(|heading| heading.text.as_str())
    }

    /// Derive the indexable form. `menu_title` wins over everything else.
    pub fn to_indexable(&self, menu_title: Option<&str>) -> IndexableDocument {
        IndexableDocument {
            id: self.id.clone(),
            path: self.path(),
            title: resolve_title(self, menu_title),
            excerpt: self.excerpt.clone(),
            h1: self.headings_at(1),
            h2: self.headings_at(2),
            h3: self.headings_at(3),
            h4: self.headings_at(4),
            raw_body: self.raw_body.clone(),
        }
    }
}

/// Title precedence: menu entry name, front-matter title, first heading, `""`.
///
/// Blank candidates are skipped.
pub fn resolve_title(doc: &SourceDocument, menu_title: Option<&str>) -> String {
    [menu_title, doc.title.as_deref(), doc.first_heading()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|title| !title.is_empty())
        .unwrap_or("")
        .to_string()
}
