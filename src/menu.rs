// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Navigation menu and tree flattening.
//!
//! The site's menu is a nested list of `{name, path, children?}` entries. The
//! index builder only needs it to label pages: a document whose path matches
//! a menu entry takes that entry's name as its title. The same flattening is
//! useful anywhere a nested table of contents must be walked in display order,
//! so it works over any [`TreeNode`], not just menu items.

use serde::{Deserialize, Serialize};

use crate::utils::normalize_path;

/// A node in an ordered tree.
pub trait TreeNode {
    fn children(&self) -> &[Self]
    where
        Self: Sized;
}

/// Flatten a forest into pre-order (parent before children, siblings in order).
///
/// Iterative, so nesting depth is bounded only by memory.
pub fn flatten<T: TreeNode>(roots: &[T]) -> Vec<&T> {
    let mut out = Vec::new();
    let mut stack: Vec<&T> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children().iter().rev());
    }
    out
}

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Text shown in the navigation.
    pub name: String,
    /// URL path with a leading slash.
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl TreeNode for MenuItem {
    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// The whole navigation menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

/// A menu entry without its children: what title resolution looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry<'a> {
    pub name: &'a str,
    pub path: &'a str,
}

impl Menu {
    /// All entries in display order.
    pub fn entries(&self) -> Vec<MenuEntry<'_>> {
        flatten(&self.items)
            .into_iter()
            .map(|item| MenuEntry {
                name: &item.name,
                path: &item.path,
            })
            .collect()
    }

    /// Name of the first entry (in display order) whose path matches `path`.
    ///
    /// Both sides are normalized first, so `/intro/` and `intro` match `/intro`.
    pub fn title_for(&self, path: &str) -> Option<&str> {
        let path = normalize_path(path);
        flatten(&self.items)
            .into_iter()
            .find(|item| normalize_path(&item.path) == path)
            .map(|item| item.name.as_str())
    }
}
