// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenization: turning field text and queries into index terms.
//!
//! Text is normalized first (lowercase, diacritics stripped), then split into
//! maximal runs of alphanumeric characters. What happens next depends on the
//! field's [`Tokenize`] strategy:
//!
//! - `strict`: the token itself is the term. "microcontrollers" only matches
//!   the query "microcontrollers".
//! - `forward`: every prefix of the token is a term, so the query "micro"
//!   finds "microcontrollers". Lookup stays an exact map hit at query time.
//!
//! Tokens shorter than the field's `minlength` are dropped on both sides, so
//! a query term that could never be indexed is never looked up either.

use crate::config::{FieldSpec, Tokenize};
use crate::utils::normalize;

/// Word boundary detection: checks if character is a word separator.
#[inline]
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Split text into normalized tokens, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(is_word_boundary)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Terms for one field of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTerms {
    /// `(term, position)` where position is the token's index in the field.
    pub terms: Vec<(String, usize)>,
    /// Number of tokens in the field before the minlength filter.
    pub token_count: usize,
}

/// Tokenizer bound to one field's strategy and minimum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTokenizer {
    strategy: Tokenize,
    min_len: usize,
}

impl FieldTokenizer {
    pub fn new(strategy: Tokenize, min_len: usize) -> Self {
        Self {
            strategy,
            min_len: min_len.max(1),
        }
    }

    pub fn for_spec(spec: &FieldSpec) -> Self {
        Self::new(spec.tokenize, spec.min_token_len())
    }

    pub fn strategy(&self) -> Tokenize {
        self.strategy
    }

    /// Terms to index for a field's text.
    pub fn index_terms(&self, text: &str) -> FieldTerms {
        let tokens = tokenize(text);
        let token_count = tokens.len();
        let mut terms = Vec::new();

        for (position, token) in tokens.into_iter().enumerate() {
            if token.chars().count() < self.min_len {
                continue;
            }
            match self.strategy {
                Tokenize::Strict => terms.push((token, position)),
                Tokenize::Forward => {
                    for prefix in prefixes(&token, self.min_len) {
                        terms.push((prefix.to_string(), position));
                    }
                }
            }
        }

        FieldTerms { terms, token_count }
    }

    /// Terms to look up for a query, deduplicated, in query order.
    ///
    /// Query terms are never expanded: under `forward` the index already holds
    /// every prefix, so the term is looked up as typed.
    pub fn query_terms(&self, query: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for token in tokenize(query) {
            if token.chars().count() < self.min_len || out.contains(&token) {
                continue;
            }
            out.push(token);
        }
        out
    }
}

/// Character prefixes of `token` with at least `min_len` characters, shortest first.
fn prefixes(token: &str, min_len: usize) -> impl Iterator<Item = &str> {
    token
        .char_indices()
        .map(|(offset, c)| offset + c.len_utf8())
        .enumerate()
        .filter(move |(count, _)| count + 1 >= min_len)
        .map(move |(_, end)| &token[..end])
}
