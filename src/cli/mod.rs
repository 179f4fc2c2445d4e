// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the docsift command-line interface.
//!
//! Three subcommands: `index` builds a search node from a content directory,
//! `search` queries a built node, and `inspect` shows what a node contains.

pub mod display;

use std::path::PathBuf;
use std::sync::Once;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docsift",
    about = "Build-time search indexes and multi-field querying for documentation sites",
    version
)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search node from a content directory
    Index {
        /// Input directory containing manifest.json, the menu and document files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the site-search-<digest>.json node
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Search a built node and display results
    Search {
        /// Path to a site-search-*.json node
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Inspect the fields and chunks of a built node
    Inspect {
        /// Path to a site-search-*.json node
        file: PathBuf,
    },
}

static TRACING: Once = Once::new();

/// Initialize tracing to stderr. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    TRACING.call_once(|| {
        let default = if verbose { "debug" } else { "info" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(display::use_colors_stderr())
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact();

        if let Err(e) = builder.try_init() {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
