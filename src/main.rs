// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use docsift::{run_build, QueryEngine, SiteSearchNode};

mod cli;
use cli::display::*;
use cli::{init_tracing, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Index { input, output } => run_index(&input, &output),
        Commands::Search { file, query, limit } => run_search(&file, &query, limit),
        Commands::Inspect { file } => run_inspect(&file),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run_index(input: &Path, output: &Path) -> Result<()> {
    let start = Instant::now();
    let summary = run_build(input, output)
        .with_context(|| format!("failed to build search index from {}", input.display()))?;
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    eprintln!();
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} documents │ {} terms │ {} │ {}",
        summary.documents,
        summary.terms,
        format_size(summary.index_bytes),
        timing_ms(elapsed)
    );
    if let Some(path) = &summary.output {
        eprintln!("   {}", path.display());
    }
    Ok(())
}

fn load_node(path: &Path) -> Result<SiteSearchNode> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a search node", path.display()))
}

fn run_search(file: &Path, query: &str, limit: usize) -> Result<()> {
    let node = load_node(file)?;
    let engine = QueryEngine::from_node(&node).context("failed to load search index")?;

    let start = Instant::now();
    let results = engine.search_limited(query, limit);
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    title_box(&format!("\"{}\"", query));
    section_top("RESULTS");
    if results.is_empty() {
        row(&format!(" {}", dim("no matches")));
    }
    for (rank, result) in results.iter().enumerate() {
        let title = if result.title.is_empty() {
            dim("(untitled)")
        } else {
            themed(BRIGHT_CYAN, &[BOLD], &truncate(&result.title, 36))
        };
        row(&format!(
            " {:>3}  {}{}",
            rank + 1,
            pad_right(&title, 38),
            themed(BLUE, &[], &truncate(&result.path, 36))
        ));
        if !result.excerpt.is_empty() {
            row(&format!("      {}", dim(&truncate(&result.excerpt, 72))));
        }
    }
    section_mid("STATS");
    row(&format!(
        " {} of {} documents │ {}",
        results.len(),
        engine.document_count(),
        timing_ms(elapsed)
    ));
    section_bot();
    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let node = load_node(file)?;
    let engine = QueryEngine::from_node(&node).context("failed to load search index")?;
    let index = engine.index();

    title_box(&node.id);

    section_top("NODE");
    row(&format!(" type      {}", node.internal.node_type));
    row(&format!(
        " digest    {} {}",
        truncate(node.content_digest(), 24),
        check(node.verify_digest())
    ));
    row(&format!(" index     {}", format_size(node.index.len())));
    row(&format!(" documents {}", index.len()));
    row(&format!(" stored    {}", index.config().store.join(", ")));

    section_mid("FIELDS (merge order)");
    for field in index.fields() {
        let spec = field.spec();
        let postings: usize = field.map().values().map(Vec::len).sum();
        let minlength = spec
            .minlength
            .map(|n| format!("min {}", n))
            .unwrap_or_default();
        row(&format!(
            " {}{}res {:<3}{}{:>7} terms {:>8} postings",
            pad_right(&themed(CYAN, &[BOLD], &spec.field), 10),
            pad_right(&tokenize_label(spec.tokenize.as_str()), 10),
            spec.resolution,
            pad_right(&minlength, 8),
            field.term_count(),
            postings
        ));
    }
    section_bot();
    Ok(())
}
