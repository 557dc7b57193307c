//! Filter command implementation.
//!
//! Loads class entries written by `scc parse` and lists the ones a query
//! matches.

use std::fs;
use std::path::{Path, PathBuf};

use scc_classes_rs::models::FilterableClassEntry;
use scc_classes_rs::serializer;
use scc_filter_rs::Query;

use super::{CommandContext, Result};
use crate::output::{format_diagnostics, format_entries_json, format_entries_table};

/// Options for the filter command.
#[derive(Debug)]
pub struct FilterOptions {
    /// Query text.
    pub query: String,
    /// JSON file of class entries.
    pub input: PathBuf,
    /// CRNs to mark as selected.
    pub selected: Vec<u32>,
    /// Maximum number of results to print.
    pub limit: Option<usize>,
}

/// Loads entries from `path` and marks the selected CRNs.
pub fn load_entries(path: &Path, selected: &[u32]) -> Result<Vec<FilterableClassEntry>> {
    let json = fs::read_to_string(path)?;
    let entries = serializer::deserialize(&json)?
        .into_iter()
        .map(|entry| {
            let mut filterable = FilterableClassEntry::from(entry);
            filterable.selected = selected.contains(&filterable.entry.crn);
            filterable
        })
        .collect();
    Ok(entries)
}

/// Executes the filter command.
pub fn execute(ctx: &CommandContext, opts: &FilterOptions) -> Result<()> {
    let entries = load_entries(&opts.input, &opts.selected)?;
    let query = Query::compile(&opts.query);

    let diagnostics = query.diagnostics();
    let show_diagnostics = ctx.config.filter.show_diagnostics.unwrap_or(true);
    if !diagnostics.is_empty() && show_diagnostics && !ctx.quiet && !ctx.json_output {
        eprint!(
            "{}",
            format_diagnostics(query.source(), &diagnostics, ctx.use_colors)
        );
    }

    let mut matched = query.filter(&entries)?;
    let total = matched.len();
    if let Some(limit) = opts.limit {
        matched.truncate(limit);
    }

    if ctx.json_output {
        println!(
            "{}",
            format_entries_json(&matched, total, &diagnostics)?
        );
    } else if !ctx.quiet {
        print!("{}", format_entries_table(&matched, ctx.use_colors));
        if matched.len() < total {
            println!("... {} more", total - matched.len());
        }
    }

    Ok(())
}
