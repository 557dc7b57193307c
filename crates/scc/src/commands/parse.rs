//! Parse command implementation.
//!
//! Extracts class entries from a saved schedule listing page and writes them
//! as JSON.

use std::fs;
use std::path::PathBuf;

use scc_classes_rs::html::{self, ParseOptions};
use scc_classes_rs::serializer;
use tracing::info;

use super::{CommandContext, Result};

/// Options for the parse command.
#[derive(Debug)]
pub struct ParseCommandOptions {
    /// HTML file to read.
    pub input: PathBuf,
    /// Output file; stdout when `None`.
    pub output: Option<PathBuf>,
    /// Year override for `MM/DD` dates.
    pub year: Option<i32>,
    /// Pretty-print the JSON.
    pub pretty: bool,
}

/// Executes the parse command.
pub fn execute(ctx: &CommandContext, opts: &ParseCommandOptions) -> Result<()> {
    let html = fs::read_to_string(&opts.input)?;

    let mut parse_options = ParseOptions::default();
    if let Some(year) = opts.year.or(ctx.config.parse.year) {
        parse_options.year = year;
    }

    let entries = html::parse_with(&html, &parse_options)?;
    info!(
        input = %opts.input.display(),
        entries = entries.len(),
        year = parse_options.year,
        "parsed class listing"
    );

    let json = if opts.pretty {
        serializer::serialize_pretty(&entries)?
    } else {
        serializer::serialize(&entries)?
    };

    let Some(output) = &opts.output else {
        println!("{json}");
        return Ok(());
    };

    fs::write(output, json)?;

    if ctx.json_output {
        let summary = serde_json::json!({
            "status": "success",
            "entries": entries.len(),
            "path": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !ctx.quiet {
        println!("Wrote {} entries to {}", entries.len(), output.display());
    }

    Ok(())
}
