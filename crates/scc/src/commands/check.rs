//! Check command implementation.
//!
//! Shows how a query is tokenized and what is wrong with it.

use scc_filter_rs::Query;

use super::{CommandContext, CommandError, Result};
use crate::output::{format_check_json, format_diagnostics, format_tokens_table};

/// Executes the check command.
///
/// Fails with [`CommandError::InvalidQuery`] if the query has diagnostics.
pub fn execute(ctx: &CommandContext, query: &str, show_tokens: bool) -> Result<()> {
    let query = Query::compile(query);
    let diagnostics = query.diagnostics();

    if ctx.json_output {
        println!("{}", format_check_json(&query, &diagnostics)?);
    } else if !ctx.quiet {
        if show_tokens || ctx.verbose {
            print!("{}", format_tokens_table(query.tokens(), ctx.use_colors));
        }
        if diagnostics.is_empty() {
            println!("Query is valid.");
        } else {
            print!(
                "{}",
                format_diagnostics(query.source(), &diagnostics, ctx.use_colors)
            );
        }
    }

    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(CommandError::InvalidQuery {
            count: diagnostics.len(),
        })
    }
}
