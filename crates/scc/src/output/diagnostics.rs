//! Query token and diagnostic output formatting.

use owo_colors::OwoColorize;
use scc_filter_rs::{CstError, Query, Token};
use serde::Serialize;

/// JSON output structure for the check command.
#[derive(Serialize)]
pub struct CheckOutput<'a> {
    pub query: &'a str,
    pub valid: bool,
    pub tokens: &'a [Token],
    pub diagnostics: &'a [CstError],
}

/// Formats a check result as JSON.
pub fn format_check_json(
    query: &Query,
    diagnostics: &[CstError],
) -> Result<String, serde_json::Error> {
    let output = CheckOutput {
        query: query.source(),
        valid: diagnostics.is_empty(),
        tokens: query.tokens(),
        diagnostics,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats tokens as a table.
pub fn format_tokens_table(tokens: &[Token], use_colors: bool) -> String {
    if tokens.is_empty() {
        return "No tokens.\n".to_string();
    }

    let mut output = String::new();
    let header = format!("{:<10} {:<20} {:<20} {}", "Span", "Kind", "Value", "Error");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for token in tokens {
        let span = format!("{}..{}", token.span.start, token.span.end);
        let kind = format!("{:?}", token.kind);
        let value = format!("{:?}", token.value);
        let error = token.error.as_deref().unwrap_or_default();
        let error = if use_colors {
            error.red().to_string()
        } else {
            error.to_string()
        };
        output.push_str(&format!("{span:<10} {kind:<20} {value:<20} {error}"));
        output.push('\n');
    }

    output
}

/// Formats diagnostics with carets under the offending part of the query.
///
/// Line breaks in the query are shown as spaces so every caret lines up with
/// a single displayed line.
pub fn format_diagnostics(source: &str, diagnostics: &[CstError], use_colors: bool) -> String {
    let shown: String = source
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    let mut output = String::new();
    for diagnostic in diagnostics {
        let label = "error";
        if use_colors {
            output.push_str(&format!("{}: {}\n", label.red().bold(), diagnostic.message));
        } else {
            output.push_str(&format!("{}: {}\n", label, diagnostic.message));
        }

        let column = char_offset(source, diagnostic.span.start);
        let width = char_offset(source, diagnostic.span.end)
            .saturating_sub(column)
            .max(1);
        let carets = "^".repeat(width);

        output.push_str(&format!("  {shown}\n"));
        if use_colors {
            output.push_str(&format!("  {}{}\n", " ".repeat(column), carets.red()));
        } else {
            output.push_str(&format!("  {}{}\n", " ".repeat(column), carets));
        }
    }

    output
}

/// Converts a byte offset to a character column, clamping to the text.
fn char_offset(source: &str, byte: usize) -> usize {
    source
        .char_indices()
        .take_while(|(index, _)| *index < byte)
        .count()
}
