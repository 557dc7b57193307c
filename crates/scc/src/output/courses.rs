//! Class entry output formatting.

use owo_colors::OwoColorize;
use scc_classes_rs::models::{ClassEntry, FilterableClassEntry};
use scc_filter_rs::CstError;
use serde::Serialize;

use super::helpers::{format_class_type, format_meeting, format_seats, pad, truncate_str};

/// JSON output structure for the filter command.
#[derive(Serialize)]
pub struct EntriesOutput<'a> {
    pub entries: Vec<EntryOutput<'a>>,
    pub total: usize,
    pub diagnostics: &'a [CstError],
}

/// JSON output structure for a single entry.
#[derive(Serialize)]
pub struct EntryOutput<'a> {
    #[serde(flatten)]
    pub entry: &'a ClassEntry,
    pub selected: bool,
}

/// Formats filtered entries as JSON.
pub fn format_entries_json(
    entries: &[&FilterableClassEntry],
    total: usize,
    diagnostics: &[CstError],
) -> Result<String, serde_json::Error> {
    let output = EntriesOutput {
        entries: entries
            .iter()
            .map(|filterable| EntryOutput {
                entry: &filterable.entry,
                selected: filterable.selected,
            })
            .collect(),
        total,
        diagnostics,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats filtered entries as a table.
pub fn format_entries_table(entries: &[&FilterableClassEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No classes found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!(
        "{:<1} {:<6} {:<13} {:<30} {:<9} {:<7} {}",
        "", "CRN", "Course", "Title", "Type", "Seats", "Meets"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for filterable in entries {
        let entry = &filterable.entry;
        let marker = if filterable.selected { "*" } else { " " };

        let class_type = format_class_type(entry.class_type, use_colors);
        let seats_plain = format!("{}/{}", entry.capacity.remaining, entry.capacity.total);
        let seats = format_seats(entry.capacity.remaining, entry.capacity.total, use_colors);

        let meets: Vec<String> = entry.schedule.iter().map(format_meeting).collect();
        let crn = if use_colors {
            pad(&entry.crn.to_string().bold().to_string(), entry.crn.to_string().len(), 6)
        } else {
            format!("{:<6}", entry.crn)
        };

        output.push_str(&format!(
            "{} {} {:<13} {:<30} {} {} {}\n",
            marker,
            crn,
            truncate_str(&entry.code(), 13),
            truncate_str(&entry.title, 30),
            pad(&class_type, entry.class_type.as_str().len(), 9),
            pad(&seats, seats_plain.len(), 7),
            meets.join("; "),
        ));
    }

    output
}
