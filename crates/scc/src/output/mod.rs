//! Output formatting utilities for the scc CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules:
//!
//! - [`courses`] - Class entry output (filter results)
//! - [`diagnostics`] - Query tokens and problems (check, filter)
//! - [`helpers`] - Common formatting utilities (truncation, seats, days)

mod courses;
mod diagnostics;
pub mod helpers;

pub use courses::{format_entries_json, format_entries_table};
pub use diagnostics::{format_check_json, format_diagnostics, format_tokens_table};
