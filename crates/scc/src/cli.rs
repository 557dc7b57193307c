//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the scc CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// scc - Extract and filter class schedule listings
#[derive(Parser, Debug)]
#[command(name = "scc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract class entries from a saved schedule listing page
    #[command(alias = "p")]
    Parse {
        /// HTML file to read
        input: PathBuf,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Year for MM/DD dates (default: config, then current year)
        #[arg(long)]
        year: Option<i32>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Filter parsed class entries with a query
    #[command(alias = "f")]
    Filter {
        /// Filter query (e.g., "subject:ACCT and capacity.remaining:>0")
        query: String,

        /// JSON file written by `scc parse`
        #[arg(short, long)]
        input: PathBuf,

        /// Mark a CRN as selected (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        selected: Vec<u32>,

        /// Limit results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Check a query and show its tokens and problems
    Check {
        /// Filter query
        query: String,

        /// Also print the token list
        #[arg(long)]
        tokens: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
