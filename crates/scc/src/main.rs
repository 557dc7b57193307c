use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod logging;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::load_config;
use commands::filter::FilterOptions;
use commands::parse::ParseCommandOptions;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(
        cli.verbose,
        cli.quiet,
        !cli.no_color && std::env::var_os("NO_COLOR").is_none(),
    );

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    // Config commands must work even when the config file is broken.
    let config = match &cli.command {
        Commands::Config { .. } | Commands::Completions { .. } => {
            load_config().unwrap_or_default()
        }
        _ => load_config()?,
    };
    let ctx = CommandContext::new(cli, config);

    match &cli.command {
        Commands::Parse {
            input,
            output,
            year,
            pretty,
        } => commands::parse::execute(
            &ctx,
            &ParseCommandOptions {
                input: input.clone(),
                output: output.clone(),
                year: *year,
                pretty: *pretty,
            },
        ),
        Commands::Filter {
            query,
            input,
            selected,
            limit,
        } => commands::filter::execute(
            &ctx,
            &FilterOptions {
                query: query.clone(),
                input: input.clone(),
                selected: selected.clone(),
                limit: *limit,
            },
        ),
        Commands::Check { query, tokens } => commands::check::execute(&ctx, query, *tokens),
        Commands::Config { command } => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
            Some(ConfigCommands::Init { force }) => commands::config::execute_init(&ctx, *force),
        },
        Commands::Completions { shell } => Ok(commands::completions::execute(shell)?),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Classes(_) => "PARSE_ERROR",
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::InvalidQuery { .. } => "INVALID_QUERY",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Filter(_) => ExitCode::from(1),
        CommandError::InvalidQuery { .. } => ExitCode::from(1),
        CommandError::Classes(scc_classes_rs::Error::Json(_)) => ExitCode::from(4),
        CommandError::Classes(_) => ExitCode::from(2),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}
