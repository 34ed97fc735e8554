//! Nebula introspection CLI
//!
//! Works on the JSON type definitions written by `TypeRegistry::to_json`.
//!
//! # Usage
//!
//! ```bash
//! # Types as an editor sees them (hidden members removed)
//! nebula-introspect types --file types.json
//!
//! # Completion at the end of the input
//! nebula-introspect suggest --file types.json --var point=Point '#point.'
//!
//! # Check every reference; exit code 1 when any is invalid
//! nebula-introspect validate --file types.json --var point=Point '#point.x + 1'
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::config::CliConfig;

/// Inspect Nebula type definitions and check expression references
#[derive(Parser, Debug)]
#[command(name = "nebula-introspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter (e.g. "debug", "nebula_expression=trace")
    #[arg(long, global = true, env = "NEBULA_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print type definitions as JSON
    Types(TypesArgs),
    /// Print completion suggestions as JSON
    Suggest(SuggestArgs),
    /// Validate every reference in an expression
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct DefinitionsArgs {
    /// Type definitions file
    #[arg(long, short = 'f', value_name = "FILE")]
    file: PathBuf,
}

#[derive(Args, Debug)]
struct TypesArgs {
    #[command(flatten)]
    definitions: DefinitionsArgs,

    /// Include hidden members
    #[arg(long)]
    all: bool,
}

#[derive(Args, Debug)]
struct VariableArgs {
    /// Variable declaration `name=Type` (repeatable)
    #[arg(long = "var", value_name = "NAME=TYPE", value_parser = commands::parse_variable)]
    variables: Vec<(String, String)>,
}

#[derive(Args, Debug)]
struct SuggestArgs {
    #[command(flatten)]
    definitions: DefinitionsArgs,

    #[command(flatten)]
    variables: VariableArgs,

    /// Caret line (zero-based); defaults to the end of the input
    #[arg(long, requires = "column")]
    row: Option<usize>,

    /// Caret column in characters (zero-based)
    #[arg(long, requires = "row")]
    column: Option<usize>,

    /// Expression text
    expression: String,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    definitions: DefinitionsArgs,

    #[command(flatten)]
    variables: VariableArgs,

    /// Show each error with its source line
    #[arg(long)]
    explain: bool,

    /// Expression text
    expression: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log = match init_logging(&cli.log_level) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(level: &str) -> nebula_log::LogResult<nebula_log::LoggerGuard> {
    let mut config = nebula_log::Config::from_env();
    config.level = level.to_string();
    nebula_log::init_with(config)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Types(args) => commands::types(&args.definitions.file, args.all),
        Command::Suggest(args) => commands::suggest(
            &args.definitions.file,
            &args.variables.variables,
            &args.expression,
            args.row.zip(args.column),
            config.completion,
        ),
        Command::Validate(args) => commands::validate(
            &args.definitions.file,
            &args.variables.variables,
            &args.expression,
            args.explain,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
