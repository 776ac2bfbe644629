mod commands;
mod error;
mod logging;
mod output;
mod session;
mod upload;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clipstack_config::ClipstackConfig;

use crate::commands::Commands;
use crate::error::CliError;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "clipstack")]
#[command(about = "Manage clipstack users, profiles, preferences and posts", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (default: clipstack.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Act as this user
    #[arg(long = "as-user", env = "CLIPSTACK_USER", global = true)]
    as_user: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.logging());

    let result = Session::open(&config, cli.as_user.as_deref(), cli.json)
        .and_then(|session| cli.command.execute(&session));

    if let Err(e) = result {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn load_config(path: Option<&std::path::Path>) -> Result<ClipstackConfig, CliError> {
    match path {
        Some(path) => Ok(ClipstackConfig::load(path)?),
        None => {
            let cwd = std::env::current_dir().map_err(CliError::CurrentDir)?;
            Ok(ClipstackConfig::discover(&cwd)?)
        }
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
