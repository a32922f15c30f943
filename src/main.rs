use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::debug;

use lastfive::LastFiveError;
use lastfive::cli_args::{Cli, Commands};
use lastfive::commands::{run_browse, run_issues};
use lastfive::config::load_subcommand;

async fn run(cli: Cli) -> Result<(), LastFiveError> {
    match cli.command {
        Commands::Issues(args) => {
            let args = load_subcommand(&args)?;
            debug!("issues args: {args:?}");
            run_issues(args, &cli.global).await
        }
        Commands::Browse(args) => {
            let args = load_subcommand(&args)?;
            debug!("browse args: {args:?}");
            run_browse(args, &cli.global).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
