use anyhow::Result;
use clap::Parser;

use congressmap::cli::{Cli, Commands};
use congressmap::commands::build;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match &cli.command {
        Some(Commands::Build(args)) => build(&cli, args),
        None => build(&cli, &Default::default()),
    }
}
