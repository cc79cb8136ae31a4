use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::BuildConfig;

/// Congressional district map builder (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "congressmap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `build` with the standard file layout
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build map.geojson, bboxes.js and states.js from census sources
    Build(BuildArgs),
}

/// Path overrides; anything left unset uses the standard layout.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Nationwide district boundaries (GeoJSON)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub primary: Option<PathBuf>,

    /// Replacement boundaries for the revised state (GeoJSON)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub replacement: Option<PathBuf>,

    /// State reference table (JSON)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub states: Option<PathBuf>,

    /// Output script with the state table
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub states_out: Option<PathBuf>,

    /// Output map features (GeoJSON)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub map_out: Option<PathBuf>,

    /// Output script with the bounding box lookup
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub bboxes_out: Option<PathBuf>,
}

impl BuildArgs {
    /// Apply the overrides on top of the default configuration.
    pub fn to_config(&self) -> BuildConfig {
        let mut config = BuildConfig::default();
        let overrides = [
            (&self.primary, &mut config.primary),
            (&self.replacement, &mut config.replacement),
            (&self.states, &mut config.states),
            (&self.states_out, &mut config.states_out),
            (&self.map_out, &mut config.map_out),
            (&self.bboxes_out, &mut config.bboxes_out),
        ];
        for (value, slot) in overrides {
            if let Some(path) = value {
                *slot = path.clone();
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_builds_with_defaults() {
        let cli = Cli::try_parse_from(["congressmap"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
        let config = BuildArgs::default().to_config();
        assert_eq!(config.map_out, PathBuf::from("data/map.geojson"));
    }

    #[test]
    fn overrides_replace_only_given_paths() {
        let cli = Cli::try_parse_from(["congressmap", "-vv", "build", "--map-out", "out/map.geojson"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Some(Commands::Build(args)) = cli.command else { panic!("expected build") };
        let config = args.to_config();
        assert_eq!(config.map_out, PathBuf::from("out/map.geojson"));
        assert_eq!(config.bboxes_out, PathBuf::from("data/bboxes.js"));
    }

    #[test]
    fn schema_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
