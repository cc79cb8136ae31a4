use anyhow::Result;
use log::info;

use crate::cli::{BuildArgs, Cli};
use crate::color::PlanarColoring;
use crate::pipeline;

pub fn build(cli: &Cli, args: &BuildArgs) -> Result<()> {
    let config = args.to_config();

    info!(
        "[build] primary={} replacement={} states={} (verbosity {})",
        config.primary.display(),
        config.replacement.display(),
        config.states.display(),
        cli.verbose
    );

    let summary = pipeline::run(&config, &PlanarColoring)?;

    info!(
        "[build] {} districts, {} colors, {} features -> {}, {} boxes -> {}",
        summary.districts,
        summary.colors,
        summary.features,
        config.map_out.display(),
        summary.bboxes,
        config.bboxes_out.display()
    );

    Ok(())
}
