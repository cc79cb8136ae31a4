#![doc = "Congressional district map builder public API"]
mod bounds;
mod color;
mod common;
mod config;
mod district;
mod error;
mod geom;
mod pipeline;
mod states;

pub mod cli;
pub mod commands;

#[doc(inline)]
pub use bounds::{aggregate_bounds, BoundsLookup};

#[doc(inline)]
pub use color::{assign_color_indices, canonicalize_colors, ColoringService, PlanarColoring};

#[doc(inline)]
pub use config::{BuildConfig, PrimaryFields};

#[doc(inline)]
pub use district::{ordinal, place_label, title_long, title_short, District, DistrictProps, Group, Label, LabelProps, AT_LARGE};

#[doc(inline)]
pub use error::{BuildError, BuildResult};

#[doc(inline)]
pub use geom::{pole_of_inaccessibility, Placement};

#[doc(inline)]
pub use pipeline::{load_districts, place_labels, run, write_map, BuildSummary};

#[doc(inline)]
pub use states::{StateInfo, StateTable};
