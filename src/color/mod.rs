mod canonical;
mod hsl;
mod planar;

pub use canonical::{assign_color_indices, canonicalize_colors};
pub(crate) use hsl::golden_angle_color;
pub use planar::{ColoringService, PlanarColoring};
