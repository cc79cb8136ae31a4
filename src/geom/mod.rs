mod algorithm;
mod bbox;
mod partition;

pub use algorithm::{pole_of_inaccessibility, Placement};
pub use bbox::rect_to_array;
pub(crate) use bbox::merge_rects;
pub(crate) use partition::PlanarPartition;
