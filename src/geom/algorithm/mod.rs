mod polylabel;

pub use polylabel::{pole_of_inaccessibility, Placement};
