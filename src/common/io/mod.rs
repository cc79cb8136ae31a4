mod geojson;
mod script;
mod stream;

pub(crate) use geojson::*;
pub(crate) use script::*;
pub(crate) use stream::*;
