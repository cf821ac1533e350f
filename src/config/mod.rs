mod model;
mod pipeline;

pub use model::*;
pub use pipeline::*;
