mod analysis;
mod model;

pub use analysis::*;
pub use model::*;
