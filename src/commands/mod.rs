mod analyze;
mod count;
mod input;
mod limit;
mod models;

pub use analyze::*;
pub use count::*;
pub use limit::*;
pub use models::*;
