mod column;
mod decode;
mod model;

pub use column::*;
pub use decode::*;
pub use model::*;
