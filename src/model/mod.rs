mod detection;
mod segment;
mod trigger;

pub use detection::*;
pub use segment::*;
pub use trigger::*;
