pub mod item;
pub mod job;
pub mod offer;
pub mod status;

pub use item::*;
pub use job::*;
pub use offer::*;
pub use status::*;
