pub mod error;
pub mod initiator;
pub mod registry;

pub use error::*;
pub use initiator::*;
pub use registry::*;
