pub mod error;
pub mod loader;
pub mod matcher;

pub use error::*;
pub use loader::*;
pub use matcher::*;
