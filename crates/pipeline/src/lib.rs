pub mod claims;
pub mod error;
pub mod intake;
pub mod pipeline;

pub use claims::*;
pub use error::*;
pub use intake::*;
pub use pipeline::*;
