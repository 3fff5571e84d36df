pub mod gate;
pub mod policy;

pub use gate::*;
pub use policy::*;
