pub mod client;
pub mod draft;
pub mod event;
pub mod mock;
pub mod session;

pub use client::*;
pub use draft::*;
pub use event::*;
pub use mock::*;
pub use session::*;
