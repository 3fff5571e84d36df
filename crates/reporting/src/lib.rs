pub mod api;
pub mod http;
pub mod mock;
pub mod wire;

pub use api::*;
pub use http::*;
pub use mock::*;
pub use wire::*;
