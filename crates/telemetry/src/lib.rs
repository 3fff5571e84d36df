//! Structured logging setup for the offerbot trade engine
//!
//! # Example
//!
//! ```no_run
//! use offerbot_telemetry::init_tracing;
//!
//! fn main() {
//!     init_tracing("info").expect("tracing init failed");
//! }
//! ```

pub mod tracing;

pub use tracing::{init_tracing, TracingError};
