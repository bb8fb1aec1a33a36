//! Core application primitives (batch runtime, HTTP server)

pub mod http;
pub mod runtime;

pub use http::*;
pub use runtime::*;
