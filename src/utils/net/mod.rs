//! Network utilities

pub mod http;

pub use http::{HttpClientPoolConfig, build_client};
