//! Utility modules for the bulk importer
//!
//! - **error**: Error types and retry recovery
//! - **logging**: Subscriber setup and secret masking
//! - **net**: HTTP client construction

pub mod error;
pub mod logging;
pub mod net;

pub use error::{ImportError, Result};
