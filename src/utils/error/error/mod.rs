//! Error handling for bulk imports
//!
//! This module defines all error types used throughout the crate.

mod conversions;
mod helpers;
mod types;

pub use types::{ImportError, Result};
