//! Error handling utilities
//!
//! This module provides the import error type and the retry machinery that
//! classifies failures as retryable or fatal.

pub mod error;
pub mod recovery;

// Re-export commonly used types and functions
pub use error::*;
pub use recovery::*;
