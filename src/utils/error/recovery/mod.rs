//! Error recovery utilities
//!
//! This module provides retry with exponential backoff, driven by an explicit
//! per-attempt outcome rather than by inspecting caught errors.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::{AttemptOutcome, RetryConfig};
