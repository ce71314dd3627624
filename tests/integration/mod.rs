//! Integration tests for bulk-import
//!
//! These tests drive the public API against a mock console server and real
//! files on disk.

pub mod config_tests;
pub mod pipeline_tests;
pub mod validation_tests;
