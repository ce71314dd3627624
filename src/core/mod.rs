//! Core functionality for the importer
//!
//! This module contains the import pipeline and its data structures.

pub mod import;
