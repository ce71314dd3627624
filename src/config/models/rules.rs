//! Record validation settings

use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Largest accepted input, in data rows
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Reject rows repeating an earlier username or email
    #[serde(default = "default_true")]
    pub reject_duplicates: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
            reject_duplicates: true,
        }
    }
}
