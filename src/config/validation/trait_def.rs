//! Validation trait definition

/// Validation trait for configuration sections
pub trait Validate {
    /// Returns a human-readable reason when the section is unusable
    fn validate(&self) -> Result<(), String>;
}
