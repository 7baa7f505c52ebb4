//! Unified Error Model
//!
//! The calculator is total for well-typed input. The only failures are
//! contract violations caught at the boundary and malformed configuration.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarbonError {
    /// Input rejected before any computation (negative price, zero quantity...)
    #[error("VALIDATION/{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Factor table or template file could not be loaded or is inconsistent
    #[error("CONFIG/{0}")]
    Config(String),
}

impl CarbonError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// True for boundary rejections, false for configuration problems
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, CarbonError>;
