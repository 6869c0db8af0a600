//! Error types for the impulse detection engine

use std::fmt;

/// Errors that can occur during impulse detection
#[derive(Debug, Clone)]
pub enum DetectionError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Processing error during detection
    ProcessingError(String),

    /// Numerical error (overflow, underflow, etc.)
    NumericalError(String),
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DetectionError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            DetectionError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for DetectionError {}
