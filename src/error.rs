//! Error types for the fusion engine
//!
//! Data-quality problems (corrupt media, empty spectrograms, missing audio)
//! never surface here — those resolve to conservative defaults inside each
//! stage. Errors are reserved for programmer mistakes: mismatched spectrogram
//! shapes, inconsistent scene/sync inputs, invalid parameters.

use std::fmt;

/// Errors that can occur during creative analysis
#[derive(Debug, Clone)]
pub enum FusionError {
    /// Invalid input parameters (shape mismatch, inconsistent lengths)
    InvalidInput(String),

    /// Processing error during analysis
    ProcessingError(String),

    /// Numerical error (overflow, underflow, etc.)
    NumericalError(String),
}

impl fmt::Display for FusionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FusionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            FusionError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            FusionError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for FusionError {}
