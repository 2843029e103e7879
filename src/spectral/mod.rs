//! Spectral decomposition
//!
//! Windowed Fourier analysis, mel-band projection and harmonic-percussive
//! separation. A spectrogram throughout this crate is `Vec<Vec<f32>>`
//! (frames × bins) with a constant bin count and non-negative values; an
//! empty spectrogram is a valid, detectable state that downstream stages
//! resolve to conservative defaults.

pub mod hpss;
pub mod mel;
pub mod stft;

use crate::error::FusionError;

/// Validate that all frames share one bin count; returns that count
///
/// A shape mismatch is a programmer error, not a data-quality problem, so it
/// fails loudly instead of degrading.
pub fn validate_shape(frames: &[Vec<f32>]) -> Result<usize, FusionError> {
    let n_bins = match frames.first() {
        Some(frame) => frame.len(),
        None => return Ok(0),
    };

    for (i, frame) in frames.iter().enumerate() {
        if frame.len() != n_bins {
            return Err(FusionError::InvalidInput(format!(
                "Inconsistent frame lengths: frame 0 has {} bins, frame {} has {}",
                n_bins,
                i,
                frame.len()
            )));
        }
    }

    Ok(n_bins)
}
