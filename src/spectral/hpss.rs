//! Harmonic-percussive separation
//!
//! Median-filtering HPSS in the style of Fitzgerald (2010): energy that
//! persists across time at one frequency is harmonic (tonal), energy that is
//! broadband within one frame is percussive (transient). Each cell of the
//! input spectrogram is split between the two outputs in proportion to the
//! two median estimates (soft masking), so the outputs sum exactly back to
//! the input cell by cell.

use crate::error::FusionError;
use crate::spectral::validate_shape;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Split a spectrogram into harmonic and percussive components
///
/// # Arguments
///
/// * `spectrogram` - Log-mel spectrogram (frames × bins, non-negative)
/// * `harmonic_width` - Time-axis median window in frames
/// * `percussive_width` - Frequency-axis median window in bins
///
/// # Returns
///
/// `(harmonic, percussive)` with the exact shape of the input. For every
/// cell, `harmonic + percussive == spectrogram` within floating tolerance
/// and both outputs are non-negative. An empty input yields two empty
/// outputs; a shape mismatch inside the input is a programmer error.
pub fn hpss_decompose(
    spectrogram: &[Vec<f32>],
    harmonic_width: usize,
    percussive_width: usize,
) -> Result<(Vec<Vec<f32>>, Vec<Vec<f32>>), FusionError> {
    let n_bins = validate_shape(spectrogram)?;
    if spectrogram.is_empty() || n_bins == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    log::debug!(
        "HPSS: {} frames x {} bins, widths time={} freq={}",
        spectrogram.len(),
        n_bins,
        harmonic_width,
        percussive_width
    );

    let harmonic_est = median_filter_time(spectrogram, harmonic_width.max(1));
    let percussive_est = median_filter_frequency(spectrogram, percussive_width.max(1));

    let mut harmonic = vec![vec![0.0f32; n_bins]; spectrogram.len()];
    let mut percussive = vec![vec![0.0f32; n_bins]; spectrogram.len()];

    for (t, frame) in spectrogram.iter().enumerate() {
        for (b, &value) in frame.iter().enumerate() {
            let h = harmonic_est[t][b];
            let p = percussive_est[t][b];
            let total = h + p;

            if total <= EPSILON {
                // Both estimates zero: nothing to attribute
                continue;
            }

            harmonic[t][b] = value * h / total;
            percussive[t][b] = value * p / total;
        }
    }

    Ok((harmonic, percussive))
}

/// Median across neighboring time frames at each frequency bin
///
/// Enhances energy that persists over time — tonal content.
fn median_filter_time(frames: &[Vec<f32>], width: usize) -> Vec<Vec<f32>> {
    let num_frames = frames.len();
    let n_bins = frames[0].len();
    let half = width / 2;

    let mut result = Vec::with_capacity(num_frames);
    let mut scratch = Vec::with_capacity(width);

    for t in 0..num_frames {
        let start = t.saturating_sub(half);
        let end = (t + half + 1).min(num_frames);

        let mut row = Vec::with_capacity(n_bins);
        for b in 0..n_bins {
            scratch.clear();
            for frame in &frames[start..end] {
                scratch.push(frame[b]);
            }
            row.push(median(&mut scratch));
        }
        result.push(row);
    }

    result
}

/// Median across neighboring frequency bins at each time frame
///
/// Enhances energy that is broadband within one frame — transients.
fn median_filter_frequency(frames: &[Vec<f32>], width: usize) -> Vec<Vec<f32>> {
    let n_bins = frames[0].len();
    let half = width / 2;

    let mut result = Vec::with_capacity(frames.len());
    let mut scratch = Vec::with_capacity(width);

    for frame in frames {
        let mut row = Vec::with_capacity(n_bins);
        for b in 0..n_bins {
            let start = b.saturating_sub(half);
            let end = (b + half + 1).min(n_bins);

            scratch.clear();
            scratch.extend_from_slice(&frame[start..end]);
            row.push(median(&mut scratch));
        }
        result.push(row);
    }

    result
}

/// Median of a scratch buffer (sorts in place)
fn median(values: &mut [f32]) -> f32 {
    values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values[values.len() / 2]
}
