//! Log-mel spectrogram
//!
//! Projects linear-frequency magnitude bins onto a small number of mel-scale
//! bands by energy summation, then log-compresses each band. The mel scale
//! approximates human pitch perception, which keeps the harmonic/percussive
//! split and the detector's energy ratios perceptually meaningful.
//!
//! Log compression is `ln(1 + e)` so every cell stays non-negative — a
//! requirement for the proportional soft masking in HPSS — while preserving
//! the dynamic-range flattening a plain log would give. Band energies are
//! floored at a small epsilon first.

use crate::config::FusionConfig;
use crate::spectral::stft;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Compute the log-mel spectrogram of a prepared signal
///
/// Returns frames × `config.mel_bins` of non-negative values. A signal too
/// short for one STFT window yields an empty spectrogram, which downstream
/// stages resolve to conservative defaults rather than errors.
pub fn log_mel_spectrogram(samples: &[f32], config: &FusionConfig) -> Vec<Vec<f32>> {
    let magnitude = stft::magnitude_frames(samples, config.frame_size, config.hop_size);
    if magnitude.is_empty() {
        log::debug!("Signal too short for one window, returning empty spectrogram");
        return Vec::new();
    }

    let n_linear_bins = magnitude[0].len();
    let bands = mel_band_ranges(
        config.mel_bins,
        n_linear_bins,
        config.frame_size.next_power_of_two(),
        config.target_sample_rate,
    );

    let mut frames = Vec::with_capacity(magnitude.len());
    for mags in &magnitude {
        let mut frame = Vec::with_capacity(config.mel_bins);
        for band in &bands {
            let energy: f32 = mags[band.clone()].iter().map(|&m| m * m).sum();
            frame.push(energy.max(EPSILON).ln_1p());
        }
        frames.push(frame);
    }

    log::debug!(
        "Log-mel spectrogram: {} frames x {} bands",
        frames.len(),
        config.mel_bins
    );

    frames
}

/// Convert frequency in Hz to mel
fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Convert mel to frequency in Hz
fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Linear-bin ranges for each mel band
///
/// Band edges are evenly spaced on the mel scale between 0 Hz and Nyquist,
/// then mapped back to FFT bin indices. Each band is guaranteed at least one
/// bin so narrow low-frequency bands never collapse to empty ranges.
fn mel_band_ranges(
    n_bands: usize,
    n_linear_bins: usize,
    fft_size: usize,
    sample_rate: u32,
) -> Vec<std::ops::Range<usize>> {
    let nyquist = sample_rate as f32 / 2.0;
    let mel_max = hz_to_mel(nyquist);

    let mut edges = Vec::with_capacity(n_bands + 1);
    for i in 0..=n_bands {
        let mel = mel_max * i as f32 / n_bands as f32;
        let hz = mel_to_hz(mel);
        let bin = (hz * fft_size as f32 / sample_rate as f32).round() as usize;
        edges.push(bin.min(n_linear_bins));
    }
    // The top band always reaches the end of the linear spectrum
    edges[n_bands] = n_linear_bins;

    let mut bands = Vec::with_capacity(n_bands);
    for i in 0..n_bands {
        let start = edges[i];
        let end = edges[i + 1].max(start + 1).min(n_linear_bins);
        let start = start.min(end.saturating_sub(1));
        bands.push(start..end);
    }

    bands
}
