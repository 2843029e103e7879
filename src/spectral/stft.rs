//! Short-time Fourier transform
//!
//! Sliding-window magnitude spectra with a Hamming taper to reduce spectral
//! leakage. Frames are zero-padded to the next power of two for the FFT.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Compute magnitude spectra over sliding windows
///
/// # Arguments
///
/// * `samples` - Mono samples, normalized to [-1.0, 1.0]
/// * `frame_size` - Window length in samples
/// * `hop_size` - Step between consecutive windows (50% overlap at
///   `frame_size / 2`)
///
/// # Returns
///
/// One magnitude frame per window position, each holding `fft_size / 2 + 1`
/// non-negative bins. A signal too short for even one window yields an empty
/// result — callers treat that as a degenerate-but-valid state.
pub fn magnitude_frames(samples: &[f32], frame_size: usize, hop_size: usize) -> Vec<Vec<f32>> {
    if frame_size == 0 || hop_size == 0 || samples.len() < frame_size {
        return Vec::new();
    }

    let fft_size = frame_size.next_power_of_two();
    let n_bins = fft_size / 2 + 1;
    let num_frames = (samples.len() - frame_size) / hop_size + 1;

    let window = hamming_window(frame_size);
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);

    let mut frames = Vec::with_capacity(num_frames);
    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); fft_size];

    for frame_idx in 0..num_frames {
        let start = frame_idx * hop_size;

        for i in 0..fft_size {
            buffer[i] = if i < frame_size {
                Complex::new(samples[start + i] * window[i], 0.0)
            } else {
                Complex::new(0.0, 0.0)
            };
        }

        fft.process(&mut buffer);

        let magnitudes: Vec<f32> = buffer[..n_bins].iter().map(|c| c.norm()).collect();
        frames.push(magnitudes);
    }

    log::debug!(
        "STFT: {} samples -> {} frames x {} bins (window {}, hop {})",
        samples.len(),
        frames.len(),
        n_bins,
        frame_size,
        hop_size
    );

    frames
}

/// Hamming window of the given length
fn hamming_window(size: usize) -> Vec<f32> {
    if size <= 1 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32;
            0.54 - 0.46 * phase.cos()
        })
        .collect()
}
