//! Linear-interpolation resampling
//!
//! Downmixes arbitrary source rates to the fixed analysis rate. Linear
//! interpolation is sufficient here: the spectral stages only look below
//! 8 kHz and the detector works on band energies, not waveform fidelity.

/// Resample a mono signal to the target rate by linear interpolation
///
/// Returns the input unchanged when the rates already match. An empty input
/// yields an empty output.
pub fn resample_linear(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if samples.is_empty() || source_rate == 0 || target_rate == 0 {
        return samples.to_vec();
    }
    if source_rate == target_rate {
        return samples.to_vec();
    }

    let ratio = source_rate as f32 / target_rate as f32;
    let output_len = (samples.len() as f32 / ratio) as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f32 * ratio;
        let idx = src_pos as usize;
        let frac = src_pos - idx as f32;

        let sample = if idx + 1 < samples.len() {
            samples[idx] * (1.0 - frac) + samples[idx + 1] * frac
        } else if idx < samples.len() {
            samples[idx]
        } else {
            0.0
        };
        output.push(sample);
    }

    log::debug!(
        "Resampled {} samples at {} Hz to {} samples at {} Hz",
        samples.len(),
        source_rate,
        output.len(),
        target_rate
    );

    output
}
