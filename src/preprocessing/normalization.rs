//! RMS gain normalization
//!
//! Creative audio arrives at wildly different loudness depending on the
//! export chain. Normalizing to a fixed RMS target keeps the detector's
//! energy thresholds meaningful across assets. Clipping is avoided by
//! limiting the applied gain to the available peak headroom.

/// Numerical stability epsilon for divisions
const EPSILON: f32 = 1e-10;

/// Normalize samples in-place to the target RMS level
///
/// Returns the linear gain that was applied. Silent or near-silent signals
/// are left untouched (gain 1.0) rather than amplified into garbage; a gain
/// that would push the peak past full scale is limited so no sample clips.
pub fn normalize_rms(samples: &mut [f32], target_rms: f32) -> f32 {
    if samples.is_empty() {
        return 1.0;
    }

    let rms = (samples.iter().map(|&x| x * x).sum::<f32>() / samples.len() as f32).sqrt();

    if rms <= EPSILON {
        log::warn!("Signal is silent or near-silent, skipping gain normalization");
        return 1.0;
    }

    let mut gain = target_rms / rms;

    let peak = samples.iter().map(|&x| x.abs()).fold(0.0f32, f32::max);
    if peak * gain > 1.0 {
        log::debug!(
            "RMS gain {:.3} would clip (peak {:.3}), limiting to headroom",
            gain,
            peak
        );
        gain = 1.0 / peak;
    }

    for sample in samples.iter_mut() {
        *sample *= gain;
    }

    log::debug!(
        "RMS normalization: measured {:.4}, target {:.4}, gain {:.2} dB",
        rms,
        target_rms,
        20.0 * gain.log10()
    );

    gain
}
