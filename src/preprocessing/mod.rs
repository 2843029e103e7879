//! Signal preprocessing
//!
//! Turns an extracted PCM sequence into the clean mono signal the spectral
//! stages consume: resample to the fixed target rate, RMS gain
//! normalization, first-order high-pass for DC/rumble removal, and
//! max-duration truncation.

pub mod filters;
pub mod normalization;
pub mod resample;

use crate::config::FusionConfig;
use crate::io::extraction::{self, ExtractedAudio};

/// A fully prepared analysis signal at the target sample rate
#[derive(Debug, Clone)]
pub struct PreparedSignal {
    /// Mono samples in [-1.0, 1.0] at `FusionConfig::target_sample_rate`
    pub samples: Vec<f32>,

    /// True if the underlying extraction degraded to the deterministic
    /// low-energy fallback; spectral stages treat such signals as "no music"
    pub is_fallback: bool,
}

impl PreparedSignal {
    /// Signal duration in seconds at the given target rate
    pub fn duration_sec(&self, config: &FusionConfig) -> f32 {
        self.samples.len() as f32 / config.target_sample_rate as f32
    }
}

/// Run the full preprocessing chain over a raw audio byte buffer
///
/// Composes extraction, resampling, RMS normalization, high-pass filtering
/// and truncation. Never fails: corrupt media degrades to the fallback
/// sequence, which is passed through unamplified so downstream energy
/// measurements stay near the noise floor.
pub fn prepare_signal(bytes: &[u8], config: &FusionConfig) -> PreparedSignal {
    let ExtractedAudio {
        samples,
        sample_rate,
        is_fallback,
    } = extraction::extract_samples(bytes, config);

    let mut samples = resample::resample_linear(&samples, sample_rate, config.target_sample_rate);

    if !is_fallback {
        normalization::normalize_rms(&mut samples, config.target_rms);
    }

    filters::highpass_in_place(
        &mut samples,
        config.highpass_cutoff_hz,
        config.target_sample_rate,
    );

    let max_samples = (config.max_duration_sec * config.target_sample_rate as f32) as usize;
    if samples.len() > max_samples {
        log::debug!(
            "Truncating signal from {} to {} samples for cost bounding",
            samples.len(),
            max_samples
        );
        samples.truncate(max_samples);
    }

    PreparedSignal {
        samples,
        is_fallback,
    }
}
