//! Speech-gated music detection
//!
//! Decides whether background music plays under narration using spectral
//! evidence rather than guesswork. Two evidence branches feed one verdict:
//!
//! 1. **Speech-gated**: harmonic share of the energy measured only during
//!    speech frames, plus rhythmic periodicity. Requires enough speech
//!    coverage to be statistically reliable.
//! 2. **Whole-signal**: the same ratio over all frames, with a lower
//!    periodicity bar. This is the fallback evidence source for short or
//!    speech-sparse windows.
//!
//! The verdict is final. Downstream stages (including any natural-language
//! explanation layer) receive it read-only and may quote but never override
//! it. False positives cause worse recommendations than false negatives, so
//! every degenerate path resolves to "no music".

use serde::{Deserialize, Serialize};

use crate::config::{DetectorThresholds, FusionConfig};
use crate::error::FusionError;
use crate::preprocessing::PreparedSignal;
use crate::spectral::{hpss, mel, validate_shape};

use super::speech_mask::build_speech_mask;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Coarse character of detected background music
///
/// Derived from the verdict's own evidence (never re-measured downstream):
/// strong rhythmic periodicity reads as a beat-driven bed, weak periodicity
/// with a harmonic floor reads as ambient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicType {
    /// No music detected
    None,
    /// Sustained tonal bed with little rhythmic drive
    Ambient,
    /// Beat-driven bed with clear rhythmic periodicity
    Rhythmic,
}

/// Periodicity at or above this reads as a beat-driven bed
const RHYTHMIC_PERIODICITY: f32 = 0.3;

/// Immutable music-detection verdict
///
/// Created once by the detector; later stages carry it by value and never
/// mutate it. When a scene reports "no music" downstream, callers substitute
/// [`MusicVerdict::none`] so the confidence reads exactly zero instead of an
/// ambiguous low number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MusicVerdict {
    /// True if background music was detected
    pub detected: bool,

    /// Verdict confidence on a 0-10 scale
    pub confidence: f32,

    /// Harmonic energy ratio used as evidence (during-speech ratio for the
    /// speech-gated branch, whole-signal ratio otherwise)
    pub harmonic_ratio: f32,

    /// Rhythmic periodicity score in [0, 1]
    pub beat_periodicity: f32,

    /// Fraction of analyzed frames marked as speech, in [0, 1]
    pub speech_coverage: f32,
}

impl MusicVerdict {
    /// Conservative verdict for degenerate input (invalid container, empty
    /// spectrogram). Never "true".
    pub fn fallback(thresholds: &DetectorThresholds) -> Self {
        Self {
            detected: false,
            confidence: thresholds.fallback_confidence,
            harmonic_ratio: 0.0,
            beat_periodicity: 0.0,
            speech_coverage: 0.0,
        }
    }

    /// "No music" verdict with zero confidence, used when a scene has no
    /// audio to assess or when a negative verdict enters fused output
    pub fn none() -> Self {
        Self {
            detected: false,
            confidence: 0.0,
            harmonic_ratio: 0.0,
            beat_periodicity: 0.0,
            speech_coverage: 0.0,
        }
    }

    /// Coarse music character implied by this verdict's evidence
    pub fn music_type(&self) -> MusicType {
        if !self.detected {
            MusicType::None
        } else if self.beat_periodicity >= RHYTHMIC_PERIODICITY {
            MusicType::Rhythmic
        } else {
            MusicType::Ambient
        }
    }

    /// The verdict as it must appear in fused scene output: negative
    /// verdicts carry exactly zero confidence
    pub fn for_output(self) -> Self {
        if self.detected {
            self
        } else {
            Self {
                confidence: 0.0,
                ..self
            }
        }
    }
}

/// Analyze a prepared signal for background music
///
/// This is the public entry point: it runs the spectral chain (log-mel, HPSS)
/// over the requested window, builds the speech mask from the supplied
/// intervals, and renders the verdict. It never fails — fallback signals and
/// windows too short for analysis yield the conservative verdict.
///
/// # Arguments
///
/// * `signal` - Prepared mono signal at the configured target rate
/// * `speech_intervals` - Spoken `[start, end)` ranges in absolute seconds
/// * `window` - Optional `[start, end)` restriction in absolute seconds
///   (e.g. one scene); `None` analyzes the whole track
pub fn analyze_music(
    signal: &PreparedSignal,
    speech_intervals: &[(f32, f32)],
    window: Option<(f32, f32)>,
    config: &FusionConfig,
) -> MusicVerdict {
    if signal.is_fallback {
        log::debug!("Signal is extraction fallback, returning conservative verdict");
        return MusicVerdict::fallback(&config.detector);
    }

    let sample_rate = config.target_sample_rate as f32;
    let (window_start, samples) = match window {
        Some((start, end)) => {
            let lo = ((start.max(0.0) * sample_rate) as usize).min(signal.samples.len());
            let hi = ((end.max(0.0) * sample_rate) as usize).min(signal.samples.len());
            (start.max(0.0), &signal.samples[lo..hi.max(lo)])
        }
        None => (0.0, &signal.samples[..]),
    };

    let spectrogram = mel::log_mel_spectrogram(samples, config);
    if spectrogram.is_empty() {
        log::debug!("Analysis window too short for spectral evidence, returning conservative verdict");
        return MusicVerdict::fallback(&config.detector);
    }

    let (harmonic, percussive) = match hpss::hpss_decompose(
        &spectrogram,
        config.hpss_harmonic_width,
        config.hpss_percussive_width,
    ) {
        Ok(pair) => pair,
        Err(err) => {
            // Internally constructed spectrograms are always well-shaped;
            // reaching this arm is a bug, but the analysis contract is to
            // finish conservatively rather than abort the creative.
            log::error!("HPSS failed on internally built spectrogram: {}", err);
            return MusicVerdict::fallback(&config.detector);
        }
    };

    let mask = build_speech_mask(
        speech_intervals,
        spectrogram.len(),
        config.frame_duration_sec(),
        window_start,
    );

    match detect_music(&harmonic, &percussive, &mask, &config.detector) {
        Ok(verdict) => verdict,
        Err(err) => {
            log::error!("Detector rejected internally built inputs: {}", err);
            MusicVerdict::fallback(&config.detector)
        }
    }
}

/// Render a music verdict from harmonic/percussive evidence and a speech mask
///
/// # Errors
///
/// Shape mismatches between the two spectrograms, or between spectrogram and
/// mask, are programmer errors and fail loudly. Empty spectrograms are a
/// valid degenerate state and yield the conservative fallback verdict.
pub fn detect_music(
    harmonic: &[Vec<f32>],
    percussive: &[Vec<f32>],
    speech_mask: &[bool],
    thresholds: &DetectorThresholds,
) -> Result<MusicVerdict, FusionError> {
    let h_bins = validate_shape(harmonic)?;
    let p_bins = validate_shape(percussive)?;

    if harmonic.len() != percussive.len() || h_bins != p_bins {
        return Err(FusionError::InvalidInput(format!(
            "Harmonic/percussive shape mismatch: {}x{} vs {}x{}",
            harmonic.len(),
            h_bins,
            percussive.len(),
            p_bins
        )));
    }

    if harmonic.is_empty() {
        return Ok(MusicVerdict::fallback(thresholds));
    }

    if speech_mask.len() != harmonic.len() {
        return Err(FusionError::InvalidInput(format!(
            "Speech mask has {} frames, spectrogram has {}",
            speech_mask.len(),
            harmonic.len()
        )));
    }

    let h_energy: Vec<f32> = harmonic.iter().map(|f| f.iter().sum()).collect();
    let p_energy: Vec<f32> = percussive.iter().map(|f| f.iter().sum()).collect();

    let during_speech = harmonic_ratio_over(&h_energy, &p_energy, Some(speech_mask));
    let whole_signal = harmonic_ratio_over(&h_energy, &p_energy, None);
    let beat = beat_periodicity(&p_energy, thresholds.onset_jump_threshold);

    let speech_frames = speech_mask.iter().filter(|&&m| m).count();
    let coverage = speech_frames as f32 / speech_mask.len() as f32;

    let speech_branch = during_speech > thresholds.speech_harmonic_ratio
        && beat > thresholds.speech_beat_periodicity
        && coverage >= thresholds.min_speech_coverage;
    let whole_branch =
        whole_signal > thresholds.whole_harmonic_ratio && beat > thresholds.whole_beat_periodicity;

    let detected = speech_branch || whole_branch;

    let ratio_evidence = if speech_branch { during_speech } else { whole_signal };
    let confidence = if detected {
        ((ratio_evidence * 0.6 + beat * 0.4) * 12.0).min(10.0)
    } else {
        ((1.0 - whole_signal) * 3.0).clamp(0.0, 3.0)
    };

    log::debug!(
        "Music detection: during-speech ratio {:.3}, whole {:.3}, beat {:.3}, coverage {:.2} -> {} ({:.1})",
        during_speech,
        whole_signal,
        beat,
        coverage,
        detected,
        confidence
    );

    Ok(MusicVerdict {
        detected,
        confidence,
        harmonic_ratio: ratio_evidence,
        beat_periodicity: beat,
        speech_coverage: coverage,
    })
}

/// Harmonic share of total energy over the selected frames
///
/// `mask = None` selects all frames. Returns 0.0 when no frames are selected
/// or the selected energy is zero — conservative by construction.
fn harmonic_ratio_over(h_energy: &[f32], p_energy: &[f32], mask: Option<&[bool]>) -> f32 {
    let mut h_sum = 0.0f32;
    let mut p_sum = 0.0f32;

    for i in 0..h_energy.len() {
        if let Some(mask) = mask {
            if !mask[i] {
                continue;
            }
        }
        h_sum += h_energy[i];
        p_sum += p_energy[i];
    }

    let total = h_sum + p_sum;
    if total <= EPSILON {
        return 0.0;
    }
    h_sum / total
}

/// Rhythmic periodicity from the percussive onset-strength curve
///
/// Per-frame percussive energy is max-normalized, then frame-to-frame rises
/// above the jump threshold are counted and divided by the number of
/// transitions. A flat or empty curve scores 0.0.
fn beat_periodicity(p_energy: &[f32], jump_threshold: f32) -> f32 {
    if p_energy.len() < 2 {
        return 0.0;
    }

    let max = p_energy.iter().copied().fold(0.0f32, f32::max);
    if max <= EPSILON {
        return 0.0;
    }

    let mut jumps = 0usize;
    for i in 1..p_energy.len() {
        let rise = (p_energy[i] - p_energy[i - 1]) / max;
        if rise > jump_threshold {
            jumps += 1;
        }
    }

    (jumps as f32 / (p_energy.len() - 1) as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> DetectorThresholds {
        DetectorThresholds::default()
    }

    /// Harmonic-dominant spectrogram pair with a pulsing percussive channel
    fn musical_evidence(frames: usize, bins: usize) -> (Vec<Vec<f32>>, Vec<Vec<f32>>) {
        let harmonic = vec![vec![1.0f32; bins]; frames];
        let mut percussive = vec![vec![0.05f32; bins]; frames];
        // Percussive pulse every 3rd frame (a dense rhythmic bed)
        for (t, frame) in percussive.iter_mut().enumerate() {
            if t % 3 == 0 {
                for v in frame.iter_mut() {
                    *v = 1.5;
                }
            }
        }
        (harmonic, percussive)
    }

    /// Percussive-dominant pair resembling plain narration
    fn speech_evidence(frames: usize, bins: usize) -> (Vec<Vec<f32>>, Vec<Vec<f32>>) {
        let harmonic = vec![vec![0.05f32; bins]; frames];
        let mut percussive = vec![vec![0.2f32; bins]; frames];
        // Syllabic bursts roughly every 8th frame (~5 Hz at 25 ms frames)
        for (t, frame) in percussive.iter_mut().enumerate() {
            if t % 8 == 0 {
                for v in frame.iter_mut() {
                    *v = 1.0;
                }
            }
        }
        (harmonic, percussive)
    }

    #[test]
    fn test_empty_spectrogram_is_conservative() {
        let verdict = detect_music(&[], &[], &[], &thresholds()).unwrap();
        assert!(!verdict.detected);
        assert!(verdict.confidence <= thresholds().fallback_confidence);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        let h = vec![vec![0.0f32; 8]; 4];
        let p = vec![vec![0.0f32; 8]; 5];
        let mask = vec![false; 4];
        assert!(detect_music(&h, &p, &mask, &thresholds()).is_err());
    }

    #[test]
    fn test_mask_length_mismatch_is_error() {
        let h = vec![vec![0.0f32; 8]; 4];
        let p = vec![vec![0.0f32; 8]; 4];
        let mask = vec![false; 3];
        assert!(detect_music(&h, &p, &mask, &thresholds()).is_err());
    }

    #[test]
    fn test_speech_gated_branch_detects() {
        let (h, p) = musical_evidence(100, 16);
        // Speech over 60% of the window
        let mask: Vec<bool> = (0..100).map(|i| i < 60).collect();

        let verdict = detect_music(&h, &p, &mask, &thresholds()).unwrap();
        assert!(verdict.detected);
        assert!(verdict.speech_coverage >= 0.4);
        assert!(verdict.confidence > 0.0 && verdict.confidence <= 10.0);
    }

    #[test]
    fn test_whole_signal_branch_detects_without_speech() {
        let (h, p) = musical_evidence(100, 16);
        let mask = vec![false; 100];

        let verdict = detect_music(&h, &p, &mask, &thresholds()).unwrap();
        assert!(verdict.detected, "whole-signal branch should fire");
        assert_eq!(verdict.speech_coverage, 0.0);
    }

    #[test]
    fn test_plain_narration_not_detected() {
        let (h, p) = speech_evidence(100, 16);
        let mask = vec![true; 100];

        let verdict = detect_music(&h, &p, &mask, &thresholds()).unwrap();
        assert!(!verdict.detected);
        assert!(verdict.confidence <= 3.0, "negative confidence biased low");
    }

    #[test]
    fn test_silent_input_not_detected() {
        let h = vec![vec![0.0f32; 16]; 50];
        let p = vec![vec![0.0f32; 16]; 50];
        let mask = vec![true; 50];

        let verdict = detect_music(&h, &p, &mask, &thresholds()).unwrap();
        assert!(!verdict.detected);
        assert_eq!(verdict.harmonic_ratio, 0.0);
        assert_eq!(verdict.beat_periodicity, 0.0);
    }

    #[test]
    fn test_for_output_zeroes_negative_confidence() {
        let verdict = MusicVerdict::fallback(&thresholds());
        assert!(verdict.confidence > 0.0);

        let output = verdict.for_output();
        assert!(!output.detected);
        assert_eq!(output.confidence, 0.0);

        let positive = MusicVerdict {
            detected: true,
            confidence: 7.5,
            harmonic_ratio: 0.5,
            beat_periodicity: 0.3,
            speech_coverage: 0.6,
        };
        assert_eq!(positive.for_output().confidence, 7.5);
    }

    #[test]
    fn test_music_type_follows_evidence() {
        assert_eq!(MusicVerdict::none().music_type(), MusicType::None);

        let rhythmic = MusicVerdict {
            detected: true,
            confidence: 7.0,
            harmonic_ratio: 0.5,
            beat_periodicity: 0.4,
            speech_coverage: 0.5,
        };
        assert_eq!(rhythmic.music_type(), MusicType::Rhythmic);

        let ambient = MusicVerdict {
            beat_periodicity: 0.18,
            ..rhythmic
        };
        assert_eq!(ambient.music_type(), MusicType::Ambient);
    }

    #[test]
    fn test_beat_periodicity_flat_curve_is_zero() {
        assert_eq!(beat_periodicity(&[1.0; 50], 0.1), 0.0);
        assert_eq!(beat_periodicity(&[], 0.1), 0.0);
        assert_eq!(beat_periodicity(&[0.0; 50], 0.1), 0.0);
    }

    #[test]
    fn test_beat_periodicity_counts_rises() {
        // Rise every other transition: 0, 1, 0, 1, ...
        let curve: Vec<f32> = (0..20).map(|i| (i % 2) as f32).collect();
        let score = beat_periodicity(&curve, 0.1);
        assert!((score - 10.0 / 19.0).abs() < 1e-6);
    }

    #[test]
    fn test_analyze_music_on_fallback_signal() {
        let config = FusionConfig::default();
        let signal = PreparedSignal {
            samples: vec![1e-5; 16_000],
            is_fallback: true,
        };

        let verdict = analyze_music(&signal, &[], None, &config);
        assert!(!verdict.detected);
        assert!(verdict.confidence <= config.detector.fallback_confidence);
    }

    #[test]
    fn test_analyze_music_window_too_short() {
        let config = FusionConfig::default();
        let signal = PreparedSignal {
            samples: vec![0.1; 16_000],
            is_fallback: false,
        };

        // A 10 ms window cannot hold one 50 ms analysis frame
        let verdict = analyze_music(&signal, &[], Some((0.0, 0.01)), &config);
        assert!(!verdict.detected);
        assert_eq!(verdict.confidence, config.detector.fallback_confidence);
    }
}
