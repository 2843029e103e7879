//! Configuration parameters for creative analysis

/// Analysis configuration parameters
///
/// One value of this struct parameterizes the whole pipeline; there is no
/// global state. All thresholds below were tuned empirically against real
/// creative assets and should be treated as tunable, not as physical
/// constants.
#[derive(Debug, Clone)]
pub struct FusionConfig {
    // Signal preprocessing
    /// Target sample rate after resampling, in Hz (default: 16000)
    pub target_sample_rate: u32,

    /// Maximum analyzed duration in seconds; longer signals are truncated
    /// for cost bounding (default: 30.0)
    pub max_duration_sec: f32,

    /// Target RMS level for gain normalization (default: 0.1)
    pub target_rms: f32,

    /// High-pass cutoff in Hz for DC/rumble removal (default: 50.0)
    pub highpass_cutoff_hz: f32,

    // Spectral decomposition
    /// STFT window size in samples (default: 800 = 50 ms at 16 kHz)
    pub frame_size: usize,

    /// STFT hop size in samples (default: 400 = 25 ms, 50% overlap).
    /// One speech-mask frame is emitted per hop, so mask index i lines up
    /// with spectrogram frame i.
    pub hop_size: usize,

    /// Number of mel bands (default: 64)
    pub mel_bins: usize,

    // Harmonic-percussive separation
    /// Time-axis median filter width in frames (default: 9, ~225 ms)
    pub hpss_harmonic_width: usize,

    /// Frequency-axis median filter width in mel bins (default: 9)
    pub hpss_percussive_width: usize,

    // Music detection
    /// Detector decision thresholds
    pub detector: DetectorThresholds,

    // Fusion aggregation
    /// Maximum entries kept in aggregated object/text/color lists (default: 10)
    pub max_list_items: usize,

    /// Transcript coverage below this percentage is reported as a
    /// data-quality warning (default: 95.0)
    pub coverage_warn_pct: f32,
}

/// Decision thresholds for the speech-gated music detector
///
/// The verdict rule is dual-branch: the speech-gated branch needs enough
/// speech coverage to be statistically reliable; the whole-signal branch is
/// the fallback evidence source for short or speech-sparse windows.
#[derive(Debug, Clone, Copy)]
pub struct DetectorThresholds {
    /// Minimum during-speech harmonic ratio for the speech-gated branch
    /// (default: 0.20)
    pub speech_harmonic_ratio: f32,

    /// Minimum beat periodicity for the speech-gated branch (default: 0.20)
    pub speech_beat_periodicity: f32,

    /// Minimum fraction of frames marked as speech for the speech-gated
    /// branch to apply (default: 0.40)
    pub min_speech_coverage: f32,

    /// Minimum whole-signal harmonic ratio for the fallback branch
    /// (default: 0.35)
    pub whole_harmonic_ratio: f32,

    /// Minimum beat periodicity for the fallback branch (default: 0.15)
    pub whole_beat_periodicity: f32,

    /// Minimum frame-to-frame rise on the max-normalized onset curve that
    /// counts as a beat event (default: 0.10)
    pub onset_jump_threshold: f32,

    /// Confidence reported for degenerate input (invalid container, empty
    /// spectrogram); always paired with `detected = false` (default: 2.0)
    pub fallback_confidence: f32,
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            speech_harmonic_ratio: 0.20,
            speech_beat_periodicity: 0.20,
            min_speech_coverage: 0.40,
            whole_harmonic_ratio: 0.35,
            whole_beat_periodicity: 0.15,
            onset_jump_threshold: 0.10,
            fallback_confidence: 2.0,
        }
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: 16_000,
            max_duration_sec: 30.0,
            target_rms: 0.1,
            highpass_cutoff_hz: 50.0,
            frame_size: 800,
            hop_size: 400,
            mel_bins: 64,
            hpss_harmonic_width: 9,
            hpss_percussive_width: 9,
            detector: DetectorThresholds::default(),
            max_list_items: 10,
            coverage_warn_pct: 95.0,
        }
    }
}

impl FusionConfig {
    /// Duration of one analysis frame (one STFT hop) in seconds
    pub fn frame_duration_sec(&self) -> f32 {
        self.hop_size as f32 / self.target_sample_rate as f32
    }
}
