//! # Scenefuse
//!
//! Scene-aligned audio-visual fusion engine for ad-creative analysis:
//! decides from spectral evidence whether background music plays under
//! narration, aligns transcript timing onto detected scenes, and merges
//! visual and audio signals into one scored timeline.
//!
//! ## Pipeline
//!
//! ```text
//! audio bytes ─▶ preprocessing ─▶ log-mel ─▶ HPSS ─▶ music detector ─┐
//! transcript ──▶ scene-audio aligner ◀── scenes ◀── scene detector   ├─▶ fused timeline
//! visual descriptors ───────────────────▶ fusion scorer ◀────────────┘
//! ```
//!
//! The music detector's verdict is final: downstream consumers (including
//! any LLM explanation layer) receive it as read-only fields they may quote
//! but never recompute. Corrupt or missing media never fails the pipeline —
//! every degenerate path resolves to explicit conservative defaults.
//!
//! ## Quick Start
//!
//! ```no_run
//! use scenefuse::{analyze_creative, FusionConfig, Scene, SceneVisual, Segment, Word};
//!
//! let audio_bytes: Vec<u8> = vec![]; // WAV/MP4/WebM payload
//! let words: Vec<Word> = vec![];
//! let segments: Vec<Segment> = vec![];
//! let scenes: Vec<Scene> = vec![];
//! let sync_quality: Vec<f32> = vec![];
//!
//! let timeline = analyze_creative(
//!     &audio_bytes,
//!     &words,
//!     &segments,
//!     &scenes,
//!     &sync_quality,
//!     &FusionConfig::default(),
//! )?;
//!
//! println!("overall {:.1}/10, music: {}", timeline.overall_score, timeline.music_detected);
//! # Ok::<(), scenefuse::FusionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alignment;
pub mod config;
pub mod detection;
pub mod error;
pub mod fusion;
pub mod io;
pub mod preprocessing;
pub mod scene;
pub mod spectral;

// Re-export main types
pub use alignment::{align_transcript_to_scenes, AlignmentReport, SceneAudioProfile, Segment, VoiceStyle, VolumeLevel, Word};
pub use config::{DetectorThresholds, FusionConfig};
pub use detection::{analyze_music, MusicType, MusicVerdict};
pub use error::FusionError;
pub use fusion::{fuse, FusedScene, FusedTimeline};
pub use scene::{Scene, SceneVisual};

/// Analyze one creative asset end to end
///
/// Runs the full pipeline over one audio buffer and one scene set:
/// preprocessing, per-scene music detection, transcript alignment and fusion
/// scoring. The invocation is side-effect free and deterministic for
/// identical inputs; concurrent calls for different assets share no state.
///
/// # Arguments
///
/// * `audio_bytes` - Raw audio container bytes (WAV, or a video container;
///   corrupt media degrades to a conservative fallback, never an error)
/// * `words` / `segments` - Full-track transcript timestamps from the
///   external transcription provider
/// * `scenes` - Scene ranges and visual descriptors from the external scene
///   detector
/// * `sync_quality` - Externally assessed audio/visual coherence per scene
///   (1-10), one entry per scene
///
/// # Errors
///
/// Only programmer errors surface here: a sync slice of the wrong length or
/// non-finite timestamps. Data-quality problems degrade with warnings on the
/// returned timeline.
pub fn analyze_creative(
    audio_bytes: &[u8],
    words: &[Word],
    segments: &[Segment],
    scenes: &[Scene],
    sync_quality: &[f32],
    config: &FusionConfig,
) -> Result<FusedTimeline, FusionError> {
    log::debug!(
        "Analyzing creative: {} bytes audio, {} words, {} segments, {} scenes",
        audio_bytes.len(),
        words.len(),
        segments.len(),
        scenes.len()
    );

    let signal = preprocessing::prepare_signal(audio_bytes, config);

    let report =
        align_transcript_to_scenes(words, segments, scenes, Some(&signal), config)?;

    let mut timeline = fuse(scenes, &report.profiles, sync_quality, config)?;

    let mut warnings = report.warnings;
    if signal.is_fallback {
        warnings.push("Audio extraction degraded to low-energy fallback".to_string());
    }
    timeline.warnings = warnings;

    log::debug!(
        "Creative analyzed: overall {:.1}/10 across {} scenes, music detected: {}",
        timeline.overall_score,
        timeline.scenes.len(),
        timeline.music_detected
    );

    Ok(timeline)
}
