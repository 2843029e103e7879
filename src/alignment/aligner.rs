//! Transcript-to-scene alignment
//!
//! Assignment is deliberately asymmetric: words use midpoint containment
//! (a boundary-straddling word lands in exactly one scene), segments use
//! range overlap (a sentence spanning a cut belongs to both scenes). The
//! per-scene music verdict comes from the speech-gated detector restricted
//! to the scene window; scenes without audio default to "no music" with
//! zero confidence — never "unknown" — so downstream arithmetic stays
//! well-defined.

use serde::{Deserialize, Serialize};

use crate::config::FusionConfig;
use crate::detection::music::{analyze_music, MusicType, MusicVerdict};
use crate::error::FusionError;
use crate::preprocessing::PreparedSignal;
use crate::scene::Scene;

use super::transcript::{Segment, Word};
use super::voice_style::{classify_voice_style, detect_calls_to_action, VoiceStyle};

/// Sample magnitude treated as clipped
const CLIP_LEVEL: f32 = 0.99;

/// Perceived loudness class of a scene's audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeLevel {
    /// RMS below the quiet threshold
    Quiet,
    /// Comfortable program level
    Moderate,
    /// RMS above the loud threshold
    Loud,
}

/// Audio evidence aligned to one scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneAudioProfile {
    /// Scene identifier this profile belongs to
    pub scene_id: u32,

    /// Concatenation of overlapping segment texts, in time order
    pub transcript: String,

    /// True if any word was assigned to the scene
    pub has_voice: bool,

    /// Rule-based narration style of the snippet
    pub voice_style: VoiceStyle,

    /// Music verdict for this scene's window (read-only downstream)
    pub music: MusicVerdict,

    /// Coarse character of the detected music, from the verdict's evidence
    pub music_type: MusicType,

    /// Audio quality score (1-10)
    pub audio_quality: f32,

    /// Loudness class
    pub volume: VolumeLevel,

    /// Call-to-action phrases found in the snippet
    pub calls_to_action: Vec<String>,

    /// Words per minute over the scene duration
    pub speech_rate_wpm: f32,
}

/// Alignment output: per-scene profiles plus coverage reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// One profile per input scene, in input order
    pub profiles: Vec<SceneAudioProfile>,

    /// Percentage of transcript words assigned to some scene
    pub coverage_pct: f32,

    /// Structured data-quality warnings (low coverage etc.)
    pub warnings: Vec<String>,
}

/// Align a full-track transcript onto scene time ranges
///
/// # Arguments
///
/// * `words` - Word-level timestamps for the whole track
/// * `segments` - Segment-level timestamps for the whole track
/// * `scenes` - Externally supplied scene ranges with visual descriptors
/// * `audio` - Prepared signal for per-scene music detection; `None` makes
///   every scene default to "no music" with zero confidence
///
/// # Errors
///
/// Non-finite timestamps are programmer errors. Data-quality issues (gaps,
/// low coverage, missing audio) degrade with warnings instead.
pub fn align_transcript_to_scenes(
    words: &[Word],
    segments: &[Segment],
    scenes: &[Scene],
    audio: Option<&PreparedSignal>,
    config: &FusionConfig,
) -> Result<AlignmentReport, FusionError> {
    validate_times(words, segments, scenes)?;

    // Speech intervals for the detector come from segment timing
    let speech_intervals: Vec<(f32, f32)> = segments
        .iter()
        .map(|s| (s.start_sec, s.end_sec))
        .collect();

    let mut profiles = Vec::with_capacity(scenes.len());
    let mut assigned_words = 0usize;

    for scene in scenes {
        let scene_words: Vec<&Word> = words
            .iter()
            .filter(|w| {
                let mid = w.midpoint_sec();
                mid >= scene.start_sec && mid < scene.end_sec
            })
            .collect();
        assigned_words += scene_words.len();

        let mut scene_segments: Vec<&Segment> = segments
            .iter()
            .filter(|s| s.overlaps(scene.start_sec, scene.end_sec))
            .collect();
        scene_segments.sort_by(|a, b| {
            a.start_sec
                .partial_cmp(&b.start_sec)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let transcript = scene_segments
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let duration = scene.duration_sec();
        let speech_rate_wpm = if duration > 0.0 {
            scene_words.len() as f32 / duration * 60.0
        } else {
            0.0
        };

        let music = match audio {
            Some(signal) => analyze_music(
                signal,
                &speech_intervals,
                Some((scene.start_sec, scene.end_sec)),
                config,
            )
            .for_output(),
            None => MusicVerdict::none(),
        };

        let (audio_quality, volume) = assess_audio_quality(audio, scene, config);

        profiles.push(SceneAudioProfile {
            scene_id: scene.id,
            has_voice: !scene_words.is_empty(),
            voice_style: classify_voice_style(&transcript),
            calls_to_action: detect_calls_to_action(&transcript),
            transcript,
            music_type: music.music_type(),
            music,
            audio_quality,
            volume,
            speech_rate_wpm,
        });
    }

    let coverage_pct = if words.is_empty() {
        100.0
    } else {
        assigned_words as f32 / words.len() as f32 * 100.0
    };

    let mut warnings = Vec::new();
    if coverage_pct < config.coverage_warn_pct {
        let warning = format!(
            "Transcript coverage {:.1}%, below {:.0}% threshold",
            coverage_pct, config.coverage_warn_pct
        );
        log::warn!("{}", warning);
        warnings.push(warning);
    }

    log::debug!(
        "Aligned {} words across {} scenes, coverage {:.1}%",
        assigned_words,
        scenes.len(),
        coverage_pct
    );

    Ok(AlignmentReport {
        profiles,
        coverage_pct,
        warnings,
    })
}

/// Reject non-finite timestamps; these are programmer errors, not data noise
fn validate_times(
    words: &[Word],
    segments: &[Segment],
    scenes: &[Scene],
) -> Result<(), FusionError> {
    let finite = |v: f32| v.is_finite();

    if !words.iter().all(|w| finite(w.start_sec) && finite(w.end_sec))
        || !segments
            .iter()
            .all(|s| finite(s.start_sec) && finite(s.end_sec))
        || !scenes
            .iter()
            .all(|s| finite(s.start_sec) && finite(s.end_sec))
    {
        return Err(FusionError::InvalidInput(
            "Non-finite timestamp in transcript or scene input".to_string(),
        ));
    }
    Ok(())
}

/// Heuristic audio quality (1-10) and volume class for one scene window
fn assess_audio_quality(
    audio: Option<&PreparedSignal>,
    scene: &Scene,
    config: &FusionConfig,
) -> (f32, VolumeLevel) {
    let signal = match audio {
        Some(signal) => signal,
        // Cannot assess: neutral defaults keep downstream arithmetic sane
        None => return (5.0, VolumeLevel::Moderate),
    };

    if signal.is_fallback {
        return (3.0, VolumeLevel::Quiet);
    }

    let rate = config.target_sample_rate as f32;
    let lo = ((scene.start_sec.max(0.0) * rate) as usize).min(signal.samples.len());
    let hi = ((scene.end_sec.max(0.0) * rate) as usize).min(signal.samples.len());
    let slice = &signal.samples[lo..hi.max(lo)];

    if slice.is_empty() {
        return (5.0, VolumeLevel::Moderate);
    }

    let rms = (slice.iter().map(|&x| x * x).sum::<f32>() / slice.len() as f32).sqrt();
    let clip_fraction =
        slice.iter().filter(|&&x| x.abs() >= CLIP_LEVEL).count() as f32 / slice.len() as f32;

    let mut quality = 5.0f32;
    if (0.05..=0.3).contains(&rms) {
        quality += 2.0;
    } else if (0.02..0.05).contains(&rms) || (0.3..=0.5).contains(&rms) {
        quality += 1.0;
    } else if rms < 0.005 {
        quality -= 2.0;
    }

    if clip_fraction > 0.01 {
        quality -= 2.0;
    } else if clip_fraction > 0.001 {
        quality -= 1.0;
    }

    let volume = if rms < 0.02 {
        VolumeLevel::Quiet
    } else if rms < 0.15 {
        VolumeLevel::Moderate
    } else {
        VolumeLevel::Loud
    };

    (quality.clamp(1.0, 10.0), volume)
}
