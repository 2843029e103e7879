//! Fusion scoring
//!
//! Computes the four score dimensions and assembles the fused timeline.
//! Every score is clamped to [1, 10] regardless of how pathological the
//! input is; zero-duration scenes and empty lists are guarded with explicit
//! zero-checks before any division.

use std::collections::HashSet;

use crate::alignment::aligner::{SceneAudioProfile, VolumeLevel};
use crate::alignment::voice_style::VoiceStyle;
use crate::config::FusionConfig;
use crate::detection::music::{MusicType, MusicVerdict};
use crate::error::FusionError;
use crate::scene::Scene;

use super::insights;
use super::result::{FusedScene, FusedTimeline};

/// Neutral starting point for the narrative-flow score
const NARRATIVE_BASE: f32 = 7.0;

/// Coefficient-of-variation bounds for the pacing rule: steady pacing is
/// rewarded, erratic pacing reads as unplanned and is penalized
const CV_STEADY: f32 = 0.3;
const CV_ERRATIC: f32 = 0.8;

/// Merge visual scenes, audio profiles and sync scores into a fused timeline
///
/// Profiles are matched to scenes by `scene_id`; a scene without a profile
/// gets a silent default (missing upstream data is not an error). The sync
/// slice must have exactly one entry per scene — a mismatch is a programmer
/// error.
pub fn fuse(
    scenes: &[Scene],
    profiles: &[SceneAudioProfile],
    sync_quality: &[f32],
    config: &FusionConfig,
) -> Result<FusedTimeline, FusionError> {
    if sync_quality.len() != scenes.len() {
        return Err(FusionError::InvalidInput(format!(
            "{} sync scores for {} scenes",
            sync_quality.len(),
            scenes.len()
        )));
    }

    let mut fused = Vec::with_capacity(scenes.len());
    for (scene, &sync) in scenes.iter().zip(sync_quality.iter()) {
        let audio = profiles
            .iter()
            .find(|p| p.scene_id == scene.id)
            .cloned()
            .unwrap_or_else(|| silent_profile(scene.id));

        fused.push(FusedScene {
            scene: scene.clone(),
            audio,
            sync_quality: sync.clamp(1.0, 10.0),
        });
    }

    let technical_score = clamp_score(mean(scenes.iter().map(|s| s.visual.visual_quality)));
    let sync_score = clamp_score(mean(fused.iter().map(|f| f.sync_quality)));
    let narrative_score = narrative_flow_score(&fused);
    let brand_score = brand_consistency_score(scenes);

    let overall_score = clamp_score(
        (technical_score + sync_score + narrative_score + brand_score) / 4.0,
    );

    // Timeline-level music flags aggregate the per-scene verdicts; the
    // verdicts themselves are never recomputed here.
    let detected_verdicts: Vec<&MusicVerdict> = fused
        .iter()
        .map(|f| &f.audio.music)
        .filter(|m| m.detected)
        .collect();
    let music_detected = !detected_verdicts.is_empty();
    let music_confidence = detected_verdicts
        .iter()
        .map(|m| m.confidence)
        .fold(0.0f32, f32::max);

    let total_duration_sec = scenes.iter().map(|s| s.duration_sec()).sum();

    let objects = insights::ranked_unique(
        scenes.iter().flat_map(|s| s.visual.objects.iter()),
        config.max_list_items,
    );
    let on_screen_text = insights::ranked_unique(
        scenes.iter().flat_map(|s| s.visual.on_screen_text.iter()),
        config.max_list_items,
    );
    let dominant_colors = insights::ranked_unique(
        scenes.iter().flat_map(|s| s.visual.dominant_colors.iter()),
        config.max_list_items,
    );

    let (strengths, improvements) = insights::generate(
        technical_score,
        sync_score,
        narrative_score,
        brand_score,
        &fused,
        config.max_list_items,
    );

    log::debug!(
        "Fused {} scenes: overall {:.1} (tech {:.1}, sync {:.1}, narrative {:.1}, brand {:.1})",
        fused.len(),
        overall_score,
        technical_score,
        sync_score,
        narrative_score,
        brand_score
    );

    Ok(FusedTimeline {
        scenes: fused,
        total_duration_sec,
        overall_score,
        technical_score,
        sync_score,
        narrative_score,
        brand_score,
        music_detected,
        music_confidence,
        objects,
        on_screen_text,
        dominant_colors,
        strengths,
        improvements,
        warnings: Vec::new(),
    })
}

/// Default profile for a scene the aligner produced no audio evidence for
fn silent_profile(scene_id: u32) -> SceneAudioProfile {
    SceneAudioProfile {
        scene_id,
        transcript: String::new(),
        has_voice: false,
        voice_style: VoiceStyle::Neutral,
        music: MusicVerdict::none(),
        music_type: MusicType::None,
        audio_quality: 5.0,
        volume: VolumeLevel::Moderate,
        calls_to_action: Vec::new(),
        speech_rate_wpm: 0.0,
    }
}

/// Narrative-flow score: neutral base, adjusted for transitions, pacing
/// steadiness and call-to-action distribution
fn narrative_flow_score(fused: &[FusedScene]) -> f32 {
    if fused.is_empty() {
        return clamp_score(0.0);
    }

    let mut score = NARRATIVE_BASE;

    if fused
        .iter()
        .any(|f| f.scene.visual.transition_effect.is_some())
    {
        score += 1.0;
    }

    let durations: Vec<f32> = fused.iter().map(|f| f.scene.duration_sec()).collect();
    let mean_dur = durations.iter().sum::<f32>() / durations.len() as f32;
    if mean_dur > 0.0 {
        let variance = durations
            .iter()
            .map(|d| (d - mean_dur) * (d - mean_dur))
            .sum::<f32>()
            / durations.len() as f32;
        let cv = variance.sqrt() / mean_dur;

        if cv < CV_STEADY {
            score += 1.0;
        } else if cv > CV_ERRATIC {
            score -= 1.0;
        }
    }

    // A call-to-action somewhere, but not sprayed across every scene
    let cta_scenes = fused
        .iter()
        .filter(|f| !f.audio.calls_to_action.is_empty())
        .count();
    if cta_scenes > 0 && cta_scenes * 2 <= fused.len() {
        score += 1.0;
    }

    clamp_score(score)
}

/// Brand-consistency score: brand-element presence weighted with palette
/// discipline (fewer repeated dominant colors signals a deliberate palette)
fn brand_consistency_score(scenes: &[Scene]) -> f32 {
    if scenes.is_empty() {
        return clamp_score(0.0);
    }

    let branded = scenes
        .iter()
        .filter(|s| !s.visual.brand_elements.is_empty())
        .count();
    let brand_fraction = branded as f32 / scenes.len() as f32;

    let unique_colors: HashSet<String> = scenes
        .iter()
        .flat_map(|s| s.visual.dominant_colors.iter())
        .map(|c| c.to_lowercase())
        .collect();

    let palette_discipline = if unique_colors.is_empty() {
        0.5
    } else {
        (3.0 / unique_colors.len() as f32).min(1.0)
    };

    clamp_score((brand_fraction * 0.6 + palette_discipline * 0.4) * 10.0)
}

/// Clamp a score into the [1, 10] contract range
fn clamp_score(value: f32) -> f32 {
    if !value.is_finite() {
        return 1.0;
    }
    value.clamp(1.0, 10.0)
}

/// Mean of an iterator, 0.0 when empty
fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}
