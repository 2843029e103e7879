//! Fused timeline types
//!
//! Created once per analysis run and immutable thereafter. The explanation
//! layer that consumes `FusedTimeline` receives the music flags as read-only
//! fields it may quote but never recompute or invert.

use serde::{Deserialize, Serialize};

use crate::alignment::aligner::SceneAudioProfile;
use crate::scene::Scene;

/// One scene with its visual and audio halves merged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusedScene {
    /// The scene and its visual descriptors
    pub scene: Scene,

    /// Audio evidence aligned to this scene
    pub audio: SceneAudioProfile,

    /// Audio/visual coherence for this scene (1-10, externally supplied)
    pub sync_quality: f32,
}

/// Scored timeline for one creative asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusedTimeline {
    /// Fused scenes in time order
    pub scenes: Vec<FusedScene>,

    /// Sum of scene durations in seconds
    pub total_duration_sec: f32,

    /// Mean of technical, sync, narrative and brand scores (1-10)
    pub overall_score: f32,

    /// Mean visual quality across scenes (1-10)
    pub technical_score: f32,

    /// Mean audio/visual sync quality across scenes (1-10)
    pub sync_score: f32,

    /// Pacing, transitions and call-to-action distribution (1-10)
    pub narrative_score: f32,

    /// Brand-element presence and palette discipline (1-10)
    pub brand_score: f32,

    /// True if music was detected in any scene (aggregated from the
    /// per-scene verdicts, never recomputed)
    pub music_detected: bool,

    /// Highest confidence among detected scenes, 0.0 when none detected
    pub music_confidence: f32,

    /// Objects across all scenes, ranked by frequency, capped
    pub objects: Vec<String>,

    /// On-screen text across all scenes, ranked by frequency, capped
    pub on_screen_text: Vec<String>,

    /// Dominant colors across all scenes, ranked by frequency, capped
    pub dominant_colors: Vec<String>,

    /// Advisory narrative strengths (explain the scores, not ground truth)
    pub strengths: Vec<String>,

    /// Advisory improvement suggestions
    pub improvements: Vec<String>,

    /// Structured degradation warnings carried through from earlier stages
    pub warnings: Vec<String>,
}
