//! Scene input types
//!
//! Scenes are supplied by an external scene/keyframe detector as contiguous
//! (or near-contiguous) time ranges of one creative asset, each carrying the
//! detector's visual descriptors. This crate never re-derives scene
//! boundaries; it aligns audio evidence onto them.

use serde::{Deserialize, Serialize};

/// Visual descriptors for one scene, as produced by the external detector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneVisual {
    /// Detected objects, most prominent first
    pub objects: Vec<String>,

    /// On-screen text fragments
    pub on_screen_text: Vec<String>,

    /// Composition description (e.g. "close-up", "product on table")
    pub composition: String,

    /// Detected brand elements (logo, brand name, packshot)
    pub brand_elements: Vec<String>,

    /// Dominant colors, most prominent first
    pub dominant_colors: Vec<String>,

    /// Transition effect into this scene, if the detector reported one
    pub transition_effect: Option<String>,

    /// Visual quality score (1-10)
    pub visual_quality: f32,

    /// Predicted engagement score (1-10)
    pub engagement: f32,
}

/// One scene of a creative asset: a time range plus visual descriptors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Identifier unique within one analysis run
    pub id: u32,

    /// Scene start in seconds from the start of the asset
    pub start_sec: f32,

    /// Scene end in seconds (exclusive); must be >= start_sec
    pub end_sec: f32,

    /// Visual descriptors from the external scene detector
    pub visual: SceneVisual,
}

impl Scene {
    /// Scene duration in seconds
    ///
    /// A negative duration is a programmer error (the scene detector
    /// contract forbids it) and trips an assertion in debug builds; release
    /// builds clamp to zero so scoring arithmetic stays well-defined.
    pub fn duration_sec(&self) -> f32 {
        debug_assert!(
            self.end_sec >= self.start_sec,
            "scene {} has negative duration ({} > {})",
            self.id,
            self.start_sec,
            self.end_sec
        );
        (self.end_sec - self.start_sec).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let scene = Scene {
            id: 1,
            start_sec: 2.5,
            end_sec: 6.0,
            visual: SceneVisual::default(),
        };
        assert!((scene.duration_sec() - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_is_tolerated() {
        let scene = Scene {
            id: 2,
            start_sec: 4.0,
            end_sec: 4.0,
            visual: SceneVisual::default(),
        };
        assert_eq!(scene.duration_sec(), 0.0);
    }
}
