//! Transcript atoms
//!
//! Word- and segment-level timestamps from the external transcription
//! provider. Segments are a coarser grouping than words (roughly sentences)
//! and may span scene cuts; words carry tight per-token timing.

use serde::{Deserialize, Serialize};

/// One transcribed word with its time range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// The word text
    pub text: String,

    /// Start time in seconds
    pub start_sec: f32,

    /// End time in seconds (>= start_sec)
    pub end_sec: f32,
}

impl Word {
    /// Time midpoint, used for scene assignment
    ///
    /// Midpoint containment assigns a boundary-straddling word to exactly
    /// one scene, avoiding double counting across adjacent scenes.
    pub fn midpoint_sec(&self) -> f32 {
        debug_assert!(self.end_sec >= self.start_sec);
        (self.start_sec + self.end_sec) / 2.0
    }
}

/// One transcribed segment (sentence-level grouping) with its time range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// The segment text
    pub text: String,

    /// Start time in seconds
    pub start_sec: f32,

    /// End time in seconds (>= start_sec)
    pub end_sec: f32,
}

impl Segment {
    /// True if this segment's range overlaps `[start, end)` at all
    ///
    /// Overlap (not midpoint) assignment is deliberate: a sentence may
    /// legitimately span a scene cut and belongs to both scenes.
    pub fn overlaps(&self, start_sec: f32, end_sec: f32) -> bool {
        self.start_sec < end_sec && self.end_sec > start_sec
    }
}
