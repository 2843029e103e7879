//! Scene-audio alignment
//!
//! Maps transcript words and segments onto externally supplied scene time
//! ranges and derives a per-scene audio profile: transcript snippet, voice
//! presence and style, speech rate, call-to-action phrases, music verdict,
//! audio quality and volume.

pub mod aligner;
pub mod transcript;
pub mod voice_style;

pub use aligner::{
    align_transcript_to_scenes, AlignmentReport, SceneAudioProfile, VolumeLevel,
};
pub use transcript::{Segment, Word};
pub use voice_style::VoiceStyle;
