//! Background-music detection
//!
//! Builds a frame-level speech mask from transcript timestamps and renders a
//! speech-gated music verdict from harmonic/percussive spectral evidence.
//! The verdict is the single source of truth for "is there background
//! music": downstream stages quote it, never recompute or invert it.

pub mod music;
pub mod speech_mask;

pub use music::{analyze_music, detect_music, MusicType, MusicVerdict};
pub use speech_mask::build_speech_mask;
