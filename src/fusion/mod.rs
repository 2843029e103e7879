//! Scene fusion
//!
//! Merges per-scene visual descriptors and audio profiles into one scored,
//! immutable timeline: per-dimension scores, aggregate object/text/color
//! lists, and advisory strengths/improvements. Numeric scores and the music
//! verdicts are the ground truth downstream; the textual insights only
//! explain them.

pub mod insights;
pub mod result;
pub mod scorer;

pub use result::{FusedScene, FusedTimeline};
pub use scorer::fuse;
