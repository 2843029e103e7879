//! Speech mask construction
//!
//! Converts transcript segment time ranges into a per-frame boolean mask
//! aligned with the spectrogram: one entry per analysis frame, true where
//! any spoken interval overlaps the frame.

/// Build a frame-level speech mask from transcript intervals
///
/// # Arguments
///
/// * `intervals` - Spoken `[start, end)` ranges in absolute track seconds
/// * `num_frames` - Number of analysis frames to cover
/// * `frame_duration_sec` - Duration of one frame (one STFT hop)
/// * `window_start_sec` - Absolute track time of frame 0 (non-zero when the
///   analysis is restricted to one scene's window)
///
/// # Returns
///
/// `num_frames` booleans; frame i is true if any interval overlaps
/// `[window_start + i * dur, window_start + (i + 1) * dur)`.
pub fn build_speech_mask(
    intervals: &[(f32, f32)],
    num_frames: usize,
    frame_duration_sec: f32,
    window_start_sec: f32,
) -> Vec<bool> {
    let mut mask = vec![false; num_frames];
    if intervals.is_empty() || frame_duration_sec <= 0.0 {
        return mask;
    }

    for (i, flag) in mask.iter_mut().enumerate() {
        let frame_start = window_start_sec + i as f32 * frame_duration_sec;
        let frame_end = frame_start + frame_duration_sec;

        *flag = intervals
            .iter()
            .any(|&(start, end)| start < frame_end && end > frame_start);
    }

    let covered = mask.iter().filter(|&&m| m).count();
    log::debug!(
        "Speech mask: {}/{} frames covered by {} intervals",
        covered,
        num_frames,
        intervals.len()
    );

    mask
}
