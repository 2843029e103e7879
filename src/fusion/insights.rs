//! Aggregation and advisory insights
//!
//! Frequency-ranked aggregate lists and threshold-rule strengths and
//! improvements. Everything produced here is advisory prose for the
//! downstream explanation layer — the numeric scores and music verdicts stay
//! the ground truth, and the music wording only quotes the verdicts.

use std::collections::HashMap;

use super::result::FusedScene;

/// Speech rate above which narration reads as rushed, in words per minute
const FAST_NARRATION_WPM: f32 = 180.0;

/// Speech rate below which narration reads as dragging
const SLOW_NARRATION_WPM: f32 = 90.0;

/// Deduplicate and rank items by frequency, truncated to `cap`
///
/// Grouping is case-insensitive; the first-seen casing is kept for display.
/// Ties break alphabetically so identical inputs always aggregate
/// identically.
pub fn ranked_unique<'a>(items: impl Iterator<Item = &'a String>, cap: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, String)> = HashMap::new();

    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        let entry = counts
            .entry(trimmed.to_lowercase())
            .or_insert_with(|| (0, trimmed.to_string()));
        entry.0 += 1;
    }

    let mut ranked: Vec<(usize, String)> = counts.into_values().collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    ranked.into_iter().take(cap).map(|(_, name)| name).collect()
}

/// Generate advisory strengths and improvements from scores and scenes
///
/// Plain threshold rules per dimension; both lists are truncated to `cap`.
pub fn generate(
    technical: f32,
    sync: f32,
    narrative: f32,
    brand: f32,
    fused: &[FusedScene],
    cap: usize,
) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    if technical >= 8.0 {
        strengths.push("Strong visual quality across scenes".to_string());
    } else if technical < 6.0 {
        improvements.push("Improve lighting and composition in weaker scenes".to_string());
    }

    if sync >= 8.0 {
        strengths.push("Audio and visuals are tightly synchronized".to_string());
    } else if sync < 6.0 {
        improvements
            .push("Tighten audio/visual timing so key visuals land on the narration".to_string());
    }

    if narrative >= 8.0 {
        strengths.push("Pacing and story flow feel deliberate".to_string());
    } else if narrative < 6.0 {
        improvements.push("Smooth out pacing; keep scene lengths more consistent".to_string());
    }

    if brand >= 8.0 {
        strengths.push("Consistent brand presence and color palette".to_string());
    } else if brand < 6.0 {
        improvements.push("Increase brand visibility and tighten the color palette".to_string());
    }

    // Music wording quotes the per-scene verdicts; it never re-decides them
    let any_music = fused.iter().any(|f| f.audio.music.detected);
    let any_voice = fused.iter().any(|f| f.audio.has_voice);
    if any_music && any_voice {
        strengths.push("Background music supports the narration".to_string());
    } else if !any_music && any_voice {
        improvements.push("Consider a subtle music bed under the narration".to_string());
    }

    let voiced_rates: Vec<f32> = fused
        .iter()
        .filter(|f| f.audio.has_voice && f.audio.speech_rate_wpm > 0.0)
        .map(|f| f.audio.speech_rate_wpm)
        .collect();
    if !voiced_rates.is_empty() {
        let mean_rate = voiced_rates.iter().sum::<f32>() / voiced_rates.len() as f32;
        if mean_rate > FAST_NARRATION_WPM {
            improvements.push("Narration is fast; consider slowing the delivery".to_string());
        } else if mean_rate < SLOW_NARRATION_WPM {
            improvements.push("Narration is slow; consider tightening the script".to_string());
        }
    }

    if !fused.is_empty() && fused.iter().all(|f| f.audio.calls_to_action.is_empty()) {
        improvements.push("Add a clear call to action".to_string());
    }

    strengths.truncate(cap);
    improvements.truncate(cap);

    (strengths, improvements)
}
