//! Integration tests for the fusion pipeline

use std::io::Cursor;

use scenefuse::preprocessing::PreparedSignal;
use scenefuse::{
    analyze_creative, analyze_music, FusionConfig, Scene, SceneVisual, Segment, Word,
};

/// Deterministic pseudo-noise in [-1, 1]
struct Noise(u32);

impl Noise {
    fn next(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 8) as f32 / (1u32 << 23) as f32 - 1.0
    }
}

/// Synthetic music bed: a sustained 220 Hz tone under a dense click track
/// (20 ms noise bursts at 10 Hz), the classic HPSS test mixture
fn music_bed(duration_sec: f32, sample_rate: u32) -> Vec<f32> {
    let len = (duration_sec * sample_rate as f32) as usize;
    let mut noise = Noise(0xBEE5);
    let click_period = sample_rate as usize / 10;
    let click_len = sample_rate as usize / 50; // 20 ms

    (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let tone = 0.5 * (2.0 * std::f32::consts::PI * 220.0 * t).sin();
            let in_click = i % click_period < click_len;
            let click = if in_click { 0.35 * noise.next() } else { 0.0 };
            tone + click
        })
        .collect()
}

/// Speech-like signal: syllabic noise bursts, no tonal bed
fn narration_only(duration_sec: f32, sample_rate: u32) -> Vec<f32> {
    let len = (duration_sec * sample_rate as f32) as usize;
    let mut noise = Noise(0xFACE);
    let syllable_period = sample_rate as usize / 4; // 4 Hz
    let syllable_len = sample_rate as usize / 10; // 100 ms

    (0..len)
        .map(|i| {
            let in_burst = i % syllable_period < syllable_len;
            if in_burst {
                0.3 * noise.next()
            } else {
                0.0
            }
        })
        .collect()
}

/// Encode mono f32 samples as 16-bit PCM WAV bytes in memory
fn wav_bytes(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut buffer, spec).unwrap();
        for &s in samples {
            let value = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(value).unwrap();
        }
        writer.finalize().unwrap();
    }
    buffer.into_inner()
}

fn scene(id: u32, start: f32, end: f32, visual: SceneVisual) -> Scene {
    Scene {
        id,
        start_sec: start,
        end_sec: end,
        visual,
    }
}

fn demo_visual(quality: f32) -> SceneVisual {
    SceneVisual {
        objects: vec!["bottle".to_string(), "table".to_string()],
        on_screen_text: vec!["50% OFF".to_string()],
        composition: "product close-up".to_string(),
        brand_elements: vec!["logo".to_string()],
        dominant_colors: vec!["navy".to_string(), "white".to_string()],
        transition_effect: None,
        visual_quality: quality,
        engagement: 6.0,
    }
}

fn segments_3_to_7() -> Vec<Segment> {
    vec![Segment {
        text: "This blender makes mornings easy. Shop now.".to_string(),
        start_sec: 3.0,
        end_sec: 7.0,
    }]
}

fn words_3_to_7() -> Vec<Word> {
    let text = ["this", "blender", "makes", "mornings", "easy", "shop", "now"];
    text.iter()
        .enumerate()
        .map(|(i, w)| Word {
            text: w.to_string(),
            start_sec: 3.0 + i as f32 * 0.55,
            end_sec: 3.0 + i as f32 * 0.55 + 0.4,
        })
        .collect()
}

#[test]
fn test_music_bed_detected_with_speech_mask() {
    // A 220 Hz tone with a rhythmic click track, speech over seconds 3-7:
    // harmonic ratio during speech is high and periodicity is present
    let config = FusionConfig::default();
    let signal = PreparedSignal {
        samples: music_bed(10.0, config.target_sample_rate),
        is_fallback: false,
    };

    let verdict = analyze_music(&signal, &[(3.0, 7.0)], None, &config);

    assert!(verdict.detected, "music bed under speech should be detected");
    assert!(verdict.harmonic_ratio > 0.2);
    assert!(verdict.beat_periodicity > 0.15);
    assert!(
        (verdict.speech_coverage - 0.4).abs() < 0.05,
        "4 s of speech over 10 s: coverage {}",
        verdict.speech_coverage
    );
    assert!(verdict.confidence > 0.0 && verdict.confidence <= 10.0);
}

#[test]
fn test_music_bed_detected_without_speech_intervals() {
    // Same bed, empty speech intervals: the whole-signal branch carries it
    let config = FusionConfig::default();
    let signal = PreparedSignal {
        samples: music_bed(10.0, config.target_sample_rate),
        is_fallback: false,
    };

    let verdict = analyze_music(&signal, &[], None, &config);

    assert!(verdict.detected, "whole-signal branch should fire");
    assert_eq!(verdict.speech_coverage, 0.0);
    assert!(verdict.harmonic_ratio > 0.35);
}

#[test]
fn test_narration_only_not_detected() {
    let config = FusionConfig::default();
    let signal = PreparedSignal {
        samples: narration_only(10.0, config.target_sample_rate),
        is_fallback: false,
    };

    let verdict = analyze_music(&signal, &[(0.0, 10.0)], None, &config);

    assert!(!verdict.detected, "plain narration must not read as music");
    assert!(verdict.confidence <= 3.0);
}

#[test]
fn test_invalid_buffer_is_conservative_end_to_end() {
    let config = FusionConfig::default();
    let scenes = vec![
        scene(0, 0.0, 5.0, demo_visual(7.0)),
        scene(1, 5.0, 10.0, demo_visual(7.0)),
    ];

    let timeline = analyze_creative(
        b"definitely not a media container",
        &words_3_to_7(),
        &segments_3_to_7(),
        &scenes,
        &[6.0, 6.0],
        &config,
    )
    .unwrap();

    assert!(!timeline.music_detected, "fallback must never claim music");
    assert_eq!(timeline.music_confidence, 0.0);
    assert!(timeline
        .warnings
        .iter()
        .any(|w| w.contains("fallback")));
    for fused in &timeline.scenes {
        assert!(!fused.audio.music.detected);
        assert_eq!(fused.audio.music.confidence, 0.0);
    }
}

#[test]
fn test_full_pipeline_over_wav() {
    let config = FusionConfig::default();
    let bytes = wav_bytes(&music_bed(10.0, 16_000), 16_000);

    let scenes = vec![
        scene(0, 0.0, 5.0, demo_visual(8.0)),
        scene(1, 5.0, 10.0, demo_visual(7.0)),
    ];

    let timeline = analyze_creative(
        &bytes,
        &words_3_to_7(),
        &segments_3_to_7(),
        &scenes,
        &[7.0, 7.0],
        &config,
    )
    .unwrap();

    assert_eq!(timeline.scenes.len(), 2);
    assert!((timeline.total_duration_sec - 10.0).abs() < 1e-3);
    assert!(
        timeline.music_detected,
        "music bed should survive WAV round-trip and preprocessing"
    );
    assert!(timeline.music_confidence > 0.0);

    // All words sit in 3.0..6.7, inside the scene grid
    assert!(timeline.warnings.is_empty(), "warnings: {:?}", timeline.warnings);

    // Scores live in the contract range
    for score in [
        timeline.overall_score,
        timeline.technical_score,
        timeline.sync_score,
        timeline.narrative_score,
        timeline.brand_score,
    ] {
        assert!((1.0..=10.0).contains(&score));
    }

    // The aligner found the voiceover and its call to action
    let first = &timeline.scenes[0].audio;
    assert!(first.has_voice);
    assert!(first.calls_to_action.contains(&"shop now".to_string()));

    // Aggregates carry the visual descriptors
    assert!(timeline.objects.contains(&"bottle".to_string()));
    assert!(timeline.dominant_colors.contains(&"navy".to_string()));
}

#[test]
fn test_determinism_byte_for_byte() {
    let config = FusionConfig::default();
    let bytes = wav_bytes(&music_bed(8.0, 16_000), 16_000);
    let scenes = vec![
        scene(0, 0.0, 4.0, demo_visual(7.0)),
        scene(1, 4.0, 8.0, demo_visual(6.0)),
    ];

    let run = || {
        analyze_creative(
            &bytes,
            &words_3_to_7(),
            &segments_3_to_7(),
            &scenes,
            &[6.0, 7.0],
            &config,
        )
        .unwrap()
    };

    let first = serde_json::to_string(&run()).unwrap();
    let second = serde_json::to_string(&run()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_alignment_coverage_exact_grid() {
    // Words evenly spaced across a track split into equal scenes: every word
    // lands in exactly one scene and coverage is 100%
    let config = FusionConfig::default();
    let words: Vec<Word> = (0..40)
        .map(|i| Word {
            text: format!("w{}", i),
            start_sec: i as f32 * 0.25,
            end_sec: i as f32 * 0.25 + 0.2,
        })
        .collect();
    let scenes: Vec<Scene> = (0..4)
        .map(|i| scene(i, i as f32 * 2.5, (i + 1) as f32 * 2.5, demo_visual(7.0)))
        .collect();

    let report = scenefuse::align_transcript_to_scenes(&words, &[], &scenes, None, &config)
        .unwrap();

    assert_eq!(report.coverage_pct, 100.0);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_timeline_serialization_roundtrip() {
    let config = FusionConfig::default();
    let scenes = vec![scene(0, 0.0, 5.0, demo_visual(7.0))];

    let timeline = analyze_creative(
        &wav_bytes(&music_bed(5.0, 16_000), 16_000),
        &[],
        &[],
        &scenes,
        &[6.0],
        &config,
    )
    .unwrap();

    let json = serde_json::to_string(&timeline).unwrap();
    let back: scenefuse::FusedTimeline = serde_json::from_str(&json).unwrap();

    assert_eq!(back.scenes.len(), timeline.scenes.len());
    assert_eq!(back.music_detected, timeline.music_detected);
    assert_eq!(back.overall_score, timeline.overall_score);
}

#[test]
fn test_pathological_scenes_clamped() {
    let config = FusionConfig::default();
    let mut visual = demo_visual(0.0);
    visual.dominant_colors = vec!["red".to_string(); 50];

    let scenes = vec![scene(0, 2.0, 2.0, visual)];

    let timeline = analyze_creative(
        b"garbage",
        &[],
        &[],
        &scenes,
        &[0.0],
        &config,
    )
    .unwrap();

    for score in [
        timeline.overall_score,
        timeline.technical_score,
        timeline.sync_score,
        timeline.narrative_score,
        timeline.brand_score,
    ] {
        assert!((1.0..=10.0).contains(&score), "score {} out of range", score);
    }
}
