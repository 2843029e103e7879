//! Voice-style classification and call-to-action detection
//!
//! Rule-based decision tree over punctuation density and vocabulary markers.
//! Rules are evaluated in a fixed priority order and the first match wins;
//! the same snippet always classifies the same way.

use serde::{Deserialize, Serialize};

/// Narration style of a scene's voiceover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceStyle {
    /// High-energy delivery: dense exclamations, hype vocabulary
    Energetic,
    /// Credential-heavy delivery: technology/quality vocabulary
    Professional,
    /// Direct-address delivery: questions, second-person density
    Conversational,
    /// Pain-point framing: problem/struggle vocabulary
    ProblemSolving,
    /// Scarcity framing: deadline/urgency vocabulary
    Urgent,
    /// Nothing distinctive
    Neutral,
}

/// Hype vocabulary for the energetic rule
const HYPE_MARKERS: &[&str] = &[
    "amazing",
    "incredible",
    "wow",
    "awesome",
    "unbelievable",
    "insane",
    "game-changer",
];

/// Credential vocabulary for the professional rule
const PROFESSIONAL_MARKERS: &[&str] = &[
    "solution",
    "technology",
    "proven",
    "research",
    "quality",
    "certified",
    "engineered",
    "professional",
];

/// Second-person markers for the conversational rule
const SECOND_PERSON_MARKERS: &[&str] = &["you", "your", "yours", "we", "let's"];

/// Pain-point vocabulary for the problem-solving rule
const PROBLEM_MARKERS: &[&str] = &[
    "problem",
    "struggle",
    "struggling",
    "frustrated",
    "tired of",
    "fix",
    "solve",
    "pain",
];

/// Scarcity vocabulary for the urgent rule
const URGENT_MARKERS: &[&str] = &[
    "now",
    "today",
    "hurry",
    "limited",
    "last chance",
    "ends soon",
    "act fast",
    "don't wait",
];

/// Fixed call-to-action vocabulary
const CTA_VOCABULARY: &[&str] = &[
    "shop now",
    "buy now",
    "order now",
    "learn more",
    "sign up",
    "subscribe",
    "click the link",
    "visit our",
    "get yours",
    "download",
    "try it free",
    "limited time",
    "don't miss out",
    "use code",
];

/// Classify the narration style of a transcript snippet
///
/// Priority order: energetic, professional, conversational, problem-solving,
/// urgent, neutral — first matching rule wins. An empty snippet is neutral.
pub fn classify_voice_style(snippet: &str) -> VoiceStyle {
    let text = snippet.to_lowercase();
    if text.trim().is_empty() {
        return VoiceStyle::Neutral;
    }

    let word_count = text.split_whitespace().count().max(1);
    let exclamations = text.matches('!').count();
    let questions = text.matches('?').count();
    let hype = count_markers(&text, HYPE_MARKERS);

    // Energetic: dense exclamations or hype vocabulary
    if exclamations >= 2
        || (exclamations >= 1 && hype >= 1)
        || hype >= 2
        || exclamations as f32 / word_count as f32 > 0.1
    {
        return VoiceStyle::Energetic;
    }

    if count_markers(&text, PROFESSIONAL_MARKERS) >= 2 {
        return VoiceStyle::Professional;
    }

    if questions >= 1 || count_markers(&text, SECOND_PERSON_MARKERS) >= 3 {
        return VoiceStyle::Conversational;
    }

    if count_markers(&text, PROBLEM_MARKERS) >= 1 {
        return VoiceStyle::ProblemSolving;
    }

    if count_markers(&text, URGENT_MARKERS) >= 1 {
        return VoiceStyle::Urgent;
    }

    VoiceStyle::Neutral
}

/// Find call-to-action phrases in a transcript snippet
///
/// Case-insensitive substring match against the fixed vocabulary; returns
/// the canonical (lowercase) form of each phrase found, in vocabulary order.
pub fn detect_calls_to_action(snippet: &str) -> Vec<String> {
    let text = snippet.to_lowercase();

    CTA_VOCABULARY
        .iter()
        .filter(|phrase| text.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}

/// Count marker occurrences in lowercased text
///
/// Single-word markers are matched on token boundaries (so "you" does not
/// count inside "your"); multi-word markers are matched as substrings.
fn count_markers(text: &str, markers: &[&str]) -> usize {
    let tokens: Vec<&str> = text
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
        .collect();

    markers
        .iter()
        .map(|marker| {
            if marker.contains(' ') {
                text.matches(marker).count()
            } else {
                tokens.iter().filter(|&&t| t == *marker).count()
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_neutral() {
        assert_eq!(classify_voice_style(""), VoiceStyle::Neutral);
        assert_eq!(classify_voice_style("   "), VoiceStyle::Neutral);
    }

    #[test]
    fn test_energetic() {
        assert_eq!(
            classify_voice_style("This is amazing! Get it today!"),
            VoiceStyle::Energetic
        );
        assert_eq!(
            classify_voice_style("Wow, this deal is incredible."),
            VoiceStyle::Energetic
        );
    }

    #[test]
    fn test_professional() {
        assert_eq!(
            classify_voice_style("Our proven technology delivers lab-grade results."),
            VoiceStyle::Professional
        );
    }

    #[test]
    fn test_conversational() {
        assert_eq!(
            classify_voice_style("Ever wondered how this works?"),
            VoiceStyle::Conversational
        );
        assert_eq!(
            classify_voice_style("You know your skin better than we do, so let's keep it simple."),
            VoiceStyle::Conversational
        );
    }

    #[test]
    fn test_problem_solving() {
        assert_eq!(
            classify_voice_style("Tired of tangled cables. There is a better way."),
            VoiceStyle::ProblemSolving
        );
    }

    #[test]
    fn test_urgent() {
        assert_eq!(
            classify_voice_style("Sale ends today. Limited stock remaining."),
            VoiceStyle::Urgent
        );
    }

    #[test]
    fn test_priority_energetic_beats_urgent() {
        // Contains both urgency and hype; energetic is checked first
        assert_eq!(
            classify_voice_style("Incredible savings! Only today! Hurry!"),
            VoiceStyle::Energetic
        );
    }

    #[test]
    fn test_token_boundary_matching() {
        // "yourself" must not count as "your"
        assert_eq!(
            classify_voice_style("Treat yourself to something nice."),
            VoiceStyle::Neutral
        );
    }

    #[test]
    fn test_cta_detection() {
        let ctas = detect_calls_to_action("Shop now and use code SAVE20 at checkout");
        assert_eq!(ctas, vec!["shop now".to_string(), "use code".to_string()]);
    }

    #[test]
    fn test_cta_case_insensitive() {
        let ctas = detect_calls_to_action("SIGN UP today — Don't Miss Out!");
        assert!(ctas.contains(&"sign up".to_string()));
        assert!(ctas.contains(&"don't miss out".to_string()));
    }

    #[test]
    fn test_no_cta() {
        assert!(detect_calls_to_action("Just a plain product description").is_empty());
    }
}
