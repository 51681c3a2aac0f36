use serde::{Deserialize, Serialize};

pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

pub const PRONUNCIATION_WEIGHT: f64 = 0.6;
pub const RECOGNITION_WEIGHT: f64 = 0.2;
pub const COMPLEXITY_WEIGHT: f64 = 0.1;
pub const VOCABULARY_WEIGHT: f64 = 0.1;

pub const COMPLEXITY_SATURATION_WORDS: usize = 40;
pub const PRACTICE_SIMILARITY_BLEND: f64 = 0.5;

pub const DISCOURSE_MIN_WORDS: usize = 8;
pub const DISCOURSE_BONUS: f64 = 3.0;

pub const CLARITY_HIGH_THRESHOLD: f64 = 0.9;
pub const CLARITY_BONUS: f64 = 2.0;
pub const CLARITY_LOW_THRESHOLD: f64 = 0.5;
pub const CLARITY_PENALTY: f64 = 5.0;

pub const SHORT_UTTERANCE_WORDS: usize = 3;
pub const SHORT_UTTERANCE_CAP: f64 = 60.0;

pub const MAX_FEEDBACK_ENTRIES: usize = 3;
pub const MAX_FLAGGED_WORDS: usize = 3;

/// Tunable scoring rubric. Weights must sum to 1.0 for the composite to span
/// the full 0-100 range; [`ScoringConfig::default`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Words at or above this confidence count as recognized.
    pub low_confidence_threshold: f64,
    pub pronunciation_weight: f64,
    pub recognition_weight: f64,
    pub complexity_weight: f64,
    pub vocabulary_weight: f64,
    /// Word count beyond which length adds nothing to the complexity signal.
    pub complexity_saturation_words: usize,
    /// Share of the pronunciation proxy taken from reference similarity in
    /// practice mode.
    pub practice_similarity_blend: f64,
    pub discourse_min_words: usize,
    pub discourse_bonus: f64,
    pub clarity_high_threshold: f64,
    pub clarity_bonus: f64,
    pub clarity_low_threshold: f64,
    pub clarity_penalty: f64,
    /// Transcripts with fewer words than this are capped at
    /// `short_utterance_cap`.
    pub short_utterance_words: usize,
    pub short_utterance_cap: f64,
    pub feedback: FeedbackThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
            pronunciation_weight: PRONUNCIATION_WEIGHT,
            recognition_weight: RECOGNITION_WEIGHT,
            complexity_weight: COMPLEXITY_WEIGHT,
            vocabulary_weight: VOCABULARY_WEIGHT,
            complexity_saturation_words: COMPLEXITY_SATURATION_WORDS,
            practice_similarity_blend: PRACTICE_SIMILARITY_BLEND,
            discourse_min_words: DISCOURSE_MIN_WORDS,
            discourse_bonus: DISCOURSE_BONUS,
            clarity_high_threshold: CLARITY_HIGH_THRESHOLD,
            clarity_bonus: CLARITY_BONUS,
            clarity_low_threshold: CLARITY_LOW_THRESHOLD,
            clarity_penalty: CLARITY_PENALTY,
            short_utterance_words: SHORT_UTTERANCE_WORDS,
            short_utterance_cap: SHORT_UTTERANCE_CAP,
            feedback: FeedbackThresholds::default(),
        }
    }
}

/// Cutoffs deciding which signals become strengths or improvements. Every
/// `strong_*` value sits above its `weak_*` counterpart so a signal can
/// never land in both lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    pub strong_pronunciation: f64,
    pub weak_pronunciation: f64,
    pub strong_similarity: f64,
    pub weak_similarity: f64,
    pub strong_recognition: f64,
    pub weak_recognition: f64,
    pub strong_discourse_words: usize,
    pub weak_discourse_words: usize,
    pub strong_vocabulary: f64,
    pub weak_vocabulary: f64,
    /// Unique-word ratios are not judged below this many words.
    pub vocabulary_min_words: usize,
    pub max_entries: usize,
    pub max_flagged_words: usize,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            strong_pronunciation: 0.85,
            weak_pronunciation: 0.65,
            strong_similarity: 0.75,
            weak_similarity: 0.5,
            strong_recognition: 0.8,
            weak_recognition: 0.6,
            strong_discourse_words: 8,
            weak_discourse_words: 5,
            strong_vocabulary: 0.8,
            weak_vocabulary: 0.5,
            vocabulary_min_words: 5,
            max_entries: MAX_FEEDBACK_ENTRIES,
            max_flagged_words: MAX_FLAGGED_WORDS,
        }
    }
}
