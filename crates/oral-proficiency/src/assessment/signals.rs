use std::collections::HashSet;

use serde::Serialize;

use super::domain::{tokenize, AssessmentMode, RecognitionResult};
use super::lexicon::Lexicon;
use super::scoring::ScoringConfig;
use super::similarity::token_sort_similarity;

/// Intermediate measurements derived from one recognition result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSignals {
    /// False for an empty or punctuation-only transcript.
    pub speech_detected: bool,
    /// Whether the recognizer reported per-word confidences.
    pub confidence_reported: bool,
    pub recognized_ratio: f64,
    pub mean_confidence: f64,
    pub word_count: usize,
    pub unique_ratio: f64,
    /// Practice mode only.
    pub similarity: Option<f64>,
    /// `None` when no dictionary is loaded. Informational, not scored.
    pub dictionary_coverage: Option<f64>,
    /// Words that look mispronounced, in transcript order, deduplicated.
    pub flagged_words: Vec<String>,
}

impl ScoreSignals {
    pub fn silent(mode: &AssessmentMode) -> Self {
        Self {
            speech_detected: false,
            confidence_reported: false,
            recognized_ratio: 0.0,
            mean_confidence: 0.0,
            word_count: 0,
            unique_ratio: 0.0,
            similarity: mode.reference().map(|_| 0.0),
            dictionary_coverage: None,
            flagged_words: Vec::new(),
        }
    }
}

/// Derive [`ScoreSignals`] from recognizer output. Missing metadata degrades
/// the affected signal instead of failing.
pub fn extract(
    recognition: &RecognitionResult,
    mode: &AssessmentMode,
    lexicon: &Lexicon,
    config: &ScoringConfig,
) -> ScoreSignals {
    let tokens = tokenize(&recognition.transcript);
    if tokens.is_empty() {
        return ScoreSignals::silent(mode);
    }

    let confidence_reported = !recognition.words.is_empty();
    let threshold = config.low_confidence_threshold;

    let (recognized_ratio, mean_confidence) = if confidence_reported {
        let total = recognition.words.len() as f64;
        let recognized = recognition
            .words
            .iter()
            .filter(|word| word.confidence >= threshold)
            .count() as f64;
        let sum: f64 = recognition.words.iter().map(|word| word.confidence).sum();
        (recognized / total, sum / total)
    } else {
        (1.0, 0.0)
    };

    let word_count = tokens.len();
    let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    let unique_ratio = distinct.len() as f64 / word_count as f64;

    let similarity = mode
        .reference()
        .map(|reference| token_sort_similarity(&recognition.transcript, reference));

    let dictionary_coverage = lexicon.has_dictionary().then(|| {
        let known = tokens.iter().filter(|word| lexicon.contains(word)).count();
        known as f64 / word_count as f64
    });

    let flagged_words = flag_words(recognition, &tokens, lexicon, threshold);

    ScoreSignals {
        speech_detected: true,
        confidence_reported,
        recognized_ratio,
        mean_confidence,
        word_count,
        unique_ratio,
        similarity,
        dictionary_coverage,
        flagged_words,
    }
}

fn flag_words(
    recognition: &RecognitionResult,
    tokens: &[String],
    lexicon: &Lexicon,
    threshold: f64,
) -> Vec<String> {
    let candidates: Vec<String> = if recognition.words.is_empty() {
        if !lexicon.has_dictionary() {
            return Vec::new();
        }
        tokens
            .iter()
            .filter(|word| !lexicon.contains(word))
            .cloned()
            .collect()
    } else {
        recognition
            .words
            .iter()
            .filter(|word| word.confidence < threshold)
            .flat_map(|word| tokenize(&word.word))
            .collect()
    };

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}
