use std::collections::HashSet;

use serde::Serialize;

use super::criteria::LevelDescriptor;
use super::domain::{AssessmentMode, ProficiencyBand};
use super::scoring::FeedbackThresholds;
use super::signals::ScoreSignals;

pub const NO_SPEECH_FEEDBACK: &str = "We couldn't detect your speech. Please ensure your microphone is working and try speaking a bit louder. Keep going!";

/// The signal a feedback entry talks about. A dimension never appears in
/// both the strengths and the improvements of one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackDimension {
    Pronunciation,
    ReferencePhrase,
    Clarity,
    Discourse,
    Vocabulary,
    Effort,
    Setup,
    Progression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackEntry {
    pub dimension: FeedbackDimension,
    pub text: String,
}

impl FeedbackEntry {
    fn new(dimension: FeedbackDimension, text: impl Into<String>) -> Self {
        Self {
            dimension,
            text: text.into(),
        }
    }
}

/// Rendered learner feedback, strongest-contributing entries first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub text: String,
    pub strengths: Vec<FeedbackEntry>,
    pub improvements: Vec<FeedbackEntry>,
}

impl Feedback {
    pub fn strength_texts(&self) -> Vec<String> {
        self.strengths.iter().map(|entry| entry.text.clone()).collect()
    }

    pub fn improvement_texts(&self) -> Vec<String> {
        self.improvements
            .iter()
            .map(|entry| entry.text.clone())
            .collect()
    }
}

enum Verdict {
    Strength(FeedbackEntry),
    Improvement(FeedbackEntry),
}

/// Substitute `{score}` and `{level}` placeholders; other text is kept as is.
pub fn render_template(template: &str, level_name: &str, score: f64) -> String {
    template
        .replace("{score}", &format!("{score:.1}"))
        .replace("{level}", level_name)
}

/// Build feedback for an assessment classified at `descriptor`.
///
/// `top_level` marks the highest configured level, the only one allowed to
/// come back without improvements.
pub fn generate(
    descriptor: &LevelDescriptor,
    top_level: bool,
    signals: &ScoreSignals,
    score: f64,
    mode: &AssessmentMode,
    thresholds: &FeedbackThresholds,
) -> Feedback {
    let limit = thresholds.max_entries.max(1);

    if !signals.speech_detected {
        let mut improvements = vec![
            FeedbackEntry::new(
                FeedbackDimension::Setup,
                "Check microphone connection and reduce background noise",
            ),
            FeedbackEntry::new(
                FeedbackDimension::Setup,
                "Speak clearly and at a moderate pace",
            ),
            FeedbackEntry::new(
                FeedbackDimension::Setup,
                "Try the beginner practice phrase first to test your setup",
            ),
        ];
        improvements.truncate(limit);
        return Feedback {
            text: NO_SPEECH_FEEDBACK.to_string(),
            strengths: vec![FeedbackEntry::new(
                FeedbackDimension::Effort,
                "Attempt to speak in Spanish",
            )],
            improvements,
        };
    }

    let verdicts = collect_verdicts(signals, mode, thresholds);

    let mut strengths: Vec<FeedbackEntry> = Vec::new();
    let mut improvements: Vec<FeedbackEntry> = Vec::new();
    for verdict in verdicts {
        match verdict {
            Verdict::Strength(entry) => strengths.push(entry),
            Verdict::Improvement(entry) => improvements.push(entry),
        }
    }

    let praised: HashSet<FeedbackDimension> =
        strengths.iter().map(|entry| entry.dimension).collect();
    improvements.retain(|entry| !praised.contains(&entry.dimension));

    if strengths.is_empty() {
        strengths.push(FeedbackEntry::new(
            FeedbackDimension::Effort,
            "Initial attempts at speech were successfully recognized.",
        ));
    }
    if improvements.is_empty() && !top_level {
        improvements.push(FeedbackEntry::new(
            FeedbackDimension::Progression,
            progression_hint(descriptor.level.band()),
        ));
    }

    strengths.truncate(limit);
    improvements.truncate(limit);

    Feedback {
        text: render_template(&descriptor.feedback_template, &descriptor.name, score),
        strengths,
        improvements,
    }
}

/// Candidate entries in scoring-weight order.
fn collect_verdicts(
    signals: &ScoreSignals,
    mode: &AssessmentMode,
    thresholds: &FeedbackThresholds,
) -> Vec<Verdict> {
    use FeedbackDimension as Dim;

    let mut verdicts = Vec::new();

    if signals.confidence_reported {
        let confidence = signals.mean_confidence;
        if confidence >= thresholds.strong_pronunciation {
            verdicts.push(Verdict::Strength(FeedbackEntry::new(
                Dim::Pronunciation,
                "Excellent, near-native pronunciation accuracy.",
            )));
        } else if confidence < thresholds.weak_pronunciation {
            verdicts.push(Verdict::Improvement(FeedbackEntry::new(
                Dim::Pronunciation,
                "Work on pronunciation accuracy; many words were recognized with low confidence.",
            )));
        }
    }

    if !signals.flagged_words.is_empty() {
        let flagged: Vec<&str> = signals
            .flagged_words
            .iter()
            .take(thresholds.max_flagged_words.max(1))
            .map(String::as_str)
            .collect();
        verdicts.push(Verdict::Improvement(FeedbackEntry::new(
            Dim::Pronunciation,
            format!(
                "Specifically target the pronunciation of: {} to improve clarity and reduce ambiguity.",
                flagged.join(", ")
            ),
        )));
    }

    if let (AssessmentMode::Practice { .. }, Some(similarity)) = (mode, signals.similarity) {
        if similarity >= thresholds.strong_similarity {
            verdicts.push(Verdict::Strength(FeedbackEntry::new(
                Dim::ReferencePhrase,
                "Good reproduction of the reference phrase",
            )));
        } else if similarity < thresholds.weak_similarity {
            verdicts.push(Verdict::Improvement(FeedbackEntry::new(
                Dim::ReferencePhrase,
                "Your response differed significantly from the reference phrase",
            )));
        } else {
            verdicts.push(Verdict::Improvement(FeedbackEntry::new(
                Dim::ReferencePhrase,
                "Try to follow the reference phrase more closely",
            )));
        }
    }

    let recognized = signals.recognized_ratio;
    if recognized >= thresholds.strong_recognition {
        verdicts.push(Verdict::Strength(FeedbackEntry::new(
            Dim::Clarity,
            format!(
                "Excellent clarity: {:.0}% of words were clearly recognized.",
                recognized.clamp(0.0, 1.0) * 100.0
            ),
        )));
    } else if recognized < thresholds.weak_recognition {
        verdicts.push(Verdict::Improvement(FeedbackEntry::new(
            Dim::Clarity,
            "Improve clarity: articulate each word fully so it can be recognized.",
        )));
    }

    if signals.word_count >= thresholds.strong_discourse_words {
        verdicts.push(Verdict::Strength(FeedbackEntry::new(
            Dim::Discourse,
            "Good use of connected discourse across multiple sentences.",
        )));
    } else if signals.word_count < thresholds.weak_discourse_words {
        verdicts.push(Verdict::Improvement(FeedbackEntry::new(
            Dim::Discourse,
            "Build longer responses by connecting several simple sentences.",
        )));
    }

    if signals.word_count >= thresholds.vocabulary_min_words {
        if signals.unique_ratio >= thresholds.strong_vocabulary {
            verdicts.push(Verdict::Strength(FeedbackEntry::new(
                Dim::Vocabulary,
                "Varied vocabulary with little repetition.",
            )));
        } else if signals.unique_ratio < thresholds.weak_vocabulary {
            verdicts.push(Verdict::Improvement(FeedbackEntry::new(
                Dim::Vocabulary,
                "Vary your vocabulary; several words were repeated.",
            )));
        }
    }

    verdicts
}

fn progression_hint(band: ProficiencyBand) -> &'static str {
    match band {
        ProficiencyBand::Novice => {
            "Prioritize basic needs and personal information; focus on highly frequent words and memorized phrases."
        }
        ProficiencyBand::Intermediate => {
            "Work on connecting simple sentences into paragraphs and describing events across major time frames."
        }
        ProficiencyBand::Advanced => {
            "Practice handling unexpected complications and refining subtle intonation for native-like fluency."
        }
        ProficiencyBand::Superior | ProficiencyBand::Distinguished => {
            "Maintain high-level practice by engaging in complex social situations and abstract topics."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_placeholders_are_substituted() {
        let rendered = render_template("{level} at {score}/100", "Superior", 96.04);
        assert_eq!(rendered, "Superior at 96.0/100");
        assert_eq!(render_template("Static prose.", "Superior", 96.0), "Static prose.");
    }

    #[test]
    fn every_band_has_a_progression_hint() {
        for band in [
            ProficiencyBand::Novice,
            ProficiencyBand::Intermediate,
            ProficiencyBand::Advanced,
            ProficiencyBand::Superior,
        ] {
            assert!(!progression_hint(band).is_empty());
        }
    }
}
