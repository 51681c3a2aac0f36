use serde::{Deserialize, Serialize};

/// The eleven ACTFL proficiency levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    NoviceLow,
    NoviceMid,
    NoviceHigh,
    IntermediateLow,
    IntermediateMid,
    IntermediateHigh,
    AdvancedLow,
    AdvancedMid,
    AdvancedHigh,
    Superior,
    Distinguished,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 11] = [
        ProficiencyLevel::NoviceLow,
        ProficiencyLevel::NoviceMid,
        ProficiencyLevel::NoviceHigh,
        ProficiencyLevel::IntermediateLow,
        ProficiencyLevel::IntermediateMid,
        ProficiencyLevel::IntermediateHigh,
        ProficiencyLevel::AdvancedLow,
        ProficiencyLevel::AdvancedMid,
        ProficiencyLevel::AdvancedHigh,
        ProficiencyLevel::Superior,
        ProficiencyLevel::Distinguished,
    ];

    /// Key used in the criteria configuration.
    pub const fn key(self) -> &'static str {
        match self {
            ProficiencyLevel::NoviceLow => "novice_low",
            ProficiencyLevel::NoviceMid => "novice_mid",
            ProficiencyLevel::NoviceHigh => "novice_high",
            ProficiencyLevel::IntermediateLow => "intermediate_low",
            ProficiencyLevel::IntermediateMid => "intermediate_mid",
            ProficiencyLevel::IntermediateHigh => "intermediate_high",
            ProficiencyLevel::AdvancedLow => "advanced_low",
            ProficiencyLevel::AdvancedMid => "advanced_mid",
            ProficiencyLevel::AdvancedHigh => "advanced_high",
            ProficiencyLevel::Superior => "superior",
            ProficiencyLevel::Distinguished => "distinguished",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProficiencyLevel::NoviceLow => "Novice Low",
            ProficiencyLevel::NoviceMid => "Novice Mid",
            ProficiencyLevel::NoviceHigh => "Novice High",
            ProficiencyLevel::IntermediateLow => "Intermediate Low",
            ProficiencyLevel::IntermediateMid => "Intermediate Mid",
            ProficiencyLevel::IntermediateHigh => "Intermediate High",
            ProficiencyLevel::AdvancedLow => "Advanced Low",
            ProficiencyLevel::AdvancedMid => "Advanced Mid",
            ProficiencyLevel::AdvancedHigh => "Advanced High",
            ProficiencyLevel::Superior => "Superior",
            ProficiencyLevel::Distinguished => "Distinguished",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.key().eq_ignore_ascii_case(key))
    }

    pub const fn band(self) -> ProficiencyBand {
        match self {
            ProficiencyLevel::NoviceLow
            | ProficiencyLevel::NoviceMid
            | ProficiencyLevel::NoviceHigh => ProficiencyBand::Novice,
            ProficiencyLevel::IntermediateLow
            | ProficiencyLevel::IntermediateMid
            | ProficiencyLevel::IntermediateHigh => ProficiencyBand::Intermediate,
            ProficiencyLevel::AdvancedLow
            | ProficiencyLevel::AdvancedMid
            | ProficiencyLevel::AdvancedHigh => ProficiencyBand::Advanced,
            ProficiencyLevel::Superior => ProficiencyBand::Superior,
            ProficiencyLevel::Distinguished => ProficiencyBand::Distinguished,
        }
    }
}

/// Major ACTFL bands grouping the sublevels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyBand {
    Novice,
    Intermediate,
    Advanced,
    Superior,
    Distinguished,
}

/// A recognized word and the engine's confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordConfidence {
    pub word: String,
    pub confidence: f64,
}

/// Output of the upstream speech recognizer, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub transcript: String,
    /// Empty when the engine does not report word-level confidence.
    #[serde(default)]
    pub words: Vec<WordConfidence>,
    /// Recognition model tag, informational only.
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub duration_secs: f64,
}

impl RecognitionResult {
    /// Transcript without word-level confidence metadata.
    pub fn transcript_only(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            words: Vec::new(),
            model: String::new(),
            duration_secs: 0.0,
        }
    }

    /// Pairs every token of the transcript with the same confidence.
    pub fn uniform(transcript: impl Into<String>, confidence: f64) -> Self {
        let transcript = transcript.into();
        let words = tokenize(&transcript)
            .into_iter()
            .map(|word| WordConfidence { word, confidence })
            .collect();
        Self {
            transcript,
            words,
            model: String::new(),
            duration_secs: 0.0,
        }
    }

    /// Pairs transcript tokens with per-word confidences. A single value is
    /// applied to every token.
    pub fn with_confidences(
        transcript: impl Into<String>,
        confidences: &[f64],
    ) -> Result<Self, InputError> {
        let transcript = transcript.into();
        match confidences {
            [] => Ok(Self::transcript_only(transcript)),
            [single] => Ok(Self::uniform(transcript, *single)),
            many => {
                let tokens = tokenize(&transcript);
                if tokens.len() != many.len() {
                    return Err(InputError::ConfidenceCountMismatch {
                        words: tokens.len(),
                        confidences: many.len(),
                    });
                }
                let words = tokens
                    .into_iter()
                    .zip(many.iter().copied())
                    .map(|(word, confidence)| WordConfidence { word, confidence })
                    .collect();
                Ok(Self {
                    transcript,
                    words,
                    model: String::new(),
                    duration_secs: 0.0,
                })
            }
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if let Some(word) = self
            .words
            .iter()
            .find(|word| !word.confidence.is_finite() || !(0.0..=1.0).contains(&word.confidence))
        {
            return Err(InputError::ConfidenceOutOfRange {
                word: word.word.clone(),
                confidence: word.confidence,
            });
        }

        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(InputError::InvalidDuration(self.duration_secs));
        }

        Ok(())
    }
}

/// Lowercased word forms with surrounding punctuation removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Assessment mode, fixed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AssessmentMode {
    Practice { reference: String },
    FreeSpeech,
}

impl AssessmentMode {
    pub fn practice(reference: impl Into<String>) -> Result<Self, InputError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(InputError::EmptyReference);
        }
        Ok(Self::Practice { reference })
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            AssessmentMode::Practice { reference } => Some(reference),
            AssessmentMode::FreeSpeech => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            AssessmentMode::Practice { .. } => "practice",
            AssessmentMode::FreeSpeech => "free_speech",
        }
    }
}

/// The eight descriptive dimensions of a proficiency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaDetails {
    pub oral_production: String,
    pub functions: String,
    pub discourse: String,
    pub grammatical_control: String,
    pub vocabulary: String,
    pub pronunciation: String,
    pub communication_strategies: String,
    pub sociocultural_use: String,
}

/// Response record returned to callers. Field names are part of the public
/// JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub score: f64,
    pub level: String,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub criteria_details: CriteriaDetails,
}

/// Request rejected before scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("recognition result is missing the transcript field")]
    MissingTranscript,
    #[error("confidence {confidence} for word '{word}' is outside [0, 1]")]
    ConfidenceOutOfRange { word: String, confidence: f64 },
    #[error("duration must be a non-negative number of seconds (found {0})")]
    InvalidDuration(f64),
    #[error("practice mode requires a non-empty reference phrase")]
    EmptyReference,
    #[error("{confidences} confidences supplied for {words} words")]
    ConfidenceCountMismatch { words: usize, confidences: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_spanish_punctuation() {
        assert_eq!(
            tokenize("¡Hola! ¿Cómo estás, Ana?"),
            vec!["hola", "cómo", "estás", "ana"]
        );
        assert!(tokenize("  ... ¿? ").is_empty());
    }

    #[test]
    fn level_keys_round_trip() {
        for level in ProficiencyLevel::ALL {
            assert_eq!(ProficiencyLevel::from_key(level.key()), Some(level));
        }
        assert_eq!(ProficiencyLevel::from_key("fluent"), None);
    }

    #[test]
    fn validate_rejects_out_of_range_confidence() {
        let mut recognition = RecognitionResult::uniform("hola amigo", 0.9);
        recognition.words[1].confidence = 1.2;

        match recognition.validate() {
            Err(InputError::ConfidenceOutOfRange { word, .. }) => assert_eq!(word, "amigo"),
            other => panic!("expected range error, got {other:?}"),
        }
    }

    #[test]
    fn with_confidences_requires_matching_counts() {
        let err = RecognitionResult::with_confidences("uno dos tres", &[0.9, 0.8])
            .expect_err("mismatch rejected");
        assert_eq!(
            err,
            InputError::ConfidenceCountMismatch {
                words: 3,
                confidences: 2
            }
        );

        let single = RecognitionResult::with_confidences("uno dos tres", &[0.7])
            .expect("single value applies to all words");
        assert_eq!(single.words.len(), 3);
    }

    #[test]
    fn practice_mode_requires_reference() {
        assert_eq!(
            AssessmentMode::practice("   "),
            Err(InputError::EmptyReference)
        );
        assert_eq!(
            AssessmentMode::practice("Hola").map(|mode| mode.label()),
            Ok("practice")
        );
    }
}
