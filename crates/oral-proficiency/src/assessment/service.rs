use std::sync::Arc;

use serde::Serialize;

use super::domain::{
    AssessmentMode, AssessmentResult, InputError, ProficiencyLevel, RecognitionResult,
};
use super::feedback::{self, Feedback};
use super::reference::ReferenceData;
use super::scoring::{CompositeScorer, ScoreBreakdown, ScoringConfig};
use super::signals::{self, ScoreSignals};
use crate::config::ConfigError;

/// Full outcome of one assessment. `result` is the public record; the rest
/// explains how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub result: AssessmentResult,
    pub level: ProficiencyLevel,
    pub mode: AssessmentMode,
    pub signals: ScoreSignals,
    pub breakdown: ScoreBreakdown,
    pub feedback: Feedback,
}

/// Round to the one decimal shown to learners.
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// Stateless engine running extraction, scoring, classification and
/// feedback against shared reference data.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    reference: Arc<ReferenceData>,
    scorer: CompositeScorer,
}

impl AssessmentEngine {
    pub fn new(reference: Arc<ReferenceData>, config: ScoringConfig) -> Self {
        Self {
            reference,
            scorer: CompositeScorer::new(config),
        }
    }

    /// Engine over the built-in reference data and default thresholds.
    pub fn builtin() -> Result<Self, ConfigError> {
        let reference = ReferenceData::builtin()?;
        Ok(Self::new(Arc::new(reference), ScoringConfig::default()))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &ScoringConfig {
        self.scorer.config()
    }

    /// Pick the mode for a request. An explicit phrase wins over a practice
    /// level; an unknown practice level falls back to free speech.
    pub fn resolve_mode(
        &self,
        reference_phrase: Option<&str>,
        practice_level: Option<&str>,
    ) -> Result<AssessmentMode, InputError> {
        if let Some(phrase) = reference_phrase {
            return AssessmentMode::practice(phrase);
        }

        match practice_level {
            Some(level) => match self.reference.lexicon().reference(level) {
                Some(phrase) => AssessmentMode::practice(phrase),
                None => {
                    tracing::warn!(practice_level = level, "unknown practice level, assessing free speech");
                    Ok(AssessmentMode::FreeSpeech)
                }
            },
            None => Ok(AssessmentMode::FreeSpeech),
        }
    }

    pub fn assess(
        &self,
        recognition: &RecognitionResult,
        mode: &AssessmentMode,
    ) -> Result<Assessment, AssessmentError> {
        recognition.validate()?;
        if let AssessmentMode::Practice { reference } = mode {
            if reference.trim().is_empty() {
                return Err(InputError::EmptyReference.into());
            }
        }

        let criteria = self.reference.criteria();
        let signals = signals::extract(
            recognition,
            mode,
            self.reference.lexicon(),
            self.scorer.config(),
        );
        tracing::debug!(?signals, mode = mode.label(), "signals extracted");

        if !signals.speech_detected {
            tracing::warn!(model = %recognition.model, "no speech detected in transcript");
        } else if !signals.confidence_reported {
            tracing::warn!(model = %recognition.model, "recognizer reported no word confidence");
        }

        let breakdown = self.scorer.breakdown(&signals, mode);
        let score = round_score(breakdown.total);
        let descriptor = criteria.classify(score)?;
        let top_level = criteria
            .highest()
            .is_some_and(|highest| highest.level == descriptor.level);

        let feedback = feedback::generate(
            descriptor,
            top_level,
            &signals,
            score,
            mode,
            &self.scorer.config().feedback,
        );

        tracing::info!(
            score,
            level = descriptor.level.key(),
            mode = mode.label(),
            words = signals.word_count,
            "assessment scored"
        );

        let result = AssessmentResult {
            score,
            level: descriptor.name.clone(),
            feedback: feedback.text.clone(),
            strengths: feedback.strength_texts(),
            areas_for_improvement: feedback.improvement_texts(),
            criteria_details: descriptor.details.clone(),
        };

        Ok(Assessment {
            result,
            level: descriptor.level,
            mode: mode.clone(),
            signals,
            breakdown,
            feedback,
        })
    }
}

/// Error raised for a single assessment request.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Criteria(#[from] ConfigError),
}
