//! Oral proficiency assessment: signal extraction, composite scoring, ACTFL
//! level classification and learner feedback.
//!
//! Reference data (criteria table, word list, practice phrases) is loaded
//! once into a [`ReferenceData`] and shared read-only by every request.

pub mod criteria;
pub mod domain;
pub mod feedback;
pub mod lexicon;
pub mod recognition;
pub mod reference;
pub mod resources;
pub mod router;
pub mod scoring;
pub mod service;
pub mod signals;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use criteria::{CriteriaStore, LevelDescriptor, ScoreRange, MAX_SCORE, MIN_SCORE};
pub use domain::{
    tokenize, AssessmentMode, AssessmentResult, CriteriaDetails, InputError, ProficiencyBand,
    ProficiencyLevel, RecognitionResult, WordConfidence,
};
pub use feedback::{Feedback, FeedbackDimension, FeedbackEntry};
pub use lexicon::Lexicon;
pub use recognition::{RecognitionAttempt, RecognitionError, RecognizerChain, SpeechRecognizer};
pub use reference::ReferenceData;
pub use resources::{default_sources, Builtin, ConfiguredPaths, Directory, Resource, ResourceSource};
pub use router::{assessment_router, AssessmentRequest, AssessmentResponse, LevelSummary};
pub use scoring::{
    AdjustmentRule, CompositeScorer, FeedbackThresholds, ScoreAdjustment, ScoreBreakdown,
    ScoreComponent, ScoreFactor, ScoringConfig,
};
pub use service::{round_score, Assessment, AssessmentEngine, AssessmentError};
pub use signals::ScoreSignals;
