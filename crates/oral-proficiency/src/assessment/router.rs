use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentResult, InputError, RecognitionResult, WordConfidence};
use super::service::{Assessment, AssessmentEngine};
use crate::error::AppError;

/// Router builder exposing the assessment endpoints.
pub fn assessment_router(engine: Arc<AssessmentEngine>) -> Router {
    Router::new()
        .route("/api/v1/assessments", post(assess_handler))
        .route("/api/v1/references", get(references_handler))
        .route("/api/v1/levels", get(levels_handler))
        .with_state(engine)
}

/// Recognition output plus the optional practice target.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentRequest {
    /// `None` when the field is absent or `null`, which is rejected.
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub words: Vec<WordConfidence>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub duration_secs: f64,
    #[serde(default)]
    pub reference_phrase: Option<String>,
    #[serde(default)]
    pub practice_level: Option<String>,
}

impl AssessmentRequest {
    pub fn recognition(&self) -> Result<RecognitionResult, InputError> {
        let transcript = self
            .transcript
            .clone()
            .ok_or(InputError::MissingTranscript)?;
        Ok(RecognitionResult {
            transcript,
            words: self.words.clone(),
            model: self.model.clone(),
            duration_secs: self.duration_secs,
        })
    }
}

/// Assessment record as returned over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub result: AssessmentResult,
    pub transcribed_text: String,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_text: Option<String>,
    /// Reference similarity as a whole percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<u8>,
}

impl AssessmentResponse {
    pub fn new(assessment: Assessment, transcript: String) -> Self {
        let similarity = assessment
            .signals
            .similarity
            .map(|similarity| (similarity.clamp(0.0, 1.0) * 100.0).round() as u8);
        Self {
            mode: assessment.mode.label(),
            reference_text: assessment.mode.reference().map(str::to_string),
            similarity,
            transcribed_text: transcript,
            result: assessment.result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub key: String,
    pub name: String,
    pub min: u8,
    pub max: u8,
}

pub(crate) async fn assess_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let recognition = request.recognition()?;
    let mode = engine.resolve_mode(
        request.reference_phrase.as_deref(),
        request.practice_level.as_deref(),
    )?;
    let assessment = engine.assess(&recognition, &mode)?;

    Ok(Json(AssessmentResponse::new(
        assessment,
        recognition.transcript,
    )))
}

pub(crate) async fn references_handler(
    State(engine): State<Arc<AssessmentEngine>>,
) -> Json<BTreeMap<String, String>> {
    Json(engine.reference().lexicon().references().clone())
}

pub(crate) async fn levels_handler(
    State(engine): State<Arc<AssessmentEngine>>,
) -> Json<Vec<LevelSummary>> {
    let levels = engine
        .reference()
        .criteria()
        .levels()
        .iter()
        .map(|descriptor| LevelSummary {
            key: descriptor.level.key().to_string(),
            name: descriptor.name.clone(),
            min: descriptor.score_range.min,
            max: descriptor.score_range.max,
        })
        .collect();
    Json(levels)
}
