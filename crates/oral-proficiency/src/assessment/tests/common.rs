use std::io;
use std::sync::Arc;

use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use crate::assessment::resources::{Resource, ResourceSource, BUILTIN_CRITERIA};
use crate::assessment::{
    assessment_router, AssessmentEngine, RecognitionResult, ReferenceData, ScoreSignals,
};
use crate::config::ConfigError;

pub(super) const GREETING: &str = "Hola buenos días, me llamo Ana y soy de México";
pub(super) const BEGINNER_SPOKEN: &str =
    "hola cómo estás espero que estés teniendo un buen día";

pub(super) fn engine() -> AssessmentEngine {
    AssessmentEngine::builtin().expect("builtin reference data loads")
}

pub(super) fn spoken(transcript: &str, confidence: f64) -> RecognitionResult {
    let mut recognition = RecognitionResult::uniform(transcript, confidence);
    recognition.model = "latest_long".to_string();
    recognition.duration_secs = 3.2;
    recognition
}

/// Forty distinct words, enough to saturate every length-based signal.
pub(super) fn long_distinct_transcript() -> String {
    (0..40)
        .map(|index| format!("palabra{index}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(super) fn signals(
    recognized_ratio: f64,
    mean_confidence: f64,
    word_count: usize,
    unique_ratio: f64,
) -> ScoreSignals {
    ScoreSignals {
        speech_detected: word_count > 0,
        confidence_reported: true,
        recognized_ratio,
        mean_confidence,
        word_count,
        unique_ratio,
        similarity: None,
        dictionary_coverage: None,
        flagged_words: Vec::new(),
    }
}

pub(super) fn builtin_criteria() -> Value {
    serde_json::from_str(BUILTIN_CRITERIA).expect("builtin criteria is valid json")
}

pub(super) fn set_range(criteria: &mut Value, level: &str, min: i64, max: i64) {
    criteria[level]["score_range"] = serde_json::json!([min, max]);
}

pub(super) fn remove_field(criteria: &mut Value, level: &str, field: &str) {
    criteria[level]
        .as_object_mut()
        .expect("level is an object")
        .remove(field);
}

/// In-memory source holding whichever resources it was given.
#[derive(Default)]
pub(super) struct StaticSource {
    pub criteria: Option<String>,
    pub dictionary: Option<String>,
    pub references: Option<String>,
}

impl ResourceSource for StaticSource {
    fn describe(&self) -> String {
        "static fixture".to_string()
    }

    fn fetch(&self, resource: Resource) -> Result<Option<String>, io::Error> {
        Ok(match resource {
            Resource::Criteria => self.criteria.clone(),
            Resource::Dictionary => self.dictionary.clone(),
            Resource::References => self.references.clone(),
        })
    }
}

pub(super) struct FailingSource;

impl ResourceSource for FailingSource {
    fn describe(&self) -> String {
        "failing bucket".to_string()
    }

    fn fetch(&self, _resource: Resource) -> Result<Option<String>, io::Error> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"))
    }
}

pub(super) fn load_criteria(criteria: &Value) -> Result<ReferenceData, ConfigError> {
    let sources: Vec<Box<dyn ResourceSource>> = vec![Box::new(StaticSource {
        criteria: Some(criteria.to_string()),
        dictionary: Some("hola 100\n".to_string()),
        references: Some("{}".to_string()),
    })];
    ReferenceData::load(&sources)
}

pub(super) fn router() -> axum::Router {
    assessment_router(Arc::new(engine()))
}

pub(super) async fn post_json(router: axum::Router, uri: &str, payload: Value) -> Response {
    router
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes")
}

pub(super) async fn get(router: axum::Router, uri: &str) -> Response {
    router
        .oneshot(
            Request::get(uri)
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
