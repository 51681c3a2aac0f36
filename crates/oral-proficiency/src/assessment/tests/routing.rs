use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use super::common::*;

use crate::assessment::router::assess_handler;
use crate::assessment::AssessmentRequest;

#[tokio::test]
async fn assessment_route_returns_the_result_record() {
    let response = post_json(
        router(),
        "/api/v1/assessments",
        json!({
            "transcript": GREETING,
            "words": GREETING
                .split_whitespace()
                .map(|word| json!({ "word": word, "confidence": 0.95 }))
                .collect::<Vec<_>>(),
            "model": "latest_long",
            "duration_secs": 3.4,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;

    assert_eq!(payload["score"], json!(94.5));
    assert_eq!(payload["level"], json!("Advanced High"));
    assert_eq!(payload["mode"], json!("free_speech"));
    assert_eq!(payload["transcribed_text"], json!(GREETING));
    assert!(payload["feedback"].is_string());
    assert!(payload["strengths"].as_array().is_some_and(|items| !items.is_empty()));
    assert!(payload["areas_for_improvement"].is_array());
    assert!(payload.get("similarity").is_none());
    assert!(payload.get("reference_text").is_none());

    let details = payload["criteria_details"]
        .as_object()
        .expect("criteria details object");
    for field in [
        "oral_production",
        "functions",
        "discourse",
        "grammatical_control",
        "vocabulary",
        "pronunciation",
        "communication_strategies",
        "sociocultural_use",
    ] {
        assert!(details[field].is_string(), "missing {field}");
    }
    assert_eq!(details.len(), 8);
}

#[tokio::test]
async fn practice_level_reports_reference_and_similarity() {
    let response = post_json(
        router(),
        "/api/v1/assessments",
        json!({
            "transcript": "Hola, ¿cómo estás? Espero que estés teniendo un buen día.",
            "practice_level": "beginner",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["mode"], json!("practice"));
    assert_eq!(payload["similarity"], json!(100));
    assert_eq!(
        payload["reference_text"],
        json!("Hola, ¿cómo estás? Espero que estés teniendo un buen día.")
    );
}

#[tokio::test]
async fn unknown_practice_level_is_scored_as_free_speech() {
    let response = post_json(
        router(),
        "/api/v1/assessments",
        json!({ "transcript": GREETING, "practice_level": "expert" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["mode"], json!("free_speech"));
}

#[tokio::test]
async fn absent_or_null_transcript_is_a_bad_request() {
    for body in [json!({ "words": [] }), json!({ "transcript": null })] {
        let response = post_json(router(), "/api/v1/assessments", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .is_some_and(|message| message.contains("transcript")));
    }
}

#[tokio::test]
async fn empty_transcript_is_scored_not_rejected() {
    let response = post_json(router(), "/api/v1/assessments", json!({ "transcript": "" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["score"], json!(0.0));
    assert_eq!(payload["level"], json!("Novice Low"));
}

#[tokio::test]
async fn contract_violations_are_unprocessable() {
    let out_of_range = post_json(
        router(),
        "/api/v1/assessments",
        json!({
            "transcript": "hola",
            "words": [{ "word": "hola", "confidence": 1.5 }],
        }),
    )
    .await;
    assert_eq!(out_of_range.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let blank_reference = post_json(
        router(),
        "/api/v1/assessments",
        json!({ "transcript": "hola", "reference_phrase": "" }),
    )
    .await;
    assert_eq!(blank_reference.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn handler_rejects_missing_transcript_directly() {
    let engine = Arc::new(engine());
    let result = assess_handler(State(engine), axum::Json(AssessmentRequest::default())).await;

    let response = match result {
        Ok(_) => panic!("missing transcript must be rejected"),
        Err(error) => error.into_response(),
    };
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn levels_route_lists_the_table() {
    let response = get(router(), "/api/v1/levels").await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    let levels = payload.as_array().expect("level list");
    assert_eq!(levels.len(), 11);
    assert_eq!(
        levels[0],
        json!({ "key": "novice_low", "name": "Novice Low", "min": 0, "max": 54 })
    );
    assert_eq!(levels[10]["key"], json!("distinguished"));
}

#[tokio::test]
async fn references_route_lists_practice_phrases() {
    let response = get(router(), "/api/v1/references").await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    for key in ["beginner", "intermediate", "advanced"] {
        assert!(payload[key].is_string(), "missing {key}");
    }
}
