use metrics_exporter_prometheus::PrometheusHandle;
use oral_proficiency::assessment::{
    default_sources, AssessmentEngine, ReferenceData, ScoringConfig,
};
use oral_proficiency::config::ResourceConfig;
use oral_proficiency::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolve reference data through the configured source chain. Any invalid
/// table stops the process before it serves requests.
pub(crate) fn load_engine(resources: &ResourceConfig) -> Result<AssessmentEngine, AppError> {
    let sources = default_sources(resources);
    let reference = ReferenceData::load(&sources)?;
    Ok(AssessmentEngine::new(
        Arc::new(reference),
        ScoringConfig::default(),
    ))
}

pub(crate) fn parse_confidence(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a confidence ({err})"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("confidence {value} must be between 0 and 1"));
    }
    Ok(value)
}
