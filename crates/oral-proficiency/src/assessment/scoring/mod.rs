mod config;
mod rules;

pub use config::*;

use serde::Serialize;

use super::criteria::clamp_score;
use super::domain::AssessmentMode;
use super::signals::ScoreSignals;

/// Weighted terms of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Pronunciation,
    Recognition,
    Complexity,
    Vocabulary,
}

/// Discrete contribution to a composite score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    /// Normalized signal in `[0, 1]`.
    pub signal: f64,
    pub weight: f64,
    /// `signal * weight` scaled to the 0-100 range.
    pub points: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentRule {
    DiscourseBonus,
    ClarityBonus,
    ClarityPenalty,
    ShortUtteranceCap,
}

/// Bonus or penalty applied after the weighted sum. `delta` is the change
/// actually applied once clamping is taken into account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreAdjustment {
    pub rule: AdjustmentRule,
    pub delta: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Weighted sum before adjustments.
    pub base: f64,
    pub components: Vec<ScoreComponent>,
    pub adjustments: Vec<ScoreAdjustment>,
    /// Final composite score in `[0, 100]`, unrounded.
    pub total: f64,
}

/// Stateless scorer that applies a [`ScoringConfig`] to extracted signals.
#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    config: ScoringConfig,
}

impl CompositeScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, signals: &ScoreSignals, mode: &AssessmentMode) -> f64 {
        self.breakdown(signals, mode).total
    }

    pub fn breakdown(&self, signals: &ScoreSignals, mode: &AssessmentMode) -> ScoreBreakdown {
        breakdown(signals, mode, &self.config)
    }
}

/// Composite score for `signals` under `mode`, always within `[0, 100]`.
pub fn score(signals: &ScoreSignals, mode: &AssessmentMode, config: &ScoringConfig) -> f64 {
    breakdown(signals, mode, config).total
}

fn breakdown(
    signals: &ScoreSignals,
    mode: &AssessmentMode,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let components = rules::weighted_components(signals, mode, config);
    let base = clamp_score(components.iter().map(|component| component.points).sum());
    let (adjustments, total) = rules::apply_adjustments(base, signals, config);

    ScoreBreakdown {
        base,
        components,
        adjustments,
        total,
    }
}
