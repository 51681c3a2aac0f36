use super::super::domain::AssessmentMode;
use super::super::signals::ScoreSignals;
use super::config::ScoringConfig;
use super::{AdjustmentRule, ScoreAdjustment, ScoreComponent, ScoreFactor};
use crate::assessment::criteria::clamp_score;

/// Normalize a signal to `[0, 1]`; non-finite values count as zero.
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub(crate) fn pronunciation_proxy(
    signals: &ScoreSignals,
    mode: &AssessmentMode,
    config: &ScoringConfig,
) -> f64 {
    let confidence = unit(signals.mean_confidence);
    match mode {
        AssessmentMode::FreeSpeech => confidence,
        AssessmentMode::Practice { .. } => {
            let blend = unit(config.practice_similarity_blend);
            let similarity = unit(signals.similarity.unwrap_or(0.0));
            (1.0 - blend) * confidence + blend * similarity
        }
    }
}

pub(crate) fn weighted_components(
    signals: &ScoreSignals,
    mode: &AssessmentMode,
    config: &ScoringConfig,
) -> Vec<ScoreComponent> {
    let mut components = Vec::with_capacity(4);

    let pronunciation = pronunciation_proxy(signals, mode, config);
    let notes = match (mode, signals.similarity) {
        (AssessmentMode::Practice { .. }, Some(similarity)) => format!(
            "mean confidence {:.2} blended with reference similarity {:.2}",
            unit(signals.mean_confidence),
            unit(similarity)
        ),
        _ if !signals.confidence_reported => "no word confidence reported".to_string(),
        _ => format!("mean confidence {:.2}", unit(signals.mean_confidence)),
    };
    components.push(component(
        ScoreFactor::Pronunciation,
        pronunciation,
        config.pronunciation_weight,
        notes,
    ));

    let recognized = unit(signals.recognized_ratio);
    components.push(component(
        ScoreFactor::Recognition,
        recognized,
        config.recognition_weight,
        format!("{:.0}% of words recognized", recognized * 100.0),
    ));

    let saturation = config.complexity_saturation_words.max(1);
    let complexity = unit(signals.word_count.min(saturation) as f64 / saturation as f64);
    components.push(component(
        ScoreFactor::Complexity,
        complexity,
        config.complexity_weight,
        format!("{} words (saturates at {saturation})", signals.word_count),
    ));

    let vocabulary = unit(signals.unique_ratio);
    components.push(component(
        ScoreFactor::Vocabulary,
        vocabulary,
        config.vocabulary_weight,
        format!("unique-word ratio {vocabulary:.2}"),
    ));

    components
}

fn component(factor: ScoreFactor, signal: f64, weight: f64, notes: String) -> ScoreComponent {
    ScoreComponent {
        factor,
        signal,
        weight,
        points: signal * weight * 100.0,
        notes,
    }
}

/// Apply the post-weighting rules in order, clamping after each step.
pub(crate) fn apply_adjustments(
    base: f64,
    signals: &ScoreSignals,
    config: &ScoringConfig,
) -> (Vec<ScoreAdjustment>, f64) {
    let mut adjustments = Vec::new();
    let mut score = clamp_score(base);
    let recognized = unit(signals.recognized_ratio);

    let mut adjust = |rule: AdjustmentRule, target: f64, notes: String, score: &mut f64| {
        let next = clamp_score(target);
        adjustments.push(ScoreAdjustment {
            rule,
            delta: next - *score,
            notes,
        });
        *score = next;
    };

    if signals.word_count >= config.discourse_min_words {
        let bonus = config.discourse_bonus * unit(signals.unique_ratio);
        adjust(
            AdjustmentRule::DiscourseBonus,
            score + bonus,
            format!(
                "{} words at or above {}, scaled by unique-word ratio",
                signals.word_count, config.discourse_min_words
            ),
            &mut score,
        );
    }

    if recognized >= config.clarity_high_threshold {
        adjust(
            AdjustmentRule::ClarityBonus,
            score + config.clarity_bonus,
            format!(
                "recognized ratio {recognized:.2} at or above {:.2}",
                config.clarity_high_threshold
            ),
            &mut score,
        );
    } else if recognized < config.clarity_low_threshold {
        adjust(
            AdjustmentRule::ClarityPenalty,
            score - config.clarity_penalty,
            format!(
                "recognized ratio {recognized:.2} below {:.2}",
                config.clarity_low_threshold
            ),
            &mut score,
        );
    }

    if signals.word_count < config.short_utterance_words && score > config.short_utterance_cap {
        adjust(
            AdjustmentRule::ShortUtteranceCap,
            config.short_utterance_cap,
            format!(
                "{} words below minimum of {}",
                signals.word_count, config.short_utterance_words
            ),
            &mut score,
        );
    }

    (adjustments, score)
}
