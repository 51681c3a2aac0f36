use std::collections::HashSet;

use super::common::*;

use crate::assessment::feedback::NO_SPEECH_FEEDBACK;
use crate::assessment::{
    AssessmentMode, FeedbackDimension, ProficiencyBand, ProficiencyLevel, RecognitionResult,
};

#[test]
fn empty_transcript_reports_no_speech_with_a_strength() {
    let assessment = engine()
        .assess(&spoken("", 0.0), &AssessmentMode::FreeSpeech)
        .expect("empty transcript is not an error");

    assert_eq!(assessment.result.feedback, NO_SPEECH_FEEDBACK);
    assert!(assessment.result.feedback.contains("couldn't detect your speech"));
    assert!(!assessment.result.strengths.is_empty());
    assert!(!assessment.result.areas_for_improvement.is_empty());
    assert_eq!(assessment.result.level, "Novice Low");
}

#[test]
fn greeting_lands_in_intermediate_or_advanced_with_clarity_praise() {
    let assessment = engine()
        .assess(&spoken(GREETING, 0.95), &AssessmentMode::FreeSpeech)
        .expect("assessment succeeds");

    assert_eq!(assessment.signals.word_count, 10);
    assert_eq!(assessment.signals.recognized_ratio, 1.0);
    assert!(assessment.result.score >= 65.0);
    assert!(matches!(
        assessment.level.band(),
        ProficiencyBand::Intermediate | ProficiencyBand::Advanced
    ));
    assert!(assessment
        .result
        .strengths
        .iter()
        .any(|strength| strength.to_lowercase().contains("clarity")));
    assert_eq!(assessment.result.level, "Advanced High");
}

#[test]
fn strengths_and_improvements_never_overlap() {
    let engine = engine();
    let transcripts = [
        GREETING,
        "sí sí sí sí sí sí sí sí sí",
        "hola",
        "quiero comer pan con queso hoy por la tarde con mi familia",
        BEGINNER_SPOKEN,
    ];
    let confidences = [0.1, 0.45, 0.6, 0.7, 0.9, 1.0];
    let modes = [
        AssessmentMode::FreeSpeech,
        AssessmentMode::practice("Hola, ¿cómo estás? Espero que estés teniendo un buen día.")
            .expect("reference given"),
        AssessmentMode::practice("Los bomberos llegaron rápidamente al lugar del incendio.")
            .expect("reference given"),
    ];

    for transcript in transcripts {
        for confidence in confidences {
            for mode in &modes {
                let assessment = engine
                    .assess(&spoken(transcript, confidence), mode)
                    .expect("assessment succeeds");
                let feedback = &assessment.feedback;

                let praised: HashSet<FeedbackDimension> =
                    feedback.strengths.iter().map(|entry| entry.dimension).collect();
                assert!(
                    feedback
                        .improvements
                        .iter()
                        .all(|entry| !praised.contains(&entry.dimension)),
                    "{transcript} @ {confidence}: {feedback:?}"
                );
                for strength in &assessment.result.strengths {
                    assert!(!assessment.result.areas_for_improvement.contains(strength));
                }

                assert!(!assessment.result.strengths.is_empty());
                assert!(assessment.result.strengths.len() <= 3);
                assert!(assessment.result.areas_for_improvement.len() <= 3);
                if assessment.level != ProficiencyLevel::Distinguished {
                    assert!(
                        !assessment.result.areas_for_improvement.is_empty(),
                        "{transcript} @ {confidence} has no improvements"
                    );
                }
            }
        }
    }
}

#[test]
fn top_level_may_have_no_improvements() {
    let assessment = engine()
        .assess(&spoken(&long_distinct_transcript(), 1.0), &AssessmentMode::FreeSpeech)
        .expect("assessment succeeds");

    assert_eq!(assessment.result.score, 100.0);
    assert_eq!(assessment.level, ProficiencyLevel::Distinguished);
    assert!(assessment.result.areas_for_improvement.is_empty());
    assert!(assessment.result.feedback.starts_with("Distinguished:"));
}

#[test]
fn flagged_words_are_listed_up_to_three() {
    let recognition = RecognitionResult::with_confidences(
        "quiero comer pan con queso hoy",
        &[0.9, 0.3, 0.2, 0.4, 0.1, 0.95],
    )
    .expect("counts match");
    let assessment = engine()
        .assess(&recognition, &AssessmentMode::FreeSpeech)
        .expect("assessment succeeds");

    assert_eq!(
        assessment.signals.flagged_words,
        vec!["comer", "pan", "con", "queso"]
    );
    let targeted = assessment
        .result
        .areas_for_improvement
        .iter()
        .find(|entry| entry.starts_with("Specifically target the pronunciation of:"))
        .expect("flagged words reported");
    assert!(targeted.contains("comer, pan, con to improve"));
    assert!(!targeted.contains("queso"));
}

#[test]
fn practice_feedback_tracks_reference_similarity() {
    let engine = engine();

    let close = engine
        .assess(
            &spoken(BEGINNER_SPOKEN, 0.95),
            &engine
                .resolve_mode(None, Some("beginner"))
                .expect("beginner phrase exists"),
        )
        .expect("assessment succeeds");
    assert!(close
        .result
        .strengths
        .contains(&"Good reproduction of the reference phrase".to_string()));
    assert!(close.result.feedback.starts_with("Superior performance (96.0/100)"));

    let distant = engine
        .assess(
            &spoken("hola buenos días", 0.9),
            &engine
                .resolve_mode(None, Some("intermediate"))
                .expect("intermediate phrase exists"),
        )
        .expect("assessment succeeds");
    assert!(distant
        .result
        .areas_for_improvement
        .contains(&"Your response differed significantly from the reference phrase".to_string()));
}

#[test]
fn missing_confidence_skips_pronunciation_praise() {
    let assessment = engine()
        .assess(
            &RecognitionResult::transcript_only(GREETING),
            &AssessmentMode::FreeSpeech,
        )
        .expect("assessment succeeds");

    assert!(!assessment.signals.confidence_reported);
    assert!(assessment
        .feedback
        .strengths
        .iter()
        .all(|entry| entry.dimension != FeedbackDimension::Pronunciation));
    assert!(!assessment.result.strengths.is_empty());
}
