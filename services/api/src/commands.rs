use crate::infra::{load_engine, parse_confidence};
use clap::Args;
use oral_proficiency::assessment::{
    Assessment, AssessmentResponse, RecognitionResult, ScoreBreakdown, ScoreSignals,
};
use oral_proficiency::config::AppConfig;
use oral_proficiency::error::AppError;
use serde::Serialize;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Transcript returned by the speech recognizer
    #[arg(long)]
    pub(crate) transcript: String,
    /// Word confidence; repeat once per word, or pass once to apply to every word
    #[arg(long = "confidence", value_parser = parse_confidence)]
    pub(crate) confidences: Vec<f64>,
    /// Reference phrase for practice mode
    #[arg(long, conflicts_with = "practice_level")]
    pub(crate) reference: Option<String>,
    /// Practice level whose reference phrase to use (beginner, intermediate, advanced)
    #[arg(long)]
    pub(crate) practice_level: Option<String>,
    /// Print the response record and scoring trail as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LevelsArgs {
    /// Include the eight criteria descriptions for every level
    #[arg(long)]
    pub(crate) details: bool,
}

#[derive(Serialize)]
struct AssessmentReport<'a> {
    #[serde(flatten)]
    response: &'a AssessmentResponse,
    signals: &'a ScoreSignals,
    breakdown: &'a ScoreBreakdown,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        transcript,
        confidences,
        reference,
        practice_level,
        json,
    } = args;

    let config = AppConfig::load()?;
    let engine = load_engine(&config.resources)?;

    let recognition = RecognitionResult::with_confidences(transcript.clone(), &confidences)?;
    let mode = engine.resolve_mode(reference.as_deref(), practice_level.as_deref())?;
    let assessment = engine.assess(&recognition, &mode)?;

    if json {
        let signals = assessment.signals.clone();
        let breakdown = assessment.breakdown.clone();
        let response = AssessmentResponse::new(assessment, transcript);
        let report = AssessmentReport {
            response: &response,
            signals: &signals,
            breakdown: &breakdown,
        };
        serde_json::to_writer_pretty(std::io::stdout().lock(), &report)
            .map_err(std::io::Error::from)?;
        println!();
    } else {
        render_assessment(&assessment, &transcript);
    }

    Ok(())
}

pub(crate) fn run_levels(args: LevelsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config.resources)?;

    println!("ACTFL proficiency levels");
    for descriptor in engine.reference().criteria().levels() {
        println!(
            "- {:<18} {:>3}-{:<3} {}",
            descriptor.level.key(),
            descriptor.score_range.min,
            descriptor.score_range.max,
            descriptor.name
        );
        if args.details {
            let details = &descriptor.details;
            for (label, text) in [
                ("Oral production", &details.oral_production),
                ("Functions", &details.functions),
                ("Discourse", &details.discourse),
                ("Grammatical control", &details.grammatical_control),
                ("Vocabulary", &details.vocabulary),
                ("Pronunciation", &details.pronunciation),
                ("Communication strategies", &details.communication_strategies),
                ("Sociocultural use", &details.sociocultural_use),
            ] {
                println!("    {label}: {text}");
            }
        }
    }

    Ok(())
}

fn render_assessment(assessment: &Assessment, transcript: &str) {
    let result = &assessment.result;

    println!("Oral proficiency assessment");
    println!("- Transcript: {transcript}");
    match assessment.mode.reference() {
        Some(reference) => println!("- Mode: practice | reference \"{reference}\""),
        None => println!("- Mode: free speech"),
    }
    println!("- Score: {:.1}/100 | Level: {}", result.score, result.level);

    let signals = &assessment.signals;
    println!(
        "- Signals: {} words | {:.0}% recognized | {:.2} mean confidence | {:.2} unique ratio",
        signals.word_count,
        signals.recognized_ratio * 100.0,
        signals.mean_confidence,
        signals.unique_ratio
    );
    if let Some(similarity) = signals.similarity {
        println!("- Reference similarity: {:.0}%", similarity * 100.0);
    }
    if let Some(coverage) = signals.dictionary_coverage {
        println!("- Dictionary coverage: {:.0}%", coverage * 100.0);
    }

    println!("\nScore breakdown");
    for component in &assessment.breakdown.components {
        println!(
            "  - {:?}: {:.1} pts ({})",
            component.factor, component.points, component.notes
        );
    }
    for adjustment in &assessment.breakdown.adjustments {
        println!(
            "  - {:?}: {:+.1} ({})",
            adjustment.rule, adjustment.delta, adjustment.notes
        );
    }

    println!("\n{}", result.feedback);
    println!("\nStrengths");
    for strength in &result.strengths {
        println!("  - {strength}");
    }
    if !result.areas_for_improvement.is_empty() {
        println!("Areas for improvement");
        for area in &result.areas_for_improvement {
            println!("  - {area}");
        }
    }
}
