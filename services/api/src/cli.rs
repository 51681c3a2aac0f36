use crate::commands::{run_assess, run_levels, AssessArgs, LevelsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use oral_proficiency::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Oral Proficiency Assessor",
    about = "Score spoken Spanish against the ACTFL proficiency scale",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single transcript and print the assessment
    Assess(AssessArgs),
    /// Print the configured proficiency levels
    Levels(LevelsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Levels(args) => run_levels(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assess_accepts_repeated_confidences() {
        let cli = Cli::try_parse_from([
            "oral-proficiency-api",
            "assess",
            "--transcript",
            "hola amigo",
            "--confidence",
            "0.9",
            "--confidence",
            "0.4",
            "--practice-level",
            "beginner",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.confidences, vec![0.9, 0.4]);
                assert_eq!(args.practice_level.as_deref(), Some("beginner"));
                assert!(!args.json);
            }
            other => panic!("expected assess command, got {other:?}"),
        }
    }

    #[test]
    fn reference_and_practice_level_conflict() {
        let parsed = Cli::try_parse_from([
            "oral-proficiency-api",
            "assess",
            "--transcript",
            "hola",
            "--reference",
            "Hola",
            "--practice-level",
            "beginner",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["oral-proficiency-api"]).expect("no arguments parse");
        assert!(cli.command.is_none());
    }
}
