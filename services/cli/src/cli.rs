use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use cv_screen::config::AppConfig;
use cv_screen::error::AppError;
use cv_screen::telemetry;
use tracing::debug;

use crate::commands;
use crate::infra;

#[derive(Parser, Debug)]
#[command(
    name = "cv-screen",
    about = "Screen resumes against job descriptions from the command line",
    version
)]
struct Cli {
    #[command(flatten)]
    overrides: ScreeningOverrides,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a job description into structured requirements
    ParseJob(JobArgs),
    /// Extract skills, degrees, experience, and contact details from a resume
    Extract(ResumeArgs),
    /// Score a single resume against a job description
    Score(ScoreArgs),
    /// Screen several resumes against one job description and rank them
    Batch(BatchArgs),
}

/// Settings that take precedence over the environment.
#[derive(Args, Debug, Default)]
pub(crate) struct ScreeningOverrides {
    /// Override the accept threshold (0-100)
    #[arg(long, global = true)]
    pub(crate) accept_threshold: Option<f64>,
    /// Turn the mandatory coverage gate on or off (true/false)
    #[arg(long, global = true, action = ArgAction::Set, value_name = "BOOL")]
    pub(crate) enforce_mandatory_gate: Option<bool>,
    /// CSV file with a `skill` column replacing the built-in vocabulary
    #[arg(long, global = true)]
    pub(crate) vocabulary: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct JobArgs {
    /// Plain-text job description
    #[arg(long)]
    pub(crate) jd: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ResumeArgs {
    /// Plain-text resume
    #[arg(long)]
    pub(crate) resume: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Plain-text job description
    #[arg(long)]
    pub(crate) jd: PathBuf,
    /// Plain-text resume
    #[arg(long)]
    pub(crate) resume: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Plain-text job description
    #[arg(long)]
    pub(crate) jd: PathBuf,
    /// Plain-text resumes to rank
    #[arg(required = true, num_args = 1..)]
    pub(crate) resumes: Vec<PathBuf>,
    /// Also write the ranking as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "loaded configuration");
    let service = infra::build_service(config, &cli.overrides)?;

    match cli.command {
        Command::ParseJob(args) => commands::parse_job(&service, args),
        Command::Extract(args) => commands::extract(&service, args),
        Command::Score(args) => commands::score(&service, args),
        Command::Batch(args) => commands::batch(&service, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_flag_takes_an_explicit_value() {
        let cli = Cli::try_parse_from([
            "cv-screen",
            "--enforce-mandatory-gate",
            "false",
            "parse-job",
            "--jd",
            "jd.txt",
        ])
        .expect("arguments parse");
        assert_eq!(cli.overrides.enforce_mandatory_gate, Some(false));

        let cli = Cli::try_parse_from([
            "cv-screen",
            "score",
            "--jd",
            "jd.txt",
            "--resume",
            "cv.txt",
        ])
        .expect("arguments parse");
        assert_eq!(cli.overrides.enforce_mandatory_gate, None);
        assert!(matches!(cli.command, Command::Score(_)));
    }

    #[test]
    fn batch_requires_at_least_one_resume() {
        assert!(Cli::try_parse_from(["cv-screen", "batch", "--jd", "jd.txt"]).is_err());
    }
}
