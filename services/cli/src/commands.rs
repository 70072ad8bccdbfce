use std::fs::File;
use std::io::{self, Write};

use cv_screen::error::AppError;
use cv_screen::screening::{
    CandidateProfile, PlainTextFile, ResumeDetails, ScreeningService, TextSource,
};
use serde::Serialize;
use tracing::info;

use crate::cli::{BatchArgs, JobArgs, ResumeArgs, ScoreArgs};
use crate::infra::{read_text, write_ranking};

#[derive(Serialize)]
struct ExtractedResume {
    source: String,
    details: ResumeDetails,
    profile: CandidateProfile,
}

pub(crate) fn parse_job(service: &ScreeningService, args: JobArgs) -> Result<(), AppError> {
    let job = service.parse_job(&read_text(&args.jd));
    print_json(&job)
}

pub(crate) fn extract(service: &ScreeningService, args: ResumeArgs) -> Result<(), AppError> {
    let source = PlainTextFile::new(args.resume);
    let text = source.text();
    print_json(&ExtractedResume {
        source: source.label(),
        details: service.details(&text),
        profile: service.profile(&text),
    })
}

pub(crate) fn score(service: &ScreeningService, args: ScoreArgs) -> Result<(), AppError> {
    let job = service.parse_job(&read_text(&args.jd));
    let screening = service.screen(&job, &PlainTextFile::new(args.resume));
    info!(summary = %screening.result.summary(), "scored resume");
    print_json(&screening)
}

pub(crate) fn batch(service: &ScreeningService, args: BatchArgs) -> Result<(), AppError> {
    let job = service.parse_job(&read_text(&args.jd));
    let files: Vec<PlainTextFile> = args.resumes.into_iter().map(PlainTextFile::new).collect();
    let ranked = service.screen_all(&job, files.iter().map(|file| file as &dyn TextSource));

    let accepted = ranked
        .iter()
        .filter(|screening| screening.result.decision.is_accept())
        .count();
    info!(total = ranked.len(), accepted, "ranked resumes");

    if let Some(path) = args.csv {
        write_ranking(File::create(&path)?, &ranked)?;
        info!(path = %path.display(), "wrote ranking csv");
    }
    print_json(&ranked)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
