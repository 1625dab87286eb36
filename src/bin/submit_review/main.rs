use std::process::ExitCode;

use anyhow::Result;
use ghreview::{
    GhCli,
    display::{write_json, write_review_summary},
    load_comments,
    logging::init_tracing,
    parse_review_args, report_error, submit_review,
};

async fn run() -> Result<()> {
    let request = parse_review_args(std::env::args_os())?;
    let comments = load_comments(&request.comments_file)?;

    let outcome = submit_review(&request, &comments, &GhCli::from_env()).await?;

    write_json(&outcome.response, &mut std::io::stdout().lock())?;
    write_review_summary(outcome.comment_count, &mut std::io::stderr().lock())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}
