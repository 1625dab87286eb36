use std::process::ExitCode;

use anyhow::Result;
use ghreview::{
    GhCli, display::write_diff, fetch_pr_diff, logging::init_tracing, parse_diff_args,
    report_error,
};

async fn run() -> Result<()> {
    let request = parse_diff_args(std::env::args_os())?;
    let diff = fetch_pr_diff(&request, &GhCli::from_env()).await?;
    write_diff(&diff, &mut std::io::stdout().lock())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}
