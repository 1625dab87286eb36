use std::process::ExitCode;

use anyhow::Result;
use ghreview::{
    GhCli, display::write_json, fetch_pr_info, logging::init_tracing, parse_info_args,
    report_error,
};

async fn run() -> Result<()> {
    let request = parse_info_args(std::env::args_os())?;
    let info = fetch_pr_info(&request, &GhCli::from_env()).await?;
    write_json(&info, &mut std::io::stdout().lock())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}
