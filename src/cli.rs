use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Result;
use clap::Parser;

use crate::{
    identifier::resolve_pr_identifier,
    types::{DiffRequest, InfoRequest, Repo, ReviewEvent, ReviewRequest},
};

const BUILD_INFO_HUMAN: &str = env!("BUILD_INFO_HUMAN");

#[derive(Parser, Debug)]
#[command(
    name = "get_pr_info",
    about = "Get pull request metadata, changed files and reviews as JSON"
)]
#[command(version, long_version = BUILD_INFO_HUMAN)]
struct InfoArgs {
    /// PR number or full PR URL
    #[arg(value_name = "PR-NUMBER|PR-URL")]
    pub pr_identifier: String,

    /// Repository in format owner/repo (overrides the one in a PR URL)
    #[arg(short = 'r', long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "get_pr_diff",
    about = "Get the full diff for a pull request, optionally for one file"
)]
#[command(version, long_version = BUILD_INFO_HUMAN)]
struct DiffArgs {
    /// PR number or full PR URL
    #[arg(value_name = "PR-NUMBER|PR-URL")]
    pub pr_identifier: String,

    /// Repository in format owner/repo (optional if using URL)
    #[arg(short = 'r', long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Only show changes for files whose diff header contains this path
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "submit_review",
    about = "Submit a pull request review with multiple inline comments"
)]
#[command(version, long_version = BUILD_INFO_HUMAN)]
struct ReviewArgs {
    /// PR number
    #[arg(value_name = "PR-NUMBER")]
    pub pr_number: String,

    /// Repository in format owner/repo
    #[arg(short = 'r', long, value_name = "OWNER/REPO")]
    pub repo: String,

    /// JSON file containing an array of comments [{path, line, body, start_line?}, ...]
    #[arg(long = "comments-file", value_name = "FILE")]
    pub comments_file: PathBuf,

    /// Review event type
    #[arg(long, value_enum, default_value_t = ReviewEvent::Comment)]
    pub event: ReviewEvent,

    /// Overall review summary
    #[arg(long, value_name = "TEXT")]
    pub body: Option<String>,

    /// Commit SHA to review (defaults to the PR head)
    #[arg(long = "commit-sha", value_name = "SHA")]
    pub commit_sha: Option<String>,
}

/// Parses `get_pr_info` arguments into a request.
pub fn parse_info_args<I, T>(args: I) -> Result<InfoRequest>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = InfoArgs::try_parse_from(args)?;
    let target =
        resolve_pr_identifier(&cli.pr_identifier).with_repo_override(cli.repo.map(Repo::new));
    Ok(InfoRequest { target })
}

/// Parses `get_pr_diff` arguments into a request.
///
/// An explicit `--repo` takes precedence over the repository embedded in a
/// PR URL.
pub fn parse_diff_args<I, T>(args: I) -> Result<DiffRequest>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = DiffArgs::try_parse_from(args)?;
    let target =
        resolve_pr_identifier(&cli.pr_identifier).with_repo_override(cli.repo.map(Repo::new));
    Ok(DiffRequest {
        target,
        file: cli.file,
    })
}

/// Parses `submit_review` arguments into a request.
pub fn parse_review_args<I, T>(args: I) -> Result<ReviewRequest>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = ReviewArgs::try_parse_from(args)?;
    Ok(ReviewRequest {
        number: cli.pr_number,
        repo: Repo::new(cli.repo),
        comments_file: cli.comments_file,
        event: cli.event,
        body: cli.body,
        commit_sha: cli.commit_sha,
    })
}

/// Writes `err` for the user and returns the process exit status for it.
///
/// Help and version requests go to `out` and succeed; usage errors go to
/// `err_out` with clap's status 2; every other failure writes its context
/// chain to `err_out` and yields 1.
pub fn write_error<O: Write, E: Write>(
    err: &anyhow::Error,
    out: &mut O,
    err_out: &mut E,
) -> u8 {
    use clap::error::ErrorKind;

    // A failed write leaves nothing better to report to.
    match err.downcast_ref::<clap::Error>() {
        Some(clap_err)
            if matches!(
                clap_err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = write!(out, "{clap_err}");
            0
        }
        Some(clap_err) => {
            let _ = write!(err_out, "{clap_err}");
            2
        }
        None => {
            let _ = writeln!(err_out, "{err:#}");
            1
        }
    }
}

/// Reports `err` on the process's stdout/stderr and picks the exit code.
pub fn report_error(err: &anyhow::Error) -> ExitCode {
    let status = write_error(err, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(status)
}
