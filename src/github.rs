use std::{io, process::Stdio};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::debug;

use crate::types::{PrTarget, Repo, ReviewHost, ReviewPayload};

/// Environment variable naming the `gh` executable to run instead of the
/// one found on `PATH`.
pub const GH_PROGRAM_ENV: &str = "GHREVIEW_GH";

const DEFAULT_GH_PROGRAM: &str = "gh";
const ACCEPT_HEADER: &str = "Accept: application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version: 2022-11-28";

/// Review host backed by a pre-authenticated GitHub CLI.
#[derive(Debug, Clone)]
pub struct GhCli {
    program: String,
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new(DEFAULT_GH_PROGRAM)
    }
}

impl GhCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Uses the executable named by `GHREVIEW_GH`, falling back to `gh`.
    pub fn from_env() -> Self {
        match std::env::var(GH_PROGRAM_ENV) {
            Ok(program) if !program.trim().is_empty() => Self::new(program),
            _ => Self::default(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs `gh` with `args`, feeding `input` to its stdin when given, and
    /// returns its stdout.
    ///
    /// A non-zero exit becomes an error carrying gh's stderr.
    async fn run(&self, args: &[String], input: Option<&[u8]>) -> Result<String> {
        debug!(program = %self.program, ?args, "running gh");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to run '{}' CLI. Is it installed and on PATH?",
                    self.program
                )
            })?;

        let stdin = child.stdin.take();
        let feed_stdin = async move {
            let (Some(mut stdin), Some(input)) = (stdin, input) else {
                return Ok(());
            };
            // gh may exit without reading its input (e.g. bad credentials);
            // its exit status and stderr are reported instead.
            match stdin.write_all(input).await {
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        };

        let (written, output) = tokio::join!(feed_stdin, child.wait_with_output());
        let output = output.context("Failed to wait for gh to exit")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(status = %output.status, "gh exited unsuccessfully");
            anyhow::bail!("{}", stderr.trim());
        }
        written.context("Failed to write request body to gh")?;

        String::from_utf8(output.stdout).context("gh produced non UTF-8 output")
    }

    async fn run_json(&self, args: &[String], input: Option<&[u8]>) -> Result<Value> {
        let stdout = self.run(args, input).await?;
        serde_json::from_str(&stdout).context("Failed to parse JSON output from gh")
    }
}

fn repo_args(repo: Option<&Repo>) -> Vec<String> {
    match repo {
        Some(repo) => vec!["--repo".to_string(), repo.to_string()],
        None => Vec::new(),
    }
}

/// Argument list for `gh pr view` returning `fields` as JSON.
pub fn pr_view_args(target: &PrTarget, fields: &[&str]) -> Vec<String> {
    let mut args = vec!["pr".to_string(), "view".to_string(), target.number.clone()];
    args.extend(repo_args(target.repo.as_ref()));
    args.push("--json".to_string());
    args.push(fields.join(","));
    args
}

/// Argument list for `gh pr diff`.
pub fn pr_diff_args(target: &PrTarget) -> Vec<String> {
    let mut args = vec!["pr".to_string(), "diff".to_string(), target.number.clone()];
    args.extend(repo_args(target.repo.as_ref()));
    args
}

/// Argument list resolving the head commit SHA of a pull request.
pub fn head_commit_args(number: &str, repo: &Repo) -> Vec<String> {
    let mut args = vec!["pr".to_string(), "view".to_string(), number.to_string()];
    args.extend(repo_args(Some(repo)));
    args.extend(
        ["--json", "headRefOid", "--jq", ".headRefOid"]
            .iter()
            .map(|s| s.to_string()),
    );
    args
}

/// REST path for a pull request's reviews.
pub fn reviews_api_path(number: &str, repo: &Repo) -> String {
    format!("repos/{}/pulls/{}/reviews", repo, number)
}

/// Argument list for the authenticated `POST` creating a review; the
/// payload is read from stdin.
pub fn create_review_args(number: &str, repo: &Repo) -> Vec<String> {
    [
        "api",
        "--method",
        "POST",
        "-H",
        ACCEPT_HEADER,
        "-H",
        API_VERSION_HEADER,
        reviews_api_path(number, repo).as_str(),
        "--input",
        "-",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[async_trait]
impl ReviewHost for GhCli {
    async fn view_pull_request(&self, target: &PrTarget, fields: &[&str]) -> Result<Value> {
        self.run_json(&pr_view_args(target, fields), None).await
    }

    async fn pull_request_diff(&self, target: &PrTarget) -> Result<String> {
        self.run(&pr_diff_args(target), None).await
    }

    async fn head_commit(&self, number: &str, repo: &Repo) -> Result<String> {
        let sha = self.run(&head_commit_args(number, repo), None).await?;
        Ok(sha.trim().to_string())
    }

    async fn create_review(
        &self,
        number: &str,
        repo: &Repo,
        payload: &ReviewPayload,
    ) -> Result<Value> {
        let body = serde_json::to_vec(payload).context("Failed to encode review payload")?;
        self.run_json(&create_review_args(number, repo), Some(body.as_slice()))
            .await
    }
}
