use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A repository in `owner/repo` form.
///
/// The value is passed verbatim to `gh`; a malformed repository surfaces
/// as an error from the CLI rather than from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo(String);

impl Repo {
    pub fn new(name_with_owner: impl Into<String>) -> Self {
        Self(name_with_owner.into())
    }

    pub fn from_parts(owner: &str, name: &str) -> Self {
        Self(format!("{owner}/{name}"))
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pull request as the user named it: the number exactly as given and
/// the repository, when one is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrTarget {
    pub number: String,
    pub repo: Option<Repo>,
}

impl PrTarget {
    pub fn new(number: impl Into<String>, repo: Option<Repo>) -> Self {
        Self {
            number: number.into(),
            repo,
        }
    }

    /// Replaces the repository with `repo` when one is given explicitly.
    pub fn with_repo_override(mut self, repo: Option<Repo>) -> Self {
        if repo.is_some() {
            self.repo = repo;
        }
        self
    }
}

/// Diff side every inline comment is anchored to: the new version of
/// the file.
pub const RIGHT_SIDE: &str = "RIGHT";

/// The verdict attached to a submitted review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewEvent {
    Approve,
    RequestChanges,
    #[default]
    Comment,
}

impl ReviewEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewEvent::Approve => "APPROVE",
            ReviewEvent::RequestChanges => "REQUEST_CHANGES",
            ReviewEvent::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for ReviewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One proposed inline comment, as read from the comments file.
///
/// `line` is a line number in the new version of the file. `start_line`
/// is only present for comments spanning several lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewComment {
    pub path: String,
    pub line: u64,
    pub body: String,
    #[serde(default)]
    pub start_line: Option<u64>,
}

/// An inline comment in the shape the pull request reviews API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiReviewComment {
    pub path: String,
    pub line: u64,
    pub body: String,
    pub side: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_side: Option<&'static str>,
}

/// Request body for creating a pull request review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewPayload {
    pub commit_id: String,
    pub event: ReviewEvent,
    pub comments: Vec<ApiReviewComment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// What `get_pr_info` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRequest {
    pub target: PrTarget,
}

/// What `get_pr_diff` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    pub target: PrTarget,
    pub file: Option<String>,
}

/// What `submit_review` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub number: String,
    pub repo: Repo,
    pub comments_file: std::path::PathBuf,
    pub event: ReviewEvent,
    pub body: Option<String>,
    pub commit_sha: Option<String>,
}

/// Result of a successful review submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub response: Value,
    pub comment_count: usize,
}

/// Access to the code-review host.
///
/// Every read and the single write the tools perform go through this
/// trait. `GhCli` implements it on top of the GitHub CLI; tests provide an
/// in-memory host.
#[async_trait]
pub trait ReviewHost {
    /// Returns the requested `fields` of a pull request as JSON.
    async fn view_pull_request(&self, target: &PrTarget, fields: &[&str]) -> Result<Value>;

    /// Returns the unified diff of a pull request.
    async fn pull_request_diff(&self, target: &PrTarget) -> Result<String>;

    /// Returns the SHA of the pull request's head commit.
    async fn head_commit(&self, number: &str, repo: &Repo) -> Result<String>;

    /// Creates a review and returns the API response.
    async fn create_review(&self, number: &str, repo: &Repo, payload: &ReviewPayload)
    -> Result<Value>;
}
