use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{error, info};

use crate::{
    diff::filter_diff_by_file,
    review::build_review_payload,
    types::{DiffRequest, InfoRequest, ReviewComment, ReviewHost, ReviewOutcome, ReviewRequest},
};

/// Pull request fields `get_pr_info` asks the host for.
pub const PR_INFO_FIELDS: &[&str] = &[
    "number",
    "title",
    "body",
    "state",
    "author",
    "headRefName",
    "headRefOid",
    "baseRefName",
    "files",
    "reviews",
    "url",
    "additions",
    "deletions",
];

/// Fetches pull request metadata, returned as the host's JSON untouched.
pub async fn fetch_pr_info<H>(request: &InfoRequest, host: &H) -> Result<Value>
where
    H: ReviewHost + Sync,
{
    host.view_pull_request(&request.target, PR_INFO_FIELDS)
        .await
        .context("Error fetching PR info")
}

/// Fetches the unified diff of a pull request, narrowed to the sections
/// for `request.file` when one is given.
pub async fn fetch_pr_diff<H>(request: &DiffRequest, host: &H) -> Result<String>
where
    H: ReviewHost + Sync,
{
    let diff = host
        .pull_request_diff(&request.target)
        .await
        .context("Error fetching PR diff")?;

    Ok(match &request.file {
        Some(path) => filter_diff_by_file(&diff, path),
        None => diff,
    })
}

/// Submits `comments` as a single review on the requested pull request.
///
/// The head commit is looked up only when no commit SHA was supplied.
pub async fn submit_review<H>(
    request: &ReviewRequest,
    comments: &[ReviewComment],
    host: &H,
) -> Result<ReviewOutcome>
where
    H: ReviewHost + Sync,
{
    let commit_id = match request.commit_sha.as_deref().filter(|s| !s.is_empty()) {
        Some(sha) => sha.to_string(),
        None => {
            let sha = host
                .head_commit(&request.number, &request.repo)
                .await
                .context("Error fetching commit SHA")?;
            if sha.is_empty() {
                anyhow::bail!(
                    "Error fetching commit SHA: no head commit reported for PR {} in {}",
                    request.number,
                    request.repo
                );
            }
            sha
        }
    };

    let payload = build_review_payload(
        commit_id,
        request.event,
        comments,
        request.body.as_deref(),
    );

    info!(
        pr = %request.number,
        repo = %request.repo,
        event = %request.event,
        comments = payload.comments.len(),
        "submitting review"
    );

    let response = match host
        .create_review(&request.number, &request.repo, &payload)
        .await
    {
        Ok(response) => response,
        Err(err) => {
            let payload_json = serde_json::to_string(&payload).unwrap_or_default();
            error!(payload = %payload_json, "review submission failed");
            return Err(err.context("Error submitting review"));
        }
    };

    Ok(ReviewOutcome {
        response,
        comment_count: comments.len(),
    })
}
