use std::{io, path::Path};

use anyhow::Result;

use crate::types::{ApiReviewComment, RIGHT_SIDE, ReviewComment, ReviewEvent, ReviewPayload};

/// Converts a comment record into the reviews API comment schema.
///
/// Every comment is anchored to the right-hand side of the diff. Multi-line
/// comments additionally carry `start_line` and a matching `start_side`.
pub fn to_api_comment(comment: &ReviewComment) -> ApiReviewComment {
    ApiReviewComment {
        path: comment.path.clone(),
        line: comment.line,
        body: comment.body.clone(),
        side: RIGHT_SIDE,
        start_line: comment.start_line,
        start_side: comment.start_line.map(|_| RIGHT_SIDE),
    }
}

/// Reshapes every comment, keeping input order.
pub fn to_api_comments(comments: &[ReviewComment]) -> Vec<ApiReviewComment> {
    comments.iter().map(to_api_comment).collect()
}

/// Assembles the review creation request. An empty `body` is left out.
pub fn build_review_payload(
    commit_id: impl Into<String>,
    event: ReviewEvent,
    comments: &[ReviewComment],
    body: Option<&str>,
) -> ReviewPayload {
    ReviewPayload {
        commit_id: commit_id.into(),
        event,
        comments: to_api_comments(comments),
        body: body.filter(|b| !b.is_empty()).map(str::to_string),
    }
}

/// Checks that multi-line comments do not start after they end.
pub fn validate_comments(comments: &[ReviewComment]) -> Result<()> {
    for (index, comment) in comments.iter().enumerate() {
        match comment.start_line {
            Some(start_line) if start_line > comment.line => anyhow::bail!(
                "Error: Comment {} on '{}' has start_line {} after line {}",
                index,
                comment.path,
                start_line,
                comment.line
            ),
            _ => {}
        }
    }
    Ok(())
}

/// Parses the contents of a comments file: a JSON array of comment
/// records.
pub fn parse_comments(json: &str) -> Result<Vec<ReviewComment>> {
    let comments: Vec<ReviewComment> = serde_json::from_str(json)
        .map_err(|e| anyhow::anyhow!("Error: Invalid JSON in comments file: {}", e))?;
    validate_comments(&comments)?;
    Ok(comments)
}

/// Reads and parses the comments file at `path`.
pub fn load_comments(path: &Path) -> Result<Vec<ReviewComment>> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            anyhow::bail!("Error: Comments file not found: {}", path.display());
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Error: Failed to read comments file: {}", path.display())));
        }
    };

    parse_comments(&json)
}
