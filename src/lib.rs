//! ghreview: command-line helpers for reviewing GitHub pull requests.
//!
//! Wraps the GitHub CLI to fetch pull request metadata, fetch diffs
//! (optionally narrowed to one file) and submit a review with inline
//! comments in one call. The pure pieces (diff filtering, identifier
//! resolution, comment reshaping) live alongside a `ReviewHost` trait that
//! abstracts every call to GitHub.

pub mod cli;
pub mod diff;
pub mod display;
pub mod github;
pub mod identifier;
pub mod logging;
pub mod query;
pub mod review;
pub mod types;

pub use cli::{parse_diff_args, parse_info_args, parse_review_args, report_error, write_error};
pub use diff::filter_diff_by_file;
pub use github::GhCli;
pub use identifier::resolve_pr_identifier;
pub use query::{PR_INFO_FIELDS, fetch_pr_diff, fetch_pr_info, submit_review};
pub use review::{build_review_payload, load_comments, parse_comments, to_api_comment};
pub use types::{
    ApiReviewComment, DiffRequest, InfoRequest, PrTarget, Repo, ReviewComment, ReviewEvent,
    ReviewHost, ReviewOutcome, ReviewPayload, ReviewRequest,
};
