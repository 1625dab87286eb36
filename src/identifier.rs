use crate::types::{PrTarget, Repo};

/// Resolves a pull request identifier into a number and, for URLs, the
/// repository it lives in.
///
/// Identifiers starting with `http` are treated as
/// `.../<owner>/<repo>/pull/<number>` URLs: trailing slashes are dropped,
/// the last path segment is the number and the fourth- and third-from-last
/// segments form `owner/repo`. Anything else is taken verbatim as the
/// number, leaving the repository to `--repo` or to `gh`'s notion of the
/// current repository.
///
/// Nothing is validated here. A malformed identifier is passed through and
/// rejected by `gh` when it is used.
pub fn resolve_pr_identifier(identifier: &str) -> PrTarget {
    if !identifier.starts_with("http") {
        return PrTarget::new(identifier, None);
    }

    let segments: Vec<&str> = identifier.trim_end_matches('/').split('/').collect();
    let number = segments.last().copied().unwrap_or_default();

    let repo = match segments.len() {
        n if n >= 4 => Some(Repo::from_parts(segments[n - 4], segments[n - 3])),
        _ => None,
    };

    PrTarget::new(number, repo)
}
