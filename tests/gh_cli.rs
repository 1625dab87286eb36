use ghreview::{
    GhCli, PrTarget, Repo, ReviewComment, ReviewEvent, ReviewHost, build_review_payload,
    github::{create_review_args, head_commit_args, pr_diff_args, pr_view_args},
};

fn acme_widgets() -> Repo {
    Repo::new("acme/widgets")
}

#[test]
fn test_pr_view_args() {
    let target = PrTarget::new("42", Some(acme_widgets()));

    assert_eq!(
        pr_view_args(&target, &["number", "title"]),
        vec!["pr", "view", "42", "--repo", "acme/widgets", "--json", "number,title"]
    );
}

#[test]
fn test_pr_diff_args_without_repo() {
    let target = PrTarget::new("42", None);

    assert_eq!(pr_diff_args(&target), vec!["pr", "diff", "42"]);
}

#[test]
fn test_head_commit_args() {
    assert_eq!(
        head_commit_args("42", &acme_widgets()),
        vec![
            "pr",
            "view",
            "42",
            "--repo",
            "acme/widgets",
            "--json",
            "headRefOid",
            "--jq",
            ".headRefOid"
        ]
    );
}

#[test]
fn test_create_review_args() {
    assert_eq!(
        create_review_args("42", &acme_widgets()),
        vec![
            "api",
            "--method",
            "POST",
            "-H",
            "Accept: application/vnd.github+json",
            "-H",
            "X-GitHub-Api-Version: 2022-11-28",
            "repos/acme/widgets/pulls/42/reviews",
            "--input",
            "-"
        ]
    );
}

#[test]
fn test_default_program_is_gh() {
    assert_eq!(GhCli::default().program(), "gh");
}

#[tokio::test]
async fn test_missing_executable_is_reported() {
    let gh = GhCli::new("/nonexistent/ghreview-test/gh");

    let err = gh
        .pull_request_diff(&PrTarget::new("42", None))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to run"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_stdout_is_returned_verbatim() {
    // `echo` stands in for gh and prints the arguments it was given.
    let gh = GhCli::new("echo");

    let diff = gh
        .pull_request_diff(&PrTarget::new("42", Some(acme_widgets())))
        .await
        .unwrap();

    assert_eq!(diff, "pr diff 42 --repo acme/widgets\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_head_commit_is_trimmed() {
    let gh = GhCli::new("echo");

    let sha = gh.head_commit("42", &acme_widgets()).await.unwrap();

    assert_eq!(
        sha,
        "pr view 42 --repo acme/widgets --json headRefOid --jq .headRefOid"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_json_output_is_a_parse_error() {
    let gh = GhCli::new("echo");

    let err = gh
        .view_pull_request(&PrTarget::new("42", None), &["number"])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to parse JSON output from gh"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_zero_exit_is_an_error() {
    let gh = GhCli::new("false");

    assert!(gh.pull_request_diff(&PrTarget::new("42", None)).await.is_err());
}

/// Writes an executable shell script standing in for gh and returns a host
/// that runs it.
#[cfg(unix)]
fn scripted_gh(name: &str, script: &str) -> GhCli {
    use std::os::unix::fs::PermissionsExt;

    let path = std::env::temp_dir().join(format!("ghreview-{}-{}", std::process::id(), name));
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    GhCli::new(path.to_string_lossy())
}

#[cfg(unix)]
fn many_comments(count: u64) -> Vec<ReviewComment> {
    (1..=count)
        .map(|line| ReviewComment {
            path: format!("src/module_{line}.rs"),
            line,
            body: "Consider handling the error instead of discarding it.".to_string(),
            start_line: None,
        })
        .collect()
}

#[cfg(unix)]
#[tokio::test]
async fn test_create_review_sends_payload_on_stdin() {
    // `cat` echoes the request body back as the response.
    let gh = scripted_gh("echo-stdin-gh", "#!/bin/sh\ncat\n");
    let comments = vec![
        ReviewComment {
            path: "x.py".to_string(),
            line: 10,
            body: "nit".to_string(),
            start_line: None,
        },
        ReviewComment {
            path: "y.py".to_string(),
            line: 20,
            body: "range".to_string(),
            start_line: Some(15),
        },
    ];
    let payload = build_review_payload("abc123", ReviewEvent::Approve, &comments, Some("LGTM"));

    let response = gh.create_review("42", &acme_widgets(), &payload).await.unwrap();

    assert_eq!(response, serde_json::to_value(&payload).unwrap());
}

#[cfg(unix)]
#[tokio::test]
async fn test_large_payload_rejected_without_reading_keeps_gh_error() {
    let gh = scripted_gh(
        "unauthenticated-gh",
        "#!/bin/sh\necho \"gh: HTTP 401: Bad credentials\" >&2\nexit 1\n",
    );
    // Far larger than a pipe buffer, so the write cannot complete.
    let payload = build_review_payload("abc123", ReviewEvent::Comment, &many_comments(3000), None);

    let err = gh
        .create_review("42", &acme_widgets(), &payload)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "gh: HTTP 401: Bad credentials");
}
