//! Build script for ghreview - generates version information.
//!
//! The human-readable version is assembled from:
//!
//! 1. `CARGO_PKG_VERSION` from Cargo.toml.
//! 2. `git describe --tags --always --dirty`, in parentheses, when the
//!    source tree is a git checkout (e.g. `(v0.1.0-3-g1a2b3c4d-dirty)`).
//! 3. The rustc version used for the build.
//!
//! Missing pieces are skipped, so a tarball build without git still
//! reports the package and compiler versions.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let build_info = human_readable_version();
    println!("cargo:rustc-env=BUILD_INFO_HUMAN={build_info}");
}

/// Runs `program` with `args` and returns its trimmed stdout when it
/// succeeds with non-empty output.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn human_readable_version() -> String {
    let git = command_output("git", &["describe", "--tags", "--always", "--dirty"]);
    let rustc = command_output("rustc", &["--version"]);

    [
        Some(env!("CARGO_PKG_VERSION").to_string()),
        git.map(|desc| format!("({desc})")),
        rustc,
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
}
