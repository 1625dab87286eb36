//! Narrowing a unified diff down to the file sections for one path.

/// Marker that opens every file section of a git unified diff.
pub const FILE_HEADER_PREFIX: &str = "diff --git";

/// Returns the lines of `diff` that belong to file sections whose
/// `diff --git` header contains `path`.
///
/// A file section runs from its header up to the next header or the end
/// of input. Kept lines are returned unmodified and in their original
/// order, joined with `\n`.
///
/// Matching is plain substring containment against the whole header
/// line, so `foo.py` also selects `src/foo.py.bak`. When several sections
/// match, all of them are kept. When none match the result is empty.
pub fn filter_diff_by_file(diff: &str, path: &str) -> String {
    let mut kept = Vec::new();
    let mut in_target_file = false;

    for line in diff.split('\n') {
        if line.starts_with(FILE_HEADER_PREFIX) {
            in_target_file = line.contains(path);
        }

        if in_target_file {
            kept.push(line);
        }
    }

    kept.join("\n")
}
