use ghreview::filter_diff_by_file;

const FOO_SECTION: &str = "\
diff --git a/foo.py b/foo.py
index 1111111..2222222 100644
--- a/foo.py
+++ b/foo.py
@@ -1,3 +1,3 @@
 import os
-print('old')
+print('new')";

const BAR_SECTION: &str = "\
diff --git a/bar.py b/bar.py
index 3333333..4444444 100644
--- a/bar.py
+++ b/bar.py
@@ -10,2 +10,3 @@ def bar():
     return 1
+    # added";

const BAK_SECTION: &str = "\
diff --git a/src/foo.py.bak b/src/foo.py.bak
new file mode 100644
--- /dev/null
+++ b/src/foo.py.bak
@@ -0,0 +1 @@
+backup";

fn join(sections: &[&str]) -> String {
    sections.join("\n")
}

#[test]
fn test_filter_two_section_scenario() {
    let diff = "diff --git a/foo.py b/foo.py\n+line one\n-line two\ndiff --git a/bar.py b/bar.py\n+bar line";

    let filtered = filter_diff_by_file(diff, "foo.py");

    assert_eq!(
        filtered,
        "diff --git a/foo.py b/foo.py\n+line one\n-line two"
    );
}

#[test]
fn test_filter_unique_path_selects_one_section() {
    let diff = join(&[FOO_SECTION, BAR_SECTION]);

    assert_eq!(filter_diff_by_file(&diff, "bar.py"), BAR_SECTION);
    assert_eq!(filter_diff_by_file(&diff, "a/foo.py"), FOO_SECTION);
}

#[test]
fn test_filter_result_starts_with_header() {
    let diff = join(&[BAR_SECTION, FOO_SECTION]);

    let filtered = filter_diff_by_file(&diff, "foo.py");

    assert!(filtered.starts_with("diff --git a/foo.py b/foo.py\n"));
}

#[test]
fn test_filter_no_match_is_empty() {
    let diff = join(&[FOO_SECTION, BAR_SECTION]);

    assert_eq!(filter_diff_by_file(&diff, "baz.rs"), "");
}

#[test]
fn test_filter_matching_every_section_is_identity() {
    let diff = join(&[FOO_SECTION, BAR_SECTION]) + "\n";

    assert_eq!(filter_diff_by_file(&diff, ".py"), diff);
    assert_eq!(filter_diff_by_file(&diff, "diff --git"), diff);
}

#[test]
fn test_filter_is_idempotent() {
    let diff = join(&[FOO_SECTION, BAR_SECTION, BAK_SECTION]);

    let once = filter_diff_by_file(&diff, "bar.py");
    let twice = filter_diff_by_file(&once, "bar.py");

    assert_eq!(once, twice);
}

#[test]
fn test_filter_substring_matches_several_sections_in_order() {
    // `foo.py` is a substring of `src/foo.py.bak`, so both sections match.
    let diff = join(&[FOO_SECTION, BAR_SECTION, BAK_SECTION]);

    let filtered = filter_diff_by_file(&diff, "foo.py");

    assert_eq!(filtered, join(&[FOO_SECTION, BAK_SECTION]));
}

#[test]
fn test_filter_keeps_trailing_newline_of_last_section() {
    let diff = join(&[FOO_SECTION, BAR_SECTION]) + "\n";

    assert_eq!(filter_diff_by_file(&diff, "bar.py"), format!("{BAR_SECTION}\n"));
    assert_eq!(filter_diff_by_file(&diff, "foo.py"), FOO_SECTION);
}

#[test]
fn test_filter_ignores_lines_before_first_header() {
    let diff = format!("From 1234 Mon Sep 17 00:00:00 2001\nSubject: foo.py\n{FOO_SECTION}");

    assert_eq!(filter_diff_by_file(&diff, "foo.py"), FOO_SECTION);
}

#[test]
fn test_filter_empty_diff() {
    assert_eq!(filter_diff_by_file("", "foo.py"), "");
}

#[test]
fn test_filter_header_marker_only_at_line_start() {
    let diff = "diff --git a/bar.py b/bar.py\n+ see diff --git a/foo.py\n+x";

    assert_eq!(filter_diff_by_file(diff, "foo.py"), "");
}
