#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::diff_file::{
        DiffDocument, DiffLine, DiffSummary, FileDiff, FileStatus, Hunk, LineKind,
    };
    use crate::parser::parse_diff;

    const SAMPLE_DIFF: &str = r#"diff --git a/test.txt b/test.txt
index 1234567..abcdefg 100644
--- a/test.txt
+++ b/test.txt
@@ -1,5 +1,6 @@
-This is the original file.
+This is the MODIFIED file.
 It has multiple lines.
-Some content here.
+Some NEW content here.
 More content.
+Additional line added.
 Final line."#;

    const MULTI_FILE_DIFF: &str = "\
diff --git a/src/lib.rs b/src/lib.rs
index 83db48f..bf269f4 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -10,3 +10,4 @@ pub fn run() {
     let a = 1;
-    let b = 2;
+    let b = 3;
+    let c = 4;
     a + b
@@ -40 +41 @@ fn helper() {
-    old()
+    new()
diff --git a/README.md b/README.md
new file mode 100644
index 0000000..e69de29
--- /dev/null
+++ b/README.md
@@ -0,0 +1,2 @@
+# Title
+Body
diff --git a/obsolete.txt b/obsolete.txt
deleted file mode 100644
index e69de29..0000000
--- a/obsolete.txt
+++ /dev/null
@@ -1 +0,0 @@
-gone
";

    fn line(kind: LineKind, content: &str, old: Option<u32>, new: Option<u32>) -> DiffLine {
        DiffLine {
            kind,
            old_line_num: old,
            new_line_num: new,
            content: content.to_string(),
        }
    }

    fn count_lines(document: &DiffDocument, kind: LineKind) -> usize {
        document
            .files()
            .iter()
            .flat_map(|f| &f.hunks)
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == kind)
            .count()
    }

    #[test]
    fn test_parse_single_file_scenario() {
        let document = parse_diff(
            "diff --git a/f.txt b/f.txt\n--- a/f.txt\n+++ b/f.txt\n@@ -1,2 +1,3 @@\n a\n-b\n+b2\n+c\n",
        );

        let mut hunk = Hunk::new(1, 2, 1, 3);
        hunk.lines = vec![
            line(LineKind::Context, "a", Some(1), Some(1)),
            line(LineKind::Removed, "b", Some(2), None),
            line(LineKind::Added, "b2", None, Some(2)),
            line(LineKind::Added, "c", None, Some(3)),
        ];
        let mut expected = FileDiff::new("f.txt", "f.txt");
        expected.hunks.push(hunk);

        assert_eq!(document.files(), &[expected]);
        assert_eq!(
            document.summary(),
            DiffSummary {
                files_changed: 1,
                insertions: 2,
                deletions: 1,
            }
        );
    }

    #[test]
    fn test_parse_diff() {
        let document = parse_diff(SAMPLE_DIFF);
        let files = document.files();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path(), "test.txt");
        assert_eq!(files[0].status, FileStatus::Modified);

        let hunk = &files[0].hunks[0];
        assert_eq!(hunk.lines.len(), 8);
        assert_eq!(hunk.count(LineKind::Added), 3);
        assert_eq!(hunk.count(LineKind::Removed), 2);
        assert_eq!(hunk.count(LineKind::Context), 3);

        // Hunk counts match the lines that were read
        assert_eq!(
            hunk.count(LineKind::Context) + hunk.count(LineKind::Removed),
            hunk.old_count as usize
        );
        assert_eq!(
            hunk.count(LineKind::Context) + hunk.count(LineKind::Added),
            hunk.new_count as usize
        );

        let last = hunk.lines.last().unwrap();
        assert_eq!(last.content, "Final line.");
        assert_eq!((last.old_line_num, last.new_line_num), (Some(5), Some(6)));
    }

    #[test]
    fn test_parse_multiple_files_and_statuses() {
        let document = parse_diff(MULTI_FILE_DIFF);
        let files = document.files();

        assert_eq!(files.len(), 3);

        assert_eq!(files[0].status, FileStatus::Modified);
        assert_eq!(files[0].hunks.len(), 2);
        assert_eq!(files[0].hunks[0].section.as_deref(), Some("pub fn run() {"));
        assert_eq!(files[0].hunks[1].old_count, 1);
        assert_eq!(files[0].hunks[1].new_count, 1);

        assert_eq!(files[1].status, FileStatus::Added);
        assert_eq!(files[1].old_path, None);
        assert_eq!(files[1].new_path.as_deref(), Some("README.md"));

        assert_eq!(files[2].status, FileStatus::Deleted);
        assert_eq!(files[2].old_path.as_deref(), Some("obsolete.txt"));
        assert_eq!(files[2].new_path, None);
        assert_eq!(files[2].path(), "obsolete.txt");

        assert_eq!(
            document.summary(),
            DiffSummary {
                files_changed: 3,
                insertions: 5,
                deletions: 3,
            }
        );
    }

    #[test]
    fn test_summary_matches_recount() {
        for text in [SAMPLE_DIFF, MULTI_FILE_DIFF, "", "garbage\nwithout\nheaders\n"] {
            let document = parse_diff(text);

            assert_eq!(document.summary(), DiffSummary::from_files(document.files()));
            assert_eq!(document.summary().insertions, count_lines(&document, LineKind::Added));
            assert_eq!(document.summary().deletions, count_lines(&document, LineKind::Removed));
            assert_eq!(document.summary().files_changed, document.files().len());
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse_diff(MULTI_FILE_DIFF), parse_diff(MULTI_FILE_DIFF));
    }

    #[test]
    fn test_empty_input() {
        let document = parse_diff("");
        assert!(document.is_empty());
        assert_eq!(document.summary(), DiffSummary::default());
    }

    #[test]
    fn test_omitted_counts_default_to_one() {
        let document = parse_diff("diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -5 +7 @@\n-a\n+b\n");
        let hunk = &document.files()[0].hunks[0];

        assert_eq!((hunk.old_start, hunk.old_count), (5, 1));
        assert_eq!((hunk.new_start, hunk.new_count), (7, 1));
        assert_eq!(hunk.lines[0].old_line_num, Some(5));
        assert_eq!(hunk.lines[1].new_line_num, Some(7));
    }

    #[test]
    fn test_one_sided_omitted_count_is_not_copied() {
        let document =
            parse_diff("diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -3 +3,4 @@\n-a\n+b\n+c\n+d\n+e\n");
        let hunk = &document.files()[0].hunks[0];

        assert_eq!(hunk.old_count, 1);
        assert_eq!(hunk.new_count, 4);
    }

    #[test]
    fn test_no_newline_marker_is_ignored() {
        let document = parse_diff(
            "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -1 +1 @@\n-old\n\\ No newline at end of file\n+new\n\\ No newline at end of file\n",
        );
        let hunk = &document.files()[0].hunks[0];

        assert_eq!(
            hunk.lines,
            vec![
                line(LineKind::Removed, "old", Some(1), None),
                line(LineKind::Added, "new", None, Some(1)),
            ]
        );
    }

    #[test]
    fn test_binary_file_has_no_hunks() {
        let document = parse_diff(
            "\
diff --git a/logo.png b/logo.png
new file mode 100644
index 0000000..4f2b1c3
Binary files /dev/null and b/logo.png differ
",
        );
        let file = &document.files()[0];

        assert!(file.hunks.is_empty());
        assert!(file.is_binary);
        assert_eq!(file.status, FileStatus::Added);
        assert_eq!(document.summary().files_changed, 1);
    }

    #[test]
    fn test_modified_binary_file() {
        let document = parse_diff(
            "diff --git a/logo.png b/logo.png\nindex 1..2 100644\nBinary files a/logo.png and b/logo.png differ\n",
        );
        let file = &document.files()[0];

        assert!(file.is_binary);
        assert_eq!(file.status, FileStatus::Modified);
    }

    #[test]
    fn test_rename_headers() {
        let document = parse_diff(
            "\
diff --git a/old_name.rs b/new_name.rs
similarity index 90%
rename from old_name.rs
rename to new_name.rs
index 1111111..2222222 100644
--- a/old_name.rs
+++ b/new_name.rs
@@ -1 +1 @@
-fn old() {}
+fn new() {}
",
        );
        let file = &document.files()[0];

        assert_eq!(file.status, FileStatus::Renamed);
        assert_eq!(file.old_path.as_deref(), Some("old_name.rs"));
        assert_eq!(file.new_path.as_deref(), Some("new_name.rs"));
        assert_eq!(file.display_name(), "old_name.rs → new_name.rs");
    }

    #[test]
    fn test_pure_rename_without_headers_or_hunks() {
        let document = parse_diff("diff --git a/a.txt b/b.txt\n");
        assert_eq!(document.files()[0].status, FileStatus::Renamed);
    }

    #[test]
    fn test_different_paths_with_hunks_stay_modified() {
        let document = parse_diff("--- a/one.txt\n+++ b/two.txt\n@@ -1 +1 @@\n-x\n+y\n");
        assert_eq!(document.files()[0].status, FileStatus::Modified);
    }

    #[test]
    fn test_removed_line_that_looks_like_header() {
        // "--- a" and "+++ b" here are content: the hunk still expects lines
        let document = parse_diff(
            "diff --git a/notes.md b/notes.md\n--- a/notes.md\n+++ b/notes.md\n@@ -1,2 +1,2 @@\n--- a\n+++ b\n ctx\n",
        );
        let file = &document.files()[0];

        assert_eq!(file.old_path.as_deref(), Some("notes.md"));
        assert_eq!(
            file.hunks[0].lines,
            vec![
                line(LineKind::Removed, "-- a", Some(1), None),
                line(LineKind::Added, "++ b", None, Some(1)),
                line(LineKind::Context, "ctx", Some(2), Some(2)),
            ]
        );
    }

    #[test]
    fn test_content_without_file_header_is_kept() {
        let document = parse_diff("@@ -1,2 +1,2 @@\n keep\n-drop\n+add\n");
        let file = &document.files()[0];

        assert_eq!(file.old_path.as_deref(), Some(""));
        assert_eq!(file.new_path.as_deref(), Some(""));
        assert_eq!(file.status, FileStatus::Modified);
        assert_eq!(file.hunks[0].lines.len(), 3);
        assert_eq!(document.summary().insertions, 1);
    }

    #[test]
    fn test_malformed_hunk_header_is_skipped() {
        let document = parse_diff(
            "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ not a header @@\n+orphan\n@@ -1 +1 @@\n-a\n+b\n",
        );
        let file = &document.files()[0];

        assert_eq!(file.hunks.len(), 1);
        assert_eq!(file.hunks[0].lines.len(), 2);
        assert_eq!(document.summary().insertions, 1);
    }

    #[test]
    fn test_malformed_header_inside_hunk_does_not_split_it() {
        let document = parse_diff(
            "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -1,2 +1,2 @@\n-a\n@@ broken\n+b\n c\n",
        );
        let file = &document.files()[0];

        assert_eq!(file.hunks.len(), 1);
        assert_eq!(file.hunks[0].lines.len(), 3);
    }

    #[test]
    fn test_line_numbers_saturate_at_u32_max() {
        let document = parse_diff(
            "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -4294967295,2 +1 @@\n-a\n-b\n+c\n",
        );
        let hunk = &document.files()[0].hunks[0];

        assert_eq!(hunk.old_start, u32::MAX);
        assert_eq!(
            hunk.lines,
            vec![
                line(LineKind::Removed, "a", Some(u32::MAX), None),
                line(LineKind::Removed, "b", Some(u32::MAX), None),
                line(LineKind::Added, "c", None, Some(1)),
            ]
        );
        assert_eq!(document.summary().deletions, 2);
    }

    #[test]
    fn test_hunk_header_with_oversized_numbers_is_skipped() {
        for header in ["@@ -99999999999,2 +1,2 @@", "@@ -1,2 +1,99999999999 @@"] {
            let document = parse_diff(&format!(
                "diff --git a/x b/x\n--- a/x\n+++ b/x\n{header}\n-a\n+b\n@@ -7 +7 @@\n-c\n+d\n"
            ));
            let file = &document.files()[0];

            assert_eq!(file.hunks.len(), 1, "{header}");
            assert_eq!(file.hunks[0].old_start, 7);
            assert_eq!(
                file.hunks[0].lines,
                vec![
                    line(LineKind::Removed, "c", Some(7), None),
                    line(LineKind::Added, "d", None, Some(7)),
                ]
            );
            assert_eq!(document.summary(), DiffSummary::from_files(document.files()));
        }
    }

    #[test]
    fn test_format_patch_signature_is_not_content() {
        let document = parse_diff(
            "\
From 1a2b3c4d Mon Sep 17 00:00:00 2001
From: Dev <dev@example.com>
Subject: [PATCH] Fix greeting

---
 hello.txt | 2 +-
 1 file changed, 1 insertion(+), 1 deletion(-)

diff --git a/hello.txt b/hello.txt
index 1111111..2222222 100644
--- a/hello.txt
+++ b/hello.txt
@@ -1 +1 @@
-hello
+hello, world
-- 
2.43.0

",
        );
        let file = &document.files()[0];

        assert_eq!(document.files().len(), 1);
        assert_eq!(file.path(), "hello.txt");
        assert_eq!(
            file.hunks[0].lines,
            vec![
                line(LineKind::Removed, "hello", Some(1), None),
                line(LineKind::Added, "hello, world", None, Some(1)),
            ]
        );
        assert_eq!(
            document.summary(),
            DiffSummary {
                files_changed: 1,
                insertions: 1,
                deletions: 1,
            }
        );
    }

    #[test]
    fn test_parse_no_prefix_git_diff() {
        let real_diff = r#"diff --git test.txt test.txt
index 6643ba4..0b4147a 100644
--- test.txt
+++ test.txt
@@ -1,5 +1,6 @@
-This is the original file.
+This is the MODIFIED file.
 It has multiple lines.
-Some content here.
+Some NEW content here.
 More content.
+Additional line added.
 Final line."#;

        let document = parse_diff(real_diff);
        let file = &document.files()[0];

        assert_eq!(file.path(), "test.txt");
        assert_eq!(file.status, FileStatus::Modified);

        let added: Vec<_> = file.hunks[0]
            .lines
            .iter()
            .filter(|l| l.kind == LineKind::Added)
            .map(|l| l.content.as_str())
            .collect();
        assert_eq!(
            added,
            vec![
                "This is the MODIFIED file.",
                "Some NEW content here.",
                "Additional line added."
            ]
        );
    }

    #[test]
    fn test_plain_unified_diff_with_timestamps() {
        let document = parse_diff(
            "\
--- a.txt\t2024-01-01 10:00:00.000000000 +0000
+++ a.txt\t2024-01-02 10:00:00.000000000 +0000
@@ -1 +1 @@
-one
+uno
--- b.txt\t2024-01-01 10:00:00.000000000 +0000
+++ b.txt\t2024-01-02 10:00:00.000000000 +0000
@@ -1 +1 @@
-two
+dos
",
        );
        let files = document.files();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path(), "a.txt");
        assert_eq!(files[1].path(), "b.txt");
        assert_eq!(files[1].hunks[0].lines[1].content, "dos");
    }

    #[test]
    fn test_line_numbers_increase_per_side() {
        let document = parse_diff(MULTI_FILE_DIFF);

        for file in document.files() {
            for hunk in &file.hunks {
                let old: Vec<u32> = hunk.lines.iter().filter_map(|l| l.old_line_num).collect();
                let new: Vec<u32> = hunk.lines.iter().filter_map(|l| l.new_line_num).collect();
                assert!(old.windows(2).all(|w| w[0] < w[1]));
                assert!(new.windows(2).all(|w| w[0] < w[1]));

                for line in &hunk.lines {
                    match line.kind {
                        LineKind::Added => {
                            assert!(line.old_line_num.is_none() && line.new_line_num.is_some())
                        }
                        LineKind::Removed => {
                            assert!(line.old_line_num.is_some() && line.new_line_num.is_none())
                        }
                        LineKind::Context => {
                            assert!(line.old_line_num.is_some() && line.new_line_num.is_some())
                        }
                    }
                }
            }
        }
    }
}
