//! Line diff of the declaration text carried by an event.
//!
//! Reports show `old_text`/`new_text` side by side; this renders them as
//! hunks with context lines using `similar` (Myers).

use similar::{ChangeTag, TextDiff as SimilarDiff};

/// A line diff between two declaration texts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextDelta {
    pub hunks: Vec<TextHunk>,
}

impl TextDelta {
    /// Returns `true` if both texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    pub fn additions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DeltaLine::Added(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DeltaLine::Removed(_)))
            .count()
    }

    /// Every line of every hunk, in order.
    pub fn lines(&self) -> impl Iterator<Item = &DeltaLine> {
        self.hunks.iter().flat_map(|h| &h.lines)
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextHunk {
    /// 1-based line in the old text where the hunk starts.
    pub old_start: usize,
    /// 1-based line in the new text where the hunk starts.
    pub new_start: usize,
    pub lines: Vec<DeltaLine>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeltaLine {
    Context(String),
    Added(String),
    Removed(String),
}

/// Diff two texts line by line with `context` lines around each change.
pub fn diff_text(old: &str, new: &str, context: usize) -> TextDelta {
    if old == new {
        return TextDelta::default();
    }

    let diff = SimilarDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in diff.grouped_ops(context) {
        let Some(first) = group.first() else {
            continue;
        };
        let mut hunk = TextHunk {
            old_start: first.old_range().start + 1,
            new_start: first.new_range().start + 1,
            lines: Vec::new(),
        };

        for op in &group {
            for change in diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                hunk.lines.push(match change.tag() {
                    ChangeTag::Equal => DeltaLine::Context(text),
                    ChangeTag::Delete => DeltaLine::Removed(text),
                    ChangeTag::Insert => DeltaLine::Added(text),
                });
            }
        }
        hunks.push(hunk);
    }

    TextDelta { hunks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_have_no_hunks() {
        let delta = diff_text("int f(void);", "int f(void);", 3);
        assert!(delta.is_empty());
        assert_eq!(delta.additions(), 0);
    }

    #[test]
    fn changed_signature() {
        let delta = diff_text("int F(int x);\n", "long F(int x, int y);\n", 3);
        assert_eq!(delta.hunks.len(), 1);
        assert_eq!(delta.additions(), 1);
        assert_eq!(delta.deletions(), 1);
        assert_eq!(
            delta.hunks[0].lines,
            vec![
                DeltaLine::Removed("int F(int x);".into()),
                DeltaLine::Added("long F(int x, int y);".into()),
            ]
        );
    }

    #[test]
    fn member_added_inside_struct() {
        let old = "struct S {\n    int a;\n    int b;\n};\n";
        let new = "struct S {\n    int a;\n    float b;\n    int c;\n};\n";
        let delta = diff_text(old, new, 1);
        assert_eq!(delta.additions(), 2);
        assert_eq!(delta.deletions(), 1);
        assert_eq!(delta.hunks[0].old_start, 2);
        assert!(matches!(delta.hunks[0].lines[0], DeltaLine::Context(_)));
    }

    #[test]
    fn empty_side() {
        let delta = diff_text("", "#define A 1\n", 3);
        assert_eq!(delta.additions(), 1);
        assert_eq!(delta.deletions(), 0);
    }
}
