//! Doxygen-style block comment parser.
//!
//! A raw comment may hold several `/** ... */` blocks (a file header usually
//! carries an `@addtogroup` block followed by an `@file` block). Each block is
//! parsed independently into free description text plus an ordered tag list.

use serde::{Deserialize, Serialize};

use crate::tag::{Tag, TagKind};

/// One `/** ... */` documentation block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlock {
    /// Text before the first tag.
    pub description: String,
    /// Tags in source order.
    pub tags: Vec<Tag>,
}

impl DocBlock {
    /// Tags of the given kind, in source order.
    pub fn tags_of<'a>(&'a self, kind: &'a TagKind) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| &t.kind == kind)
    }
}

/// Split raw comment text into documentation blocks.
///
/// Text outside `/**` / `/*!` openers is ignored. An unterminated block runs
/// to the end of the input.
pub fn parse_comment(raw: &str) -> Vec<DocBlock> {
    let mut blocks = Vec::new();
    let mut rest = raw;

    while let Some(start) = find_opener(rest) {
        let body_start = start + 3;
        let (body, next) = match rest[body_start..].find("*/") {
            Some(end) => (
                &rest[body_start..body_start + end],
                &rest[body_start + end + 2..],
            ),
            None => (&rest[body_start..], ""),
        };
        blocks.push(parse_block(body));
        rest = next;
    }

    blocks
}

fn find_opener(text: &str) -> Option<usize> {
    let doc = text.find("/**");
    let bang = text.find("/*!");
    match (doc, bang) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn parse_block(body: &str) -> DocBlock {
    let mut block = DocBlock::default();
    let mut current: Option<Tag> = None;

    for line in body.lines() {
        let line = strip_gutter(line);
        if line.is_empty() {
            continue;
        }

        if let Some(tag) = parse_tag_line(line) {
            if let Some(done) = current.replace(tag) {
                block.tags.push(done);
            }
            continue;
        }

        match current.as_mut() {
            Some(tag) => append(&mut tag.description, line),
            None => append(&mut block.description, line),
        }
    }

    if let Some(done) = current {
        block.tags.push(done);
    }
    block
}

/// Remove leading whitespace and the `*` gutter of a comment line.
fn strip_gutter(line: &str) -> &str {
    line.trim_start()
        .trim_start_matches('*')
        .trim()
}

fn parse_tag_line(line: &str) -> Option<Tag> {
    let after = line.strip_prefix('@').or_else(|| line.strip_prefix('\\'))?;

    // `@{` and `@}` are complete tags on their own.
    if let Some(brace) = after.chars().next().filter(|c| *c == '{' || *c == '}') {
        let remainder = after[1..].trim();
        return Some(Tag::new(
            TagKind::from_keyword(&brace.to_string()),
            "",
            remainder,
        ));
    }

    let keyword_end = after
        .find(char::is_whitespace)
        .unwrap_or(after.len());
    let keyword = &after[..keyword_end];
    if keyword.is_empty() {
        return None;
    }

    let remainder = after[keyword_end..].trim();
    let (name, description) = match remainder.split_once(char::is_whitespace) {
        Some((name, description)) => (name, description.trim()),
        None => (remainder, ""),
    };

    Some(Tag::new(TagKind::from_keyword(keyword), name, description))
}

fn append(target: &mut String, line: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_comment() {
        let raw = "/**\n * @brief Creates a buffer.\n *\n * @param config Buffer configuration.\n *        Must not be null.\n * @return Returns the buffer.\n * @permission ohos.permission.A and ohos.permission.B\n * @since 10\n */";
        let blocks = parse_comment(raw);
        assert_eq!(blocks.len(), 1);

        let tags = &blocks[0].tags;
        assert_eq!(tags.len(), 5);
        assert_eq!(tags[0], Tag::new(TagKind::Brief, "Creates", "a buffer."));
        assert_eq!(
            tags[1],
            Tag::new(TagKind::Param, "config", "Buffer configuration. Must not be null.")
        );
        assert_eq!(tags[2].kind, TagKind::Return);
        assert_eq!(
            tags[3],
            Tag::new(TagKind::Permission, "ohos.permission.A", "and ohos.permission.B")
        );
        assert_eq!(tags[4], Tag::new(TagKind::Since, "10", ""));
    }

    #[test]
    fn file_header_has_several_blocks() {
        let raw = "/**\n * @addtogroup NativeBuffer\n * @{\n * @brief Buffer API.\n */\n\n/**\n * @file native_buffer.h\n * @library libnative_buffer.so\n * @syscap SystemCapability.Graphic.Graphic2D.NativeBuffer\n * @since 9\n */";
        let blocks = parse_comment(raw);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].tags[0], Tag::new(TagKind::AddToGroup, "NativeBuffer", ""));
        assert_eq!(blocks[0].tags[1].kind, TagKind::OpenBrace);
        assert_eq!(blocks[1].tags_of(&TagKind::File).count(), 1);
        assert_eq!(blocks[1].tags_of(&TagKind::Since).next().unwrap().name, "9");
    }

    #[test]
    fn description_before_tags() {
        let blocks = parse_comment("/** Opaque handle.\n * Second line. */");
        assert_eq!(blocks[0].description, "Opaque handle. Second line.");
        assert!(blocks[0].tags.is_empty());
    }

    #[test]
    fn close_brace_block() {
        let blocks = parse_comment("/** @} */");
        assert_eq!(blocks[0].tags, vec![Tag::new(TagKind::CloseBrace, "", "")]);
    }

    #[test]
    fn unknown_tags_are_kept_as_other() {
        let blocks = parse_comment("/** @note careful here */");
        assert_eq!(blocks[0].tags[0].kind, TagKind::Other("note".into()));
        assert_eq!(blocks[0].tags[0].name, "careful");
    }

    #[test]
    fn backslash_commands() {
        let blocks = parse_comment("/*! \\brief Short. \\n */");
        assert_eq!(blocks[0].tags[0].kind, TagKind::Brief);
    }

    #[test]
    fn plain_comments_yield_no_blocks() {
        assert!(parse_comment("// line comment").is_empty());
        assert!(parse_comment("/* regular */").is_empty());
        assert!(parse_comment("").is_empty());
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        let blocks = parse_comment("/** @since 12");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].tags[0], Tag::new(TagKind::Since, "12", ""));
    }

    #[test]
    fn bare_at_sign_is_text() {
        let blocks = parse_comment("/** mail @ example */");
        assert_eq!(blocks[0].description, "mail @ example");
    }
}
