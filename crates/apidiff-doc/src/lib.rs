//! Documentation comment parsing for apidiff.
//!
//! Turns a declaration's raw comment text into an ordered list of
//! [`DocBlock`]s, each carrying the [`Tag`]s the tag differ compares.
//! Parsing never fails: malformed lines degrade to empty names and
//! descriptions.

pub mod parser;
pub mod tag;

pub use parser::{parse_comment, DocBlock};
pub use tag::{Tag, TagKind};
