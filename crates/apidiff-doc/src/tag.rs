use std::fmt;

use serde::{Deserialize, Serialize};

/// The tag vocabulary recognized in documentation comments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    AddToGroup,
    Brief,
    Deprecated,
    File,
    Library,
    Param,
    Permission,
    Return,
    Since,
    Syscap,
    /// `@{`
    OpenBrace,
    /// `@}`
    CloseBrace,
    /// Any tag outside the vocabulary, kept verbatim.
    Other(String),
}

impl TagKind {
    /// Map a tag keyword (without the leading `@` or `\`) to its kind.
    ///
    /// Doxygen direction suffixes such as `param[in]` are ignored.
    pub fn from_keyword(keyword: &str) -> Self {
        let base = keyword.split('[').next().unwrap_or(keyword);
        match base {
            "addtogroup" => TagKind::AddToGroup,
            "brief" => TagKind::Brief,
            "deprecated" => TagKind::Deprecated,
            "file" => TagKind::File,
            "library" => TagKind::Library,
            "param" => TagKind::Param,
            "permission" => TagKind::Permission,
            "return" | "returns" => TagKind::Return,
            "since" => TagKind::Since,
            "syscap" => TagKind::Syscap,
            "{" => TagKind::OpenBrace,
            "}" => TagKind::CloseBrace,
            other => TagKind::Other(other.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            TagKind::AddToGroup => "addtogroup",
            TagKind::Brief => "brief",
            TagKind::Deprecated => "deprecated",
            TagKind::File => "file",
            TagKind::Library => "library",
            TagKind::Param => "param",
            TagKind::Permission => "permission",
            TagKind::Return => "return",
            TagKind::Since => "since",
            TagKind::Syscap => "syscap",
            TagKind::OpenBrace => "{",
            TagKind::CloseBrace => "}",
            TagKind::Other(keyword) => keyword,
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.keyword())
    }
}

/// A single documentation tag: `@kind name description...`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub kind: TagKind,
    /// First token after the keyword; empty if there is none.
    pub name: String,
    /// Remainder of the tag text, continuation lines joined with a space.
    pub description: String,
}

impl Tag {
    pub fn new(kind: TagKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Name and description joined by one space, the form most tags are
    /// compared in.
    pub fn text(&self) -> String {
        format!("{} {}", self.name, self.description)
    }
}
