use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a declaration inside a header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Header path, relative to the analyzed root when the front-end knows it.
    #[serde(default)]
    pub file: String,
    /// 1-based line; 0 when unknown.
    #[serde(default)]
    pub line: u32,
    /// 1-based column; 0 when unknown.
    #[serde(default)]
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Returns `true` if the front-end reported no position at all.
    pub fn is_unknown(&self) -> bool {
        self.file.is_empty() && self.line == 0 && self.column == 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
