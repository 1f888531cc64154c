//! Where declaration trees come from.
//!
//! The scanner never parses headers itself; it hands every candidate file to
//! a [`DeclarationSource`]. [`JsonTreeSource`] reads the JSON dumps written by
//! a libclang-based front-end. A source that runs a real header parser can be
//! plugged in the same way.

use std::path::Path;

use apidiff_types::{parse_forest, Node};

use crate::error::{ScanError, ScanResult};

/// Produces the declaration forest of one file.
pub trait DeclarationSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether `path` is a file this source can load.
    fn accepts(&self, path: &Path) -> bool;

    /// Decode the forest of `path` from its raw `contents`.
    fn load(&self, path: &Path, contents: &[u8]) -> ScanResult<Vec<Node>>;
}

/// Reads front-end JSON dumps (one root node or an array of roots).
#[derive(Clone, Debug)]
pub struct JsonTreeSource {
    extensions: Vec<String>,
}

impl JsonTreeSource {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }
}

impl Default for JsonTreeSource {
    fn default() -> Self {
        Self::new(vec!["json".to_string()])
    }
}

impl DeclarationSource for JsonTreeSource {
    fn name(&self) -> &'static str {
        "json"
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn load(&self, path: &Path, contents: &[u8]) -> ScanResult<Vec<Node>> {
        let text = std::str::from_utf8(contents).map_err(|e| ScanError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        parse_forest(text).map_err(|e| ScanError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
