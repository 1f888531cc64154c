use serde::{Deserialize, Serialize};

/// Configuration for directory scanning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (without the dot) read as declaration dumps.
    pub extensions: Vec<String>,
    /// Skip parsing when both sides of a file have the same content digest.
    pub skip_identical: bool,
    /// Follow symbolic links when walking one-sided directories.
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["json".to_string()],
            skip_identical: true,
            follow_links: false,
        }
    }
}
