use std::collections::BTreeMap;
use std::path::PathBuf;

use apidiff_engine::{DiffCategory, DiffEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file or directory the scan could not process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedUnit {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of comparing two directory forests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiffReport {
    pub old_root: PathBuf,
    pub new_root: PathBuf,
    pub generated_at: DateTime<Utc>,
    /// Files present on both sides whose declarations were compared.
    pub files_compared: usize,
    /// Files present on one side only.
    pub files_one_sided: usize,
    pub events: Vec<DiffEvent>,
    pub skipped: Vec<SkippedUnit>,
}

impl DiffReport {
    pub fn new(old_root: impl Into<PathBuf>, new_root: impl Into<PathBuf>) -> Self {
        Self {
            old_root: old_root.into(),
            new_root: new_root.into(),
            generated_at: Utc::now(),
            files_compared: 0,
            files_one_sided: 0,
            events: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn breaking(&self) -> impl Iterator<Item = &DiffEvent> {
        self.events.iter().filter(|e| !e.is_compatible)
    }

    pub fn compatible(&self) -> impl Iterator<Item = &DiffEvent> {
        self.events.iter().filter(|e| e.is_compatible)
    }

    /// Returns `true` if no event breaks compatibility.
    pub fn is_compatible(&self) -> bool {
        self.breaking().next().is_none()
    }

    pub fn count_by_category(&self) -> BTreeMap<DiffCategory, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            *counts.entry(event.category).or_insert(0) += 1;
        }
        counts
    }
}
