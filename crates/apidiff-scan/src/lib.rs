//! Tree pairing orchestrator for apidiff.
//!
//! Walks an old and a new directory of declaration dumps side by side.
//! Files present on one side only report every declaration as added or
//! removed; files present on both sides with different content are keyed
//! by `(name, kind)` and handed pair by pair to the
//! [`DiffEngine`](apidiff_engine::DiffEngine).
//!
//! # Key Types
//!
//! - [`Scanner`] -- Directory walker and per-file driver
//! - [`DiffReport`] -- Events of a run plus the units that were skipped
//! - [`DeclarationSource`] / [`JsonTreeSource`] -- Seam to the header front-end
//! - [`ContentDigest`] -- BLAKE3 digest used to skip unchanged files

pub mod config;
pub mod digest;
pub mod error;
pub mod flatten;
pub mod report;
pub mod scanner;
pub mod source;

pub use config::ScanConfig;
pub use digest::ContentDigest;
pub use error::{ScanError, ScanResult};
pub use flatten::{diff_forests, flatten, report_one_sided};
pub use report::{DiffReport, SkippedUnit};
pub use scanner::Scanner;
pub use source::{DeclarationSource, JsonTreeSource};
