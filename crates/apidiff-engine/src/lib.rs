//! Structural diff and compatibility classification for apidiff.
//!
//! Given an old and a new declaration paired by `(name, kind)`, the
//! [`DiffEngine`] compares their documentation tags and their structure and
//! emits one [`DiffEvent`] per difference. Every event carries a
//! [`DiffCategory`], and every category has a fixed compatibility verdict.
//!
//! # Key Types
//!
//! - [`DiffEngine`] -- Kind dispatcher and entry point
//! - [`DiffEvent`] / [`EventSink`] -- Classified differences and their accumulator
//! - [`DiffCategory`] -- Closed event taxonomy with `is_compatible()`
//! - [`MemberAligner`] / [`PositionalAligner`] -- How member lists are lined up
//! - [`TextDelta`] -- Line diff of an event's old/new text for display

pub mod align;
pub mod category;
pub mod config;
mod decl_diff;
mod doc_diff;
pub mod engine;
pub mod error;
pub mod event;
pub mod text_diff;

pub use align::{MemberAligner, PositionalAligner, Slot};
pub use category::DiffCategory;
pub use config::EngineConfig;
pub use engine::DiffEngine;
pub use error::{EngineError, EngineResult};
pub use event::{DiffEvent, EventSink};
pub use text_diff::{diff_text, DeltaLine, TextDelta, TextHunk};
