//! Foundation types for apidiff.
//!
//! A header's API surface reaches the diff engine as a forest of [`Node`]s
//! produced by an external front-end. Every other apidiff crate depends on
//! `apidiff-types`.
//!
//! # Key Types
//!
//! - [`Node`] -- One declaration or sub-declaration, immutable for the run
//! - [`NodeKind`] -- Closed set of declaration kinds
//! - [`DeclKey`] -- `(name, kind)` identity used to pair old and new declarations
//! - [`Location`] -- Source position reported by the front-end

pub mod error;
pub mod kind;
pub mod location;
pub mod node;

pub use error::{TypeError, TypeResult};
pub use kind::NodeKind;
pub use location::Location;
pub use node::{parse_forest, DeclKey, Node, NO_COMMENT};
