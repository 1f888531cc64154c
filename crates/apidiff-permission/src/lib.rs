//! Permission expression comparison for apidiff.
//!
//! A `@permission` tag guards an API with a boolean formula over permission
//! identifiers (`ohos.permission.A and (ohos.permission.B or ohos.permission.C)`).
//! This crate parses such formulas into an explicit [`Expr`] tree and decides
//! how the set of accepted permission states changed between two versions by
//! exhaustive truth-table enumeration.
//!
//! # Quick Start
//!
//! ```rust
//! use apidiff_permission::{compare_permissions, RangeChange};
//!
//! let result = compare_permissions("A", "A or B").unwrap();
//! assert_eq!(result.range_change, RangeChange::Widened);
//! assert_eq!(result.variables, vec!["A".to_string(), "B".to_string()]);
//! ```

pub mod compare;
pub mod error;
pub mod expr;
pub mod lexer;

pub use compare::{
    compare_permissions, PermissionComparator, PermissionComparison, RangeChange, State,
    DEFAULT_MAX_VARIABLES, MAX_VARIABLES_LIMIT,
};
pub use error::{PermissionError, PermissionResult};
pub use expr::Expr;
pub use lexer::{tokenize, Token};
