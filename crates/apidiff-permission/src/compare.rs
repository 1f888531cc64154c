//! Range comparison between two permission expressions.
//!
//! The comparison enumerates every assignment of the combined identifier
//! set in binary-counted order (the first identifier is the most
//! significant bit) and checks both implications:
//!
//! - `old -> new` failing means some state accepted before is now rejected
//!   (the range narrowed);
//! - `new -> old` failing means some state rejected before is now accepted
//!   (the range widened).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PermissionError, PermissionResult};
use crate::expr::Expr;

/// Default ceiling on distinct identifiers (`2^12` states).
pub const DEFAULT_MAX_VARIABLES: usize = 12;

/// Largest ceiling a comparator accepts (`2^24` states).
pub const MAX_VARIABLES_LIMIT: usize = 24;

/// One assignment of truth values, aligned with
/// [`PermissionComparison::variables`].
pub type State = Vec<bool>;

/// How the set of accepted permission states changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeChange {
    /// Both expressions accept exactly the same states.
    Unchanged,
    /// The new expression accepts a strict superset of states.
    Widened,
    /// The new expression accepts a strict subset of states.
    Narrowed,
    /// Each expression accepts some state the other rejects.
    Ambiguous,
}

/// Outcome of comparing an old and a new permission expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionComparison {
    /// Sorted distinct identifiers of both expressions.
    pub variables: Vec<String>,
    pub range_change: RangeChange,
    /// States accepted by the old expression but rejected by the new one.
    pub narrowing_witnesses: Vec<State>,
    /// States rejected by the old expression but accepted by the new one.
    pub widening_witnesses: Vec<State>,
}

/// Comparator with a bound on the truth-table size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionComparator {
    max_variables: usize,
}

impl Default for PermissionComparator {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

impl PermissionComparator {
    /// A comparator that rejects expressions with more than `max_variables`
    /// distinct identifiers. Values above [`MAX_VARIABLES_LIMIT`] are clamped
    /// with a warning.
    pub fn new(max_variables: usize) -> Self {
        if max_variables > MAX_VARIABLES_LIMIT {
            warn!(
                requested = max_variables,
                limit = MAX_VARIABLES_LIMIT,
                "permission variable ceiling clamped"
            );
        }
        Self {
            max_variables: max_variables.min(MAX_VARIABLES_LIMIT),
        }
    }

    pub fn max_variables(&self) -> usize {
        self.max_variables
    }

    /// Compare two expression texts.
    pub fn compare(&self, old: &str, new: &str) -> PermissionResult<PermissionComparison> {
        let old_expr = Expr::parse(old)?;
        let new_expr = Expr::parse(new)?;
        self.compare_exprs(&old_expr, &new_expr)
    }

    /// Compare two parsed expressions.
    pub fn compare_exprs(&self, old: &Expr, new: &Expr) -> PermissionResult<PermissionComparison> {
        let mut names = BTreeSet::new();
        old.collect_variables(&mut names);
        new.collect_variables(&mut names);
        let variables: Vec<String> = names.into_iter().collect();

        let count = variables.len();
        if count > self.max_variables {
            return Err(PermissionError::TooManyVariables {
                count,
                limit: self.max_variables,
            });
        }

        let mut narrowing_witnesses = Vec::new();
        let mut widening_witnesses = Vec::new();

        for bits in 0..(1u64 << count) {
            let lookup = |name: &str| {
                variables
                    .binary_search_by(|v| v.as_str().cmp(name))
                    .map(|index| (bits >> (count - 1 - index)) & 1 == 1)
                    .unwrap_or(false)
            };
            let before = old.eval(&lookup);
            let after = new.eval(&lookup);

            if before && !after {
                narrowing_witnesses.push(state_of(bits, count));
            }
            if after && !before {
                widening_witnesses.push(state_of(bits, count));
            }
        }

        let range_change = match (narrowing_witnesses.is_empty(), widening_witnesses.is_empty()) {
            (true, true) => RangeChange::Unchanged,
            (true, false) => RangeChange::Widened,
            (false, true) => RangeChange::Narrowed,
            (false, false) => RangeChange::Ambiguous,
        };
        debug!(
            variables = count,
            ?range_change,
            "compared permission expressions"
        );

        Ok(PermissionComparison {
            variables,
            range_change,
            narrowing_witnesses,
            widening_witnesses,
        })
    }
}

fn state_of(bits: u64, count: usize) -> State {
    (0..count).map(|i| (bits >> (count - 1 - i)) & 1 == 1).collect()
}

/// Compare with the default variable ceiling.
pub fn compare_permissions(old: &str, new: &str) -> PermissionResult<PermissionComparison> {
    PermissionComparator::default().compare(old, new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(old: &str, new: &str) -> RangeChange {
        compare_permissions(old, new).unwrap().range_change
    }

    #[test]
    fn adding_an_alternative_widens() {
        assert_eq!(range("A", "A or B"), RangeChange::Widened);
    }

    #[test]
    fn dropping_a_conjunct_widens() {
        assert_eq!(range("A and B", "A"), RangeChange::Widened);
    }

    #[test]
    fn adding_a_conjunct_narrows() {
        assert_eq!(range("A", "A and B"), RangeChange::Narrowed);
    }

    #[test]
    fn dropping_an_alternative_narrows() {
        assert_eq!(range("X or Y", "X"), RangeChange::Narrowed);
    }

    #[test]
    fn or_to_and_narrows() {
        // Every state accepted by `A and B` is accepted by `A or B`.
        let result = compare_permissions("A or B", "A and B").unwrap();
        assert_eq!(result.range_change, RangeChange::Narrowed);
        assert!(result.widening_witnesses.is_empty());
        assert_eq!(range("A and B", "A or B"), RangeChange::Widened);
    }

    #[test]
    fn disjoint_changes_are_ambiguous() {
        assert_eq!(range("A or B", "B or C"), RangeChange::Ambiguous);
        assert_eq!(range("A", "B"), RangeChange::Ambiguous);
    }

    #[test]
    fn equivalent_rewrites_are_unchanged() {
        assert_eq!(range("A and B", "B and A"), RangeChange::Unchanged);
        assert_eq!(range("A -> B", "not A or B"), RangeChange::Unchanged);
        assert_eq!(range("A and (B or C)", "(A and B) or (A and C)"), RangeChange::Unchanged);
    }

    #[test]
    fn witnesses_follow_binary_order() {
        let result = compare_permissions("A", "A or B").unwrap();
        assert_eq!(result.variables, vec!["A", "B"]);
        // Only A=false, B=true is newly accepted.
        assert_eq!(result.widening_witnesses, vec![vec![false, true]]);
        assert!(result.narrowing_witnesses.is_empty());

        let result = compare_permissions("A or B", "A and B").unwrap();
        assert_eq!(
            result.narrowing_witnesses,
            vec![vec![false, true], vec![true, false]]
        );
    }

    #[test]
    fn variables_span_both_sides() {
        let result = compare_permissions("ohos.permission.B", "ohos.permission.A").unwrap();
        assert_eq!(result.variables, vec!["ohos.permission.A", "ohos.permission.B"]);
    }

    #[test]
    fn parse_errors_propagate() {
        assert_eq!(
            compare_permissions("(A", "A"),
            Err(PermissionError::UnbalancedParen)
        );
        assert!(compare_permissions("A", "A ^ B").is_err());
    }

    #[test]
    fn variable_ceiling_is_enforced() {
        let comparator = PermissionComparator::new(2);
        assert_eq!(
            comparator.compare("A and B", "A and C"),
            Err(PermissionError::TooManyVariables { count: 3, limit: 2 })
        );
        assert!(comparator.compare("A", "A and B").is_ok());
    }

    #[test]
    fn comparison_serializes_for_reports() {
        let result = compare_permissions("A", "A or B").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "variables": ["A", "B"],
                "range_change": "widened",
                "narrowing_witnesses": [],
                "widening_witnesses": [[false, true]],
            })
        );
        let back: PermissionComparison = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn ceiling_is_clamped() {
        assert_eq!(PermissionComparator::new(1000).max_variables(), MAX_VARIABLES_LIMIT);
        assert_eq!(PermissionComparator::new(MAX_VARIABLES_LIMIT).max_variables(), 24);
    }
}
