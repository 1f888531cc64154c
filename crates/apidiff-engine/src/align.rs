//! Pairing of ordered member lists (fields, parameters, enumerators).
//!
//! The engine asks a [`MemberAligner`] how the old and new lists line up and
//! then compares each slot. [`PositionalAligner`] pairs by index, so an
//! insertion in the middle of a list shows up as a chain of changes plus one
//! addition at the end.

use apidiff_types::Node;

/// One aligned position of two member lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Indices of an old and a new member compared with each other.
    Paired(usize, usize),
    /// An old member with no counterpart.
    Removed(usize),
    /// A new member with no counterpart.
    Added(usize),
}

/// Strategy for lining up two member lists.
pub trait MemberAligner: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Align `old` with `new`. Every index of both lists must appear in
    /// exactly one slot.
    fn align(&self, old: &[Node], new: &[Node]) -> Vec<Slot>;
}

/// Pairs members by index.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalAligner;

impl MemberAligner for PositionalAligner {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn align(&self, old: &[Node], new: &[Node]) -> Vec<Slot> {
        (0..old.len().max(new.len()))
            .map(|i| match (i < old.len(), i < new.len()) {
                (true, true) => Slot::Paired(i, i),
                (true, false) => Slot::Removed(i),
                _ => Slot::Added(i),
            })
            .collect()
    }
}
