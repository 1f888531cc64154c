//! Keying a forest by declaration identity and diffing two keyed forests.

use std::collections::{BTreeMap, BTreeSet};

use apidiff_engine::{DiffEngine, EventSink};
use apidiff_types::{DeclKey, Node};

/// Key every pairable declaration of a forest by `(name, kind)`.
///
/// Each root's named direct children are keyed first (first occurrence
/// wins), then the root itself. Unnamed children are not paired.
pub fn flatten(forest: &[Node]) -> BTreeMap<DeclKey, &Node> {
    let mut map = BTreeMap::new();
    for root in forest {
        for child in root.child_nodes().iter().filter(|c| !c.is_anonymous()) {
            map.entry(child.key()).or_insert(child);
        }
        map.entry(root.key()).or_insert(root);
    }
    map
}

/// Diff two forests of the same file, in key order.
pub fn diff_forests(engine: &DiffEngine, old: &[Node], new: &[Node], sink: &mut EventSink) {
    let old_map = flatten(old);
    let new_map = flatten(new);
    let keys: BTreeSet<&DeclKey> = old_map.keys().chain(new_map.keys()).collect();

    for key in keys {
        let old_decl = old_map.get(key).copied();
        let new_decl = new_map.get(key).copied();
        engine.diff_pair_into(old_decl, new_decl, sink);
    }
}

/// Report every declaration of a one-sided forest as added (`added` is
/// `true`) or removed.
pub fn report_one_sided(engine: &DiffEngine, forest: &[Node], added: bool, sink: &mut EventSink) {
    for decl in flatten(forest).into_values() {
        if added {
            engine.diff_pair_into(None, Some(decl), sink);
        } else {
            engine.diff_pair_into(Some(decl), None, sink);
        }
    }
}
