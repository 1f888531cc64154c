//! Documentation comment and tag comparison.

use std::collections::{BTreeMap, BTreeSet};

use apidiff_doc::{parse_comment, DocBlock, Tag, TagKind};
use apidiff_permission::{PermissionComparator, RangeChange};
use apidiff_types::{Node, NodeKind};
use tracing::{debug, warn};

use crate::category::DiffCategory;
use crate::event::{DiffEvent, EventSink};

/// Categories emitted for a tag compared by its full text.
struct TextTag {
    added: DiffCategory,
    removed: DiffCategory,
    changed: DiffCategory,
}

const ADD_TO_GROUP: TextTag = TextTag {
    added: DiffCategory::DocTagAddToGroupAdded,
    removed: DiffCategory::DocTagAddToGroupRemoved,
    changed: DiffCategory::DocTagAddToGroupChanged,
};
const BRIEF: TextTag = TextTag {
    added: DiffCategory::DocTagBriefAdded,
    removed: DiffCategory::DocTagBriefRemoved,
    changed: DiffCategory::DocTagBriefChanged,
};
const DEPRECATED: TextTag = TextTag {
    added: DiffCategory::DocTagDeprecatedAdded,
    removed: DiffCategory::DocTagDeprecatedRemoved,
    changed: DiffCategory::DocTagDeprecatedChanged,
};
const FILE: TextTag = TextTag {
    added: DiffCategory::DocTagFileAdded,
    removed: DiffCategory::DocTagFileRemoved,
    changed: DiffCategory::DocTagFileChanged,
};
const LIBRARY: TextTag = TextTag {
    added: DiffCategory::DocTagLibraryAdded,
    removed: DiffCategory::DocTagLibraryRemoved,
    changed: DiffCategory::DocTagLibraryChanged,
};
const SINCE: TextTag = TextTag {
    added: DiffCategory::DocTagSinceAdded,
    removed: DiffCategory::DocTagSinceRemoved,
    changed: DiffCategory::DocTagSinceChanged,
};
const SYSCAP: TextTag = TextTag {
    added: DiffCategory::DocTagSyscapAdded,
    removed: DiffCategory::DocTagSyscapRemoved,
    changed: DiffCategory::DocTagSyscapChanged,
};

/// Compares the documentation attached to a paired declaration.
pub(crate) struct DocDiffer<'a> {
    pub comparator: &'a PermissionComparator,
}

impl DocDiffer<'_> {
    /// Compare the comments of two paired nodes.
    ///
    /// A presence transition emits `AddDoc`/`ReduceDoc` and stops there.
    /// Translation units pair their blocks by position; any other node with
    /// differing block counts gets one `AddDoc`/`ReduceDoc`, and with equal
    /// counts only the last blocks are compared.
    pub fn diff_comments(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        let (old_raw, new_raw) = match (old.comment(), new.comment()) {
            (o, n) if o == n => return,
            (None, Some(_)) => {
                sink.emit_pair(DiffCategory::AddDoc, old, new);
                return;
            }
            (Some(_), None) => {
                sink.emit_pair(DiffCategory::ReduceDoc, old, new);
                return;
            }
            (Some(o), Some(n)) => (o, n),
            (None, None) => return,
        };

        let old_blocks = parse_comment(old_raw);
        let new_blocks = parse_comment(new_raw);

        if new.kind == NodeKind::TranslationUnit {
            for (o, n) in old_blocks.iter().zip(&new_blocks) {
                self.diff_blocks(o, n, old, new, sink);
            }
            if new_blocks.len() > old_blocks.len() {
                sink.emit_pair(DiffCategory::AddDoc, old, new);
            } else if old_blocks.len() > new_blocks.len() {
                sink.emit_pair(DiffCategory::ReduceDoc, old, new);
            }
            return;
        }

        if new_blocks.len() > old_blocks.len() {
            sink.emit_pair(DiffCategory::AddDoc, old, new);
        } else if old_blocks.len() > new_blocks.len() {
            sink.emit_pair(DiffCategory::ReduceDoc, old, new);
        } else if let (Some(o), Some(n)) = (old_blocks.last(), new_blocks.last()) {
            self.diff_blocks(o, n, old, new, sink);
        }
    }

    /// Compare the tags of two blocks, grouped by kind and paired by
    /// position within each group.
    pub fn diff_blocks(
        &self,
        old_block: &DocBlock,
        new_block: &DocBlock,
        old: &Node,
        new: &Node,
        sink: &mut EventSink,
    ) {
        let old_groups = group_by_kind(old_block);
        let new_groups = group_by_kind(new_block);
        let kinds: BTreeSet<&TagKind> = old_groups.keys().chain(new_groups.keys()).copied().collect();

        for kind in kinds {
            let old_tags = old_groups.get(kind).map(Vec::as_slice).unwrap_or(&[]);
            let new_tags = new_groups.get(kind).map(Vec::as_slice).unwrap_or(&[]);
            for i in 0..old_tags.len().max(new_tags.len()) {
                let pair = TagPair {
                    old_tag: old_tags.get(i).copied(),
                    new_tag: new_tags.get(i).copied(),
                    old,
                    new,
                };
                self.diff_tag(kind, &pair, sink);
            }
        }
    }

    fn diff_tag(&self, kind: &TagKind, pair: &TagPair<'_>, sink: &mut EventSink) {
        match kind {
            TagKind::AddToGroup => pair.text(&ADD_TO_GROUP, sink),
            TagKind::Brief => pair.text(&BRIEF, sink),
            TagKind::Deprecated => pair.text(&DEPRECATED, sink),
            TagKind::File => pair.text(&FILE, sink),
            TagKind::Library => pair.text(&LIBRARY, sink),
            TagKind::Since => pair.text(&SINCE, sink),
            TagKind::Syscap => pair.text(&SYSCAP, sink),
            TagKind::Param => {
                let both = pair.presence(
                    DiffCategory::DocTagParamAdded,
                    DiffCategory::DocTagParamRemoved,
                    sink,
                );
                if let Some((o, n)) = both {
                    if o.name != n.name {
                        pair.emit(DiffCategory::DocTagParamNameChanged, sink);
                    }
                    if o.description != n.description {
                        pair.emit(DiffCategory::DocTagParamDescriptionChanged, sink);
                    }
                }
            }
            TagKind::Permission => {
                let both = pair.presence(
                    DiffCategory::DocTagPermissionAdded,
                    DiffCategory::DocTagPermissionRemoved,
                    sink,
                );
                if let Some((o, n)) = both {
                    self.diff_permission(o, n, pair, sink);
                }
            }
            TagKind::OpenBrace => {
                pair.presence(
                    DiffCategory::DocTagOpenBraceAdded,
                    DiffCategory::DocTagOpenBraceRemoved,
                    sink,
                );
            }
            TagKind::CloseBrace => {
                pair.presence(
                    DiffCategory::DocTagCloseBraceAdded,
                    DiffCategory::DocTagCloseBraceRemoved,
                    sink,
                );
            }
            TagKind::Return | TagKind::Other(_) => {}
        }
    }

    fn diff_permission(&self, old_tag: &Tag, new_tag: &Tag, pair: &TagPair<'_>, sink: &mut EventSink) {
        let old_text = old_tag.text();
        let new_text = new_tag.text();
        let (old_text, new_text) = (old_text.trim(), new_text.trim());
        if old_text == new_text {
            return;
        }

        let category = match self.comparator.compare(old_text, new_text) {
            Ok(result) => match result.range_change {
                RangeChange::Unchanged => {
                    debug!(api = %pair.new.name, "permission rewritten without range change");
                    return;
                }
                RangeChange::Widened => DiffCategory::DocTagPermissionIncreased,
                RangeChange::Narrowed => DiffCategory::DocTagPermissionDecreased,
                RangeChange::Ambiguous => DiffCategory::DocTagPermissionChanged,
            },
            Err(err) => {
                warn!(
                    api = %pair.new.name,
                    old = old_text,
                    new = new_text,
                    error = %err,
                    "cannot compare permission expressions"
                );
                if let Some(event) =
                    DiffEvent::new(DiffCategory::DocTagPermissionUnparsable, Some(pair.old), Some(pair.new))
                {
                    sink.push(event.with_detail(err.to_string()));
                }
                return;
            }
        };
        pair.emit(category, sink);
    }
}

/// One aligned tag position together with the declarations it belongs to.
struct TagPair<'a> {
    old_tag: Option<&'a Tag>,
    new_tag: Option<&'a Tag>,
    old: &'a Node,
    new: &'a Node,
}

impl<'a> TagPair<'a> {
    fn emit(&self, category: DiffCategory, sink: &mut EventSink) {
        sink.emit_pair(category, self.old, self.new);
    }

    /// Emit a presence transition; returns both tags when both are present.
    fn presence(
        &self,
        added: DiffCategory,
        removed: DiffCategory,
        sink: &mut EventSink,
    ) -> Option<(&'a Tag, &'a Tag)> {
        match (self.old_tag, self.new_tag) {
            (Some(o), Some(n)) => Some((o, n)),
            (None, Some(_)) => {
                self.emit(added, sink);
                None
            }
            (Some(_), None) => {
                self.emit(removed, sink);
                None
            }
            (None, None) => None,
        }
    }

    fn text(&self, categories: &TextTag, sink: &mut EventSink) {
        if let Some((o, n)) = self.presence(categories.added, categories.removed, sink) {
            if o.text() != n.text() {
                self.emit(categories.changed, sink);
            }
        }
    }
}

fn group_by_kind(block: &DocBlock) -> BTreeMap<&TagKind, Vec<&Tag>> {
    let mut groups: BTreeMap<&TagKind, Vec<&Tag>> = BTreeMap::new();
    for tag in &block.tags {
        groups.entry(&tag.kind).or_default().push(tag);
    }
    groups
}
