//! Structural differs, one per declaration kind.
//!
//! Each differ receives a paired old/new node of the same kind and appends
//! events to the sink. Member lists are lined up by the configured
//! [`MemberAligner`].

use apidiff_types::{Node, NodeKind};

use crate::align::{MemberAligner, Slot};
use crate::category::DiffCategory;
use crate::event::{DiffEvent, EventSink};

/// Categories of a composite declaration kind.
struct MemberCategories {
    name_changed: DiffCategory,
    member_name_changed: DiffCategory,
    /// Member type change for structs/unions, value change for enums.
    member_changed: DiffCategory,
    member_added: DiffCategory,
    member_removed: DiffCategory,
}

const STRUCT: MemberCategories = MemberCategories {
    name_changed: DiffCategory::StructNameChanged,
    member_name_changed: DiffCategory::StructMemberNameChanged,
    member_changed: DiffCategory::StructMemberTypeChanged,
    member_added: DiffCategory::StructMemberAdded,
    member_removed: DiffCategory::StructMemberRemoved,
};

const UNION: MemberCategories = MemberCategories {
    name_changed: DiffCategory::UnionNameChanged,
    member_name_changed: DiffCategory::UnionMemberNameChanged,
    member_changed: DiffCategory::UnionMemberTypeChanged,
    member_added: DiffCategory::UnionMemberAdded,
    member_removed: DiffCategory::UnionMemberRemoved,
};

const ENUM: MemberCategories = MemberCategories {
    name_changed: DiffCategory::EnumNameChanged,
    member_name_changed: DiffCategory::EnumMemberNameChanged,
    member_changed: DiffCategory::EnumMemberValueChanged,
    member_added: DiffCategory::EnumMemberAdded,
    member_removed: DiffCategory::EnumMemberRemoved,
};

struct ValueCategories {
    name: DiffCategory,
    ty: DiffCategory,
    value: DiffCategory,
}

const VARIABLE: ValueCategories = ValueCategories {
    name: DiffCategory::VariableNameChanged,
    ty: DiffCategory::VariableTypeChanged,
    value: DiffCategory::VariableValueChanged,
};

const CONSTANT: ValueCategories = ValueCategories {
    name: DiffCategory::ConstantNameChanged,
    ty: DiffCategory::ConstantTypeChanged,
    value: DiffCategory::ConstantValueChanged,
};

pub(crate) struct DeclDiffer<'a> {
    pub aligner: &'a dyn MemberAligner,
}

impl DeclDiffer<'_> {
    pub fn function(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        if old.name != new.name {
            sink.emit_pair(DiffCategory::FunctionNameChanged, old, new);
        }
        if old.result_type() != new.result_type() {
            sink.emit_pair(DiffCategory::FunctionReturnChanged, old, new);
        }

        let (old_params, new_params) = match (&old.parameters, &new.parameters) {
            (Some(o), Some(n)) => (o, n),
            (None, Some(_)) => {
                sink.emit_pair(DiffCategory::FunctionParamAdded, old, new);
                return;
            }
            (Some(_), None) => {
                sink.emit_pair(DiffCategory::FunctionParamRemoved, old, new);
                return;
            }
            (None, None) => return,
        };

        for slot in self.aligner.align(old_params, new_params) {
            match slot {
                Slot::Paired(i, j) => {
                    let (o, n) = (&old_params[i], &new_params[j]);
                    if o.ty != n.ty {
                        sink.emit_pair(DiffCategory::FunctionParamTypeChanged, o, n);
                    }
                    if o.name != n.name {
                        sink.emit_pair(DiffCategory::FunctionParamNameChanged, o, n);
                    }
                }
                Slot::Added(j) => {
                    sink.emit(DiffCategory::FunctionParamAdded, None, Some(&new_params[j]))
                }
                Slot::Removed(i) => {
                    sink.emit(DiffCategory::FunctionParamRemoved, Some(&old_params[i]), None)
                }
            }
        }
    }

    pub fn structure(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        self.composite(old, new, &STRUCT, sink);
    }

    pub fn union(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        self.composite(old, new, &UNION, sink);
    }

    fn composite(&self, old: &Node, new: &Node, categories: &MemberCategories, sink: &mut EventSink) {
        if old.name != new.name {
            sink.emit_pair(categories.name_changed, old, new);
        }

        self.members(old, new, categories, sink, |o, n, sink| {
            if o.kind == n.kind {
                self.nested(o, n, sink);
            }
            if o.ty != n.ty {
                sink.emit_pair(categories.member_changed, o, n);
            }
            if o.name != n.name {
                sink.emit_pair(categories.member_name_changed, o, n);
            }
        });
    }

    pub fn enumeration(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        if old.name != new.name {
            sink.emit_pair(ENUM.name_changed, old, new);
        }

        self.members(old, new, &ENUM, sink, |o, n, sink| {
            if o.enum_value != n.enum_value {
                sink.emit_pair(ENUM.member_changed, o, n);
            }
            if o.name != n.name {
                sink.emit_pair(ENUM.member_name_changed, o, n);
            }
        });
    }

    /// Walk the member lists of two composites, handing each paired slot to
    /// `compare` and reporting the surplus of either side.
    fn members<F>(
        &self,
        old: &Node,
        new: &Node,
        categories: &MemberCategories,
        sink: &mut EventSink,
        mut compare: F,
    ) where
        F: FnMut(&Node, &Node, &mut EventSink),
    {
        let (old_members, new_members) = match (&old.members, &new.members) {
            (Some(o), Some(n)) => (o, n),
            (None, Some(_)) => {
                sink.emit_pair(categories.member_added, old, new);
                return;
            }
            (Some(_), None) => {
                sink.emit_pair(categories.member_removed, old, new);
                return;
            }
            (None, None) => return,
        };

        for slot in self.aligner.align(old_members, new_members) {
            match slot {
                Slot::Paired(i, j) => compare(&old_members[i], &new_members[j], sink),
                Slot::Added(j) => sink.emit(categories.member_added, None, Some(&new_members[j])),
                Slot::Removed(i) => sink.emit(categories.member_removed, Some(&old_members[i]), None),
            }
        }
    }

    /// Recurse into a nested composite declared inline as a member.
    fn nested(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        match new.kind {
            NodeKind::Struct => self.structure(old, new, sink),
            NodeKind::Union => self.union(old, new, sink),
            NodeKind::Enum => self.enumeration(old, new, sink),
            NodeKind::Function
            | NodeKind::Macro
            | NodeKind::Variable
            | NodeKind::Typedef
            | NodeKind::Parameter
            | NodeKind::Field
            | NodeKind::EnumConstant
            | NodeKind::TranslationUnit
            | NodeKind::Expression => {}
        }
    }

    /// Variables and constants, split on the old side's `is_const`.
    pub fn variable(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        let categories = if old.is_const { &CONSTANT } else { &VARIABLE };

        if old.name != new.name {
            sink.emit_pair(categories.name, old, new);
        }
        if old.ty != new.ty {
            sink.emit_pair(categories.ty, old, new);
        }

        let old_value = old.initializer().map(|n| n.raw_text.as_str());
        let new_value = new.initializer().map(|n| n.raw_text.as_str());
        if old_value != new_value {
            if let Some(event) = DiffEvent::new(categories.value, Some(old), Some(new)) {
                sink.push(event.with_texts(
                    old_value.unwrap_or_default(),
                    new_value.unwrap_or_default(),
                ));
            }
        }
    }

    pub fn macro_definition(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        if old.name != new.name {
            sink.emit_pair(DiffCategory::MacroNameChanged, old, new);
        }
        if old.macro_text != new.macro_text {
            sink.emit_pair(DiffCategory::MacroTextChanged, old, new);
        }
    }

    /// Typedefs recurse only into a single anonymous composite of the same
    /// kind on both sides (`typedef struct { ... } Name;`).
    pub fn typedef(&self, old: &Node, new: &Node, sink: &mut EventSink) {
        if old.name != new.name {
            sink.emit_pair(DiffCategory::TypedefNameChanged, old, new);
        }

        if let ([o], [n]) = (old.child_nodes(), new.child_nodes()) {
            if o.kind == n.kind && o.kind.is_composite() && o.is_anonymous() && n.is_anonymous() {
                self.nested(o, n, sink);
            }
        }
    }
}
