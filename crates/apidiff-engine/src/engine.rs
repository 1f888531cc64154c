//! The kind dispatcher: entry point for comparing one paired declaration.

use std::fmt;

use apidiff_permission::PermissionComparator;
use apidiff_types::{Node, NodeKind};
use tracing::trace;

use crate::align::{MemberAligner, PositionalAligner};
use crate::category::DiffCategory;
use crate::config::EngineConfig;
use crate::decl_diff::DeclDiffer;
use crate::doc_diff::DocDiffer;
use crate::event::{DiffEvent, EventSink};

/// Compares paired declarations and classifies every difference.
///
/// The engine holds no per-run state; one instance can be shared across
/// threads and reused for any number of pairs.
pub struct DiffEngine {
    config: EngineConfig,
    comparator: PermissionComparator,
    aligner: Box<dyn MemberAligner>,
}

impl fmt::Debug for DiffEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffEngine")
            .field("config", &self.config)
            .field("aligner", &self.aligner.name())
            .finish()
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DiffEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            comparator: PermissionComparator::new(config.max_permission_variables),
            config,
            aligner: Box::new(PositionalAligner),
        }
    }

    /// Replace the member aligner.
    pub fn with_aligner(mut self, aligner: Box<dyn MemberAligner>) -> Self {
        self.aligner = aligner;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compare one paired declaration and return its events in emission order.
    pub fn diff_pair(&self, old: Option<&Node>, new: Option<&Node>) -> Vec<DiffEvent> {
        let mut sink = EventSink::new();
        self.diff_pair_into(old, new, &mut sink);
        sink.into_events()
    }

    /// Compare one paired declaration, appending to `sink`.
    ///
    /// One-sided pairs emit a single `AddApi`/`DeleteApi`. Two-sided pairs
    /// diff documentation first, then the structure selected by the new
    /// node's kind.
    pub fn diff_pair_into(&self, old: Option<&Node>, new: Option<&Node>, sink: &mut EventSink) {
        let (old, new) = match (old, new) {
            (Some(o), Some(n)) => (o, n),
            (None, Some(n)) => {
                sink.emit(DiffCategory::AddApi, None, Some(n));
                return;
            }
            (Some(o), None) => {
                sink.emit(DiffCategory::DeleteApi, Some(o), None);
                return;
            }
            (None, None) => return,
        };
        trace!(name = %new.name, kind = %new.kind, "diffing declaration");

        DocDiffer {
            comparator: &self.comparator,
        }
        .diff_comments(old, new, sink);

        let decl = DeclDiffer {
            aligner: self.aligner.as_ref(),
        };
        match new.kind {
            NodeKind::Function => decl.function(old, new, sink),
            NodeKind::Macro => decl.macro_definition(old, new, sink),
            NodeKind::Struct => decl.structure(old, new, sink),
            NodeKind::Union => decl.union(old, new, sink),
            NodeKind::Enum => decl.enumeration(old, new, sink),
            NodeKind::Variable => decl.variable(old, new, sink),
            NodeKind::Typedef => decl.typedef(old, new, sink),
            // Only reached through their parent, or carry documentation alone.
            NodeKind::TranslationUnit
            | NodeKind::Parameter
            | NodeKind::Field
            | NodeKind::EnumConstant
            | NodeKind::Expression => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use apidiff_types::Location;

    use super::*;
    use crate::align::Slot;

    fn categories(events: &[DiffEvent]) -> Vec<DiffCategory> {
        events.iter().map(|e| e.category).collect()
    }

    #[test]
    fn one_sided_pairs() {
        let engine = DiffEngine::default();
        let node = Node::new(NodeKind::Function, "f").with_location(Location::new("a.h", 1, 1));

        let added = engine.diff_pair(None, Some(&node));
        assert_eq!(categories(&added), vec![DiffCategory::AddApi]);
        assert!(added[0].is_compatible);

        let removed = engine.diff_pair(Some(&node), None);
        assert_eq!(categories(&removed), vec![DiffCategory::DeleteApi]);
        assert!(!removed[0].is_compatible);

        assert!(engine.diff_pair(None, None).is_empty());
    }

    #[test]
    fn docs_come_before_structure() {
        let engine = DiffEngine::default();
        let old = Node::new(NodeKind::Function, "f")
            .with_return_type("int")
            .with_comment("/**\n * @since 9\n */");
        let new = Node::new(NodeKind::Function, "f")
            .with_return_type("void")
            .with_comment("/**\n * @since 10\n */");
        assert_eq!(
            categories(&engine.diff_pair(Some(&old), Some(&new))),
            vec![
                DiffCategory::DocTagSinceChanged,
                DiffCategory::FunctionReturnChanged
            ]
        );
    }

    #[test]
    fn permission_ceiling_comes_from_config() {
        let engine = DiffEngine::new(EngineConfig {
            max_permission_variables: 1,
        });
        let old = Node::new(NodeKind::Function, "f").with_comment("/** @permission A */");
        let new = Node::new(NodeKind::Function, "f").with_comment("/** @permission A or B */");
        assert_eq!(
            categories(&engine.diff_pair(Some(&old), Some(&new))),
            vec![DiffCategory::DocTagPermissionUnparsable]
        );
    }

    struct ReversedAligner;

    impl MemberAligner for ReversedAligner {
        fn name(&self) -> &'static str {
            "reversed"
        }

        fn align(&self, old: &[Node], new: &[Node]) -> Vec<Slot> {
            let mut slots = PositionalAligner.align(old, new);
            slots.reverse();
            slots
        }
    }

    #[test]
    fn aligner_is_replaceable() {
        let engine = DiffEngine::default().with_aligner(Box::new(ReversedAligner));
        let field = |name: &str| Node::new(NodeKind::Field, name).with_type("int");
        let old = Node::new(NodeKind::Struct, "S").with_members(vec![field("a")]);
        let new = Node::new(NodeKind::Struct, "S").with_members(vec![field("a"), field("b")]);
        let events = engine.diff_pair(Some(&old), Some(&new));
        assert_eq!(categories(&events), vec![DiffCategory::StructMemberAdded]);
        assert!(format!("{engine:?}").contains("reversed"));
    }

    #[test]
    fn translation_units_only_compare_docs() {
        let engine = DiffEngine::default();
        let old = Node::new(NodeKind::TranslationUnit, "a.h").with_comment("/** @file a.h */");
        let new = Node::new(NodeKind::TranslationUnit, "a.h").with_comment("/** @file b.h */");
        assert_eq!(
            categories(&engine.diff_pair(Some(&old), Some(&new))),
            vec![DiffCategory::DocTagFileChanged]
        );
    }
}
