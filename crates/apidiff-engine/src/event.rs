//! Diff events and the sink they are collected into.

use apidiff_types::{Location, Node, NodeKind};
use serde::{Deserialize, Serialize};

use crate::category::DiffCategory;

/// One classified difference between an old and a new declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEvent {
    /// Name of the declaration the event is about.
    pub api_name: String,
    pub api_kind: NodeKind,
    pub category: DiffCategory,
    pub message: String,
    /// Source text on the old side, empty when absent.
    pub old_text: String,
    /// Source text on the new side, empty when absent.
    pub new_text: String,
    pub location: Location,
    pub is_compatible: bool,
}

impl DiffEvent {
    /// Build an event for `old`/`new`. Identity (name, kind, location) comes
    /// from the new node when present, otherwise from the old one.
    ///
    /// Returns `None` only when both sides are absent.
    pub fn new(category: DiffCategory, old: Option<&Node>, new: Option<&Node>) -> Option<Self> {
        let subject = new.or(old)?;
        Some(Self {
            api_name: subject.name.clone(),
            api_kind: subject.kind,
            category,
            message: category.message().to_string(),
            old_text: old.map(|n| n.raw_text.clone()).unwrap_or_default(),
            new_text: new.map(|n| n.raw_text.clone()).unwrap_or_default(),
            location: subject.location.clone(),
            is_compatible: category.is_compatible(),
        })
    }

    /// Replace the old/new texts, e.g. with an initializer's text.
    pub fn with_texts(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.old_text = old.into();
        self.new_text = new.into();
        self
    }

    /// Append detail to the category message.
    pub fn with_detail(mut self, detail: impl AsRef<str>) -> Self {
        self.message = format!("{}: {}", self.message, detail.as_ref());
        self
    }
}

/// Ordered accumulator threaded through the recursive comparison.
#[derive(Clone, Debug, Default)]
pub struct EventSink {
    events: Vec<DiffEvent>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `category` between `old` and `new`.
    pub fn emit(&mut self, category: DiffCategory, old: Option<&Node>, new: Option<&Node>) {
        if let Some(event) = DiffEvent::new(category, old, new) {
            self.events.push(event);
        }
    }

    /// Record `category` between two present nodes.
    pub fn emit_pair(&mut self, category: DiffCategory, old: &Node, new: &Node) {
        self.emit(category, Some(old), Some(new));
    }

    pub fn push(&mut self, event: DiffEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[DiffEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DiffEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(name: &str, text: &str) -> Node {
        Node::new(NodeKind::Function, name)
            .with_raw_text(text)
            .with_location(Location::new("a.h", 3, 1))
    }

    #[test]
    fn identity_prefers_new_side() {
        let old = func("old_name", "void old_name(void);");
        let new = func("new_name", "void new_name(void);");
        let event =
            DiffEvent::new(DiffCategory::FunctionNameChanged, Some(&old), Some(&new)).unwrap();
        assert_eq!(event.api_name, "new_name");
        assert_eq!(event.old_text, "void old_name(void);");
        assert_eq!(event.new_text, "void new_name(void);");
        assert!(!event.is_compatible);
    }

    #[test]
    fn removal_takes_old_identity() {
        let old = func("gone", "void gone(void);");
        let event = DiffEvent::new(DiffCategory::DeleteApi, Some(&old), None).unwrap();
        assert_eq!(event.api_name, "gone");
        assert_eq!(event.new_text, "");
        assert_eq!(event.location, Location::new("a.h", 3, 1));
    }

    #[test]
    fn both_absent_is_no_event() {
        assert!(DiffEvent::new(DiffCategory::AddApi, None, None).is_none());
        let mut sink = EventSink::new();
        sink.emit(DiffCategory::AddApi, None, None);
        assert!(sink.is_empty());
    }

    #[test]
    fn detail_extends_message() {
        let node = func("f", "");
        let event = DiffEvent::new(DiffCategory::DocTagPermissionUnparsable, Some(&node), Some(&node))
            .unwrap()
            .with_detail("unbalanced parenthesis");
        assert_eq!(
            event.message,
            "permission expression could not be compared: unbalanced parenthesis"
        );
    }

    #[test]
    fn event_serializes_with_category_name() {
        let node = func("f", "void f(void);");
        let event = DiffEvent::new(DiffCategory::AddApi, None, Some(&node)).unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["category"], "ADD_API");
        assert_eq!(json["api_kind"], "FUNCTION_DECL");
        assert_eq!(json["is_compatible"], true);
    }
}
