use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::kind::NodeKind;
use crate::location::Location;

/// Legacy "no comment" sentinel some front-ends write instead of `null`.
pub const NO_COMMENT: &str = "none_comment";

/// One declaration or sub-declaration of a header.
///
/// Nested declarations live in the slot the kind calls for: `members` for
/// structs, unions and enums, `parameters` for functions, `children` for
/// translation units, typedefs and variable initializers. A slot that is
/// `None` was not reported at all, which the differs treat differently
/// from an empty list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub name: String,
    pub kind: NodeKind,
    /// Textual type signature as spelled by the front-end.
    #[serde(default, rename = "type")]
    pub ty: String,
    /// Function result type; falls back to `ty` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Node>>,
    #[serde(default, alias = "parm", skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    /// Source text spanned by the declaration.
    #[serde(default, alias = "content")]
    pub raw_text: String,
    #[serde(
        default,
        deserialize_with = "deserialize_comment",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment: Option<String>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_extern: bool,
    /// Enumerator value; wide enough for any signed or unsigned 64-bit constant.
    #[serde(
        default,
        rename = "value",
        deserialize_with = "deserialize_enum_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_value: Option<i128>,
    /// Macro replacement list.
    #[serde(default, rename = "text", skip_serializing_if = "Option::is_none")]
    pub macro_text: Option<String>,
}

fn deserialize_comment<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|c| c != NO_COMMENT))
}

/// Accepts any JSON integer in the `i64` or `u64` range, or `null`.
///
/// Must use `deserialize_any`: the untagged `ForestDocument` buffers
/// content without 128-bit integer support.
fn deserialize_enum_value<'de, D>(deserializer: D) -> Result<Option<i128>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EnumValue;

    impl<'de> Visitor<'de> for EnumValue {
        type Value = Option<i128>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer enumerator value")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.into()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.into()))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(EnumValue)
}

impl Node {
    /// A bare node of the given kind; every optional slot starts absent.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            ty: String::new(),
            return_type: None,
            members: None,
            parameters: None,
            children: None,
            raw_text: String::new(),
            comment: None,
            location: Location::default(),
            is_const: false,
            is_extern: false,
            enum_value: None,
            macro_text: None,
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = ty.into();
        self
    }

    pub fn with_return_type(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn with_members(mut self, members: Vec<Node>) -> Self {
        self.members = Some(members);
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Node>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_raw_text(mut self, text: impl Into<String>) -> Self {
        self.raw_text = text.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    pub fn with_enum_value(mut self, value: impl Into<i128>) -> Self {
        self.enum_value = Some(value.into());
        self
    }

    pub fn with_macro_text(mut self, text: impl Into<String>) -> Self {
        self.macro_text = Some(text.into());
        self
    }

    /// The pairing key of this declaration.
    pub fn key(&self) -> DeclKey {
        DeclKey::new(self.name.clone(), self.kind)
    }

    /// Documentation comment text, if the declaration has one.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The function result type, or the plain type for other kinds.
    pub fn result_type(&self) -> &str {
        self.return_type.as_deref().unwrap_or(&self.ty)
    }

    /// The first child, which for variables is the initializer expression.
    pub fn initializer(&self) -> Option<&Node> {
        self.children.as_ref().and_then(|c| c.first())
    }

    /// Children as a slice; empty when the slot is absent.
    pub fn child_nodes(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// Identity under which an old and a new declaration are paired.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclKey {
    pub name: String,
    pub kind: NodeKind,
}

impl DeclKey {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for DeclKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.kind)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ForestDocument {
    Many(Vec<Node>),
    One(Box<Node>),
}

/// Parse a front-end dump holding either one root node or an array of roots.
pub fn parse_forest(json: &str) -> TypeResult<Vec<Node>> {
    let doc: ForestDocument =
        serde_json::from_str(json).map_err(|e| TypeError::InvalidTree(e.to_string()))?;
    Ok(match doc {
        ForestDocument::Many(roots) => roots,
        ForestDocument::One(root) => vec![*root],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_sentinel_reads_as_none() {
        let node: Node =
            serde_json::from_str(r#"{"name":"f","kind":"FUNCTION_DECL","comment":"none_comment"}"#)
                .unwrap();
        assert_eq!(node.comment(), None);

        let node: Node =
            serde_json::from_str(r#"{"name":"f","kind":"FUNCTION_DECL","comment":null}"#).unwrap();
        assert_eq!(node.comment(), None);

        let node: Node = serde_json::from_str(
            r#"{"name":"f","kind":"FUNCTION_DECL","comment":"/** @since 10 */"}"#,
        )
        .unwrap();
        assert_eq!(node.comment(), Some("/** @since 10 */"));
    }

    #[test]
    fn absent_slots_stay_absent() {
        let node: Node = serde_json::from_str(r#"{"name":"S","kind":"STRUCT_DECL"}"#).unwrap();
        assert!(node.members.is_none());
        assert!(node.parameters.is_none());

        let node: Node =
            serde_json::from_str(r#"{"name":"S","kind":"STRUCT_DECL","members":[]}"#).unwrap();
        assert_eq!(node.members, Some(Vec::new()));
    }

    #[test]
    fn legacy_field_aliases() {
        let node: Node = serde_json::from_str(
            r#"{"name":"F","kind":"FUNCTION_DECL","content":"int F(int x);",
                "parm":[{"name":"x","kind":"PARM_DECL","type":"int"}]}"#,
        )
        .unwrap();
        assert_eq!(node.raw_text, "int F(int x);");
        assert_eq!(node.parameters.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn result_type_falls_back_to_type() {
        let f = Node::new(NodeKind::Function, "F").with_type("int (int)");
        assert_eq!(f.result_type(), "int (int)");
        let f = f.with_return_type("int");
        assert_eq!(f.result_type(), "int");
    }

    #[test]
    fn initializer_is_first_child() {
        let v = Node::new(NodeKind::Variable, "V").with_children(vec![
            Node::new(NodeKind::Expression, "").with_raw_text("42"),
        ]);
        assert_eq!(v.initializer().map(|n| n.raw_text.as_str()), Some("42"));
        assert!(Node::new(NodeKind::Variable, "W").initializer().is_none());
    }

    #[test]
    fn decl_keys_order_by_name_then_kind() {
        let a = DeclKey::new("A", NodeKind::Typedef);
        let b = DeclKey::new("A", NodeKind::Struct);
        let c = DeclKey::new("B", NodeKind::Function);
        let mut keys = vec![c.clone(), a.clone(), b.clone()];
        keys.sort();
        assert_eq!(keys, vec![b, a, c]);
        assert_eq!(DeclKey::new("S", NodeKind::Struct).to_string(), "S-STRUCT_DECL");
    }

    #[test]
    fn parse_single_root_or_array() {
        let one = parse_forest(r#"{"name":"a.h","kind":"TRANSLATION_UNIT","children":[]}"#).unwrap();
        assert_eq!(one.len(), 1);

        let many = parse_forest(
            r#"[{"name":"a.h","kind":"TRANSLATION_UNIT"},{"name":"b.h","kind":"TRANSLATION_UNIT"}]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn enumerator_values_span_signed_and_unsigned() {
        let forest = parse_forest(
            r#"{"name": "Flags", "kind": "ENUM_DECL", "members": [
                {"name": "LOWEST", "kind": "ENUM_CONSTANT_DECL", "value": -9223372036854775808},
                {"name": "HIGHEST", "kind": "ENUM_CONSTANT_DECL", "value": 18446744073709551615}
            ]}"#,
        )
        .unwrap();
        let members = forest[0].members.as_deref().unwrap();
        assert_eq!(members[0].enum_value, Some(i128::from(i64::MIN)));
        assert_eq!(members[1].enum_value, Some(i128::from(u64::MAX)));

        let bare = parse_forest(r#"[{"name": "X", "kind": "ENUM_CONSTANT_DECL", "value": null}]"#).unwrap();
        assert_eq!(bare[0].enum_value, None);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_forest("not json"), Err(TypeError::InvalidTree(_))));
    }
}
