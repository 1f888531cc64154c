use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a declaration node.
///
/// Serialized with the cursor names a libclang-based front-end emits, so a
/// dump can be fed in without translation. Cursor kinds outside the
/// declaration vocabulary (literals, unexposed expressions, references) are
/// read as [`NodeKind::Expression`]; they only ever appear as initializer
/// children and are never diffed structurally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "FUNCTION_DECL")]
    Function,
    #[serde(rename = "MACRO_DEFINITION")]
    Macro,
    #[serde(rename = "STRUCT_DECL")]
    Struct,
    #[serde(rename = "UNION_DECL")]
    Union,
    #[serde(rename = "ENUM_DECL")]
    Enum,
    #[serde(rename = "VAR_DECL")]
    Variable,
    #[serde(rename = "TYPEDEF_DECL")]
    Typedef,
    #[serde(rename = "PARM_DECL")]
    Parameter,
    #[serde(rename = "FIELD_DECL")]
    Field,
    #[serde(rename = "ENUM_CONSTANT_DECL")]
    EnumConstant,
    #[serde(rename = "TRANSLATION_UNIT")]
    TranslationUnit,
    #[serde(rename = "UNEXPOSED_EXPR", other)]
    Expression,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 12] = [
        NodeKind::Function,
        NodeKind::Macro,
        NodeKind::Struct,
        NodeKind::Union,
        NodeKind::Enum,
        NodeKind::Variable,
        NodeKind::Typedef,
        NodeKind::Parameter,
        NodeKind::Field,
        NodeKind::EnumConstant,
        NodeKind::TranslationUnit,
        NodeKind::Expression,
    ];

    /// The cursor name used on the wire and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Function => "FUNCTION_DECL",
            NodeKind::Macro => "MACRO_DEFINITION",
            NodeKind::Struct => "STRUCT_DECL",
            NodeKind::Union => "UNION_DECL",
            NodeKind::Enum => "ENUM_DECL",
            NodeKind::Variable => "VAR_DECL",
            NodeKind::Typedef => "TYPEDEF_DECL",
            NodeKind::Parameter => "PARM_DECL",
            NodeKind::Field => "FIELD_DECL",
            NodeKind::EnumConstant => "ENUM_CONSTANT_DECL",
            NodeKind::TranslationUnit => "TRANSLATION_UNIT",
            NodeKind::Expression => "UNEXPOSED_EXPR",
        }
    }

    /// Struct, union and enum: kinds whose members are diffed recursively.
    pub fn is_composite(&self) -> bool {
        matches!(self, NodeKind::Struct | NodeKind::Union | NodeKind::Enum)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_display() {
        for kind in NodeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn unknown_cursor_reads_as_expression() {
        let kind: NodeKind = serde_json::from_str("\"INTEGER_LITERAL\"").unwrap();
        assert_eq!(kind, NodeKind::Expression);
    }

    #[test]
    fn composites() {
        assert!(NodeKind::Struct.is_composite());
        assert!(NodeKind::Union.is_composite());
        assert!(NodeKind::Enum.is_composite());
        assert!(!NodeKind::Typedef.is_composite());
        assert!(!NodeKind::Field.is_composite());
    }
}
