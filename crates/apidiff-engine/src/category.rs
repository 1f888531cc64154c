//! The diff event taxonomy and its compatibility table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every kind of difference the engine can report.
///
/// Each category maps to a fixed compatibility verdict through
/// [`DiffCategory::is_compatible`]; the match there is exhaustive, so a new
/// category cannot be added without classifying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffCategory {
    AddApi,
    DeleteApi,
    AddDoc,
    ReduceDoc,

    MacroNameChanged,
    MacroTextChanged,

    FunctionNameChanged,
    FunctionReturnChanged,
    FunctionParamNameChanged,
    FunctionParamTypeChanged,
    FunctionParamAdded,
    FunctionParamRemoved,

    StructNameChanged,
    StructMemberNameChanged,
    StructMemberTypeChanged,
    StructMemberAdded,
    StructMemberRemoved,

    UnionNameChanged,
    UnionMemberNameChanged,
    UnionMemberTypeChanged,
    UnionMemberAdded,
    UnionMemberRemoved,

    EnumNameChanged,
    EnumMemberNameChanged,
    EnumMemberValueChanged,
    EnumMemberAdded,
    EnumMemberRemoved,

    VariableNameChanged,
    VariableTypeChanged,
    VariableValueChanged,

    ConstantNameChanged,
    ConstantTypeChanged,
    ConstantValueChanged,

    TypedefNameChanged,

    DocTagAddToGroupAdded,
    DocTagAddToGroupRemoved,
    DocTagAddToGroupChanged,
    DocTagBriefAdded,
    DocTagBriefRemoved,
    DocTagBriefChanged,
    DocTagDeprecatedAdded,
    DocTagDeprecatedRemoved,
    DocTagDeprecatedChanged,
    DocTagFileAdded,
    DocTagFileRemoved,
    DocTagFileChanged,
    DocTagLibraryAdded,
    DocTagLibraryRemoved,
    DocTagLibraryChanged,
    DocTagParamAdded,
    DocTagParamRemoved,
    DocTagParamNameChanged,
    DocTagParamDescriptionChanged,
    DocTagPermissionAdded,
    DocTagPermissionRemoved,
    DocTagPermissionIncreased,
    DocTagPermissionDecreased,
    DocTagPermissionChanged,
    DocTagPermissionUnparsable,
    DocTagSinceAdded,
    DocTagSinceRemoved,
    DocTagSinceChanged,
    DocTagSyscapAdded,
    DocTagSyscapRemoved,
    DocTagSyscapChanged,
    DocTagOpenBraceAdded,
    DocTagOpenBraceRemoved,
    DocTagCloseBraceAdded,
    DocTagCloseBraceRemoved,
}

impl DiffCategory {
    /// Every category, in declaration order.
    pub const ALL: [DiffCategory; 69] = [
        DiffCategory::AddApi,
        DiffCategory::DeleteApi,
        DiffCategory::AddDoc,
        DiffCategory::ReduceDoc,
        DiffCategory::MacroNameChanged,
        DiffCategory::MacroTextChanged,
        DiffCategory::FunctionNameChanged,
        DiffCategory::FunctionReturnChanged,
        DiffCategory::FunctionParamNameChanged,
        DiffCategory::FunctionParamTypeChanged,
        DiffCategory::FunctionParamAdded,
        DiffCategory::FunctionParamRemoved,
        DiffCategory::StructNameChanged,
        DiffCategory::StructMemberNameChanged,
        DiffCategory::StructMemberTypeChanged,
        DiffCategory::StructMemberAdded,
        DiffCategory::StructMemberRemoved,
        DiffCategory::UnionNameChanged,
        DiffCategory::UnionMemberNameChanged,
        DiffCategory::UnionMemberTypeChanged,
        DiffCategory::UnionMemberAdded,
        DiffCategory::UnionMemberRemoved,
        DiffCategory::EnumNameChanged,
        DiffCategory::EnumMemberNameChanged,
        DiffCategory::EnumMemberValueChanged,
        DiffCategory::EnumMemberAdded,
        DiffCategory::EnumMemberRemoved,
        DiffCategory::VariableNameChanged,
        DiffCategory::VariableTypeChanged,
        DiffCategory::VariableValueChanged,
        DiffCategory::ConstantNameChanged,
        DiffCategory::ConstantTypeChanged,
        DiffCategory::ConstantValueChanged,
        DiffCategory::TypedefNameChanged,
        DiffCategory::DocTagAddToGroupAdded,
        DiffCategory::DocTagAddToGroupRemoved,
        DiffCategory::DocTagAddToGroupChanged,
        DiffCategory::DocTagBriefAdded,
        DiffCategory::DocTagBriefRemoved,
        DiffCategory::DocTagBriefChanged,
        DiffCategory::DocTagDeprecatedAdded,
        DiffCategory::DocTagDeprecatedRemoved,
        DiffCategory::DocTagDeprecatedChanged,
        DiffCategory::DocTagFileAdded,
        DiffCategory::DocTagFileRemoved,
        DiffCategory::DocTagFileChanged,
        DiffCategory::DocTagLibraryAdded,
        DiffCategory::DocTagLibraryRemoved,
        DiffCategory::DocTagLibraryChanged,
        DiffCategory::DocTagParamAdded,
        DiffCategory::DocTagParamRemoved,
        DiffCategory::DocTagParamNameChanged,
        DiffCategory::DocTagParamDescriptionChanged,
        DiffCategory::DocTagPermissionAdded,
        DiffCategory::DocTagPermissionRemoved,
        DiffCategory::DocTagPermissionIncreased,
        DiffCategory::DocTagPermissionDecreased,
        DiffCategory::DocTagPermissionChanged,
        DiffCategory::DocTagPermissionUnparsable,
        DiffCategory::DocTagSinceAdded,
        DiffCategory::DocTagSinceRemoved,
        DiffCategory::DocTagSinceChanged,
        DiffCategory::DocTagSyscapAdded,
        DiffCategory::DocTagSyscapRemoved,
        DiffCategory::DocTagSyscapChanged,
        DiffCategory::DocTagOpenBraceAdded,
        DiffCategory::DocTagOpenBraceRemoved,
        DiffCategory::DocTagCloseBraceAdded,
        DiffCategory::DocTagCloseBraceRemoved,
    ];

    /// Whether a change of this category keeps existing consumers working.
    pub fn is_compatible(&self) -> bool {
        use DiffCategory::*;

        match self {
            AddApi
            | AddDoc
            | FunctionParamNameChanged
            | DocTagAddToGroupAdded
            | DocTagAddToGroupRemoved
            | DocTagAddToGroupChanged
            | DocTagBriefAdded
            | DocTagBriefRemoved
            | DocTagBriefChanged
            | DocTagDeprecatedAdded
            | DocTagDeprecatedRemoved
            | DocTagDeprecatedChanged
            | DocTagFileAdded
            | DocTagFileRemoved
            | DocTagFileChanged
            | DocTagParamDescriptionChanged
            | DocTagPermissionRemoved
            | DocTagPermissionIncreased
            | DocTagSinceAdded
            | DocTagSinceChanged
            | DocTagOpenBraceAdded
            | DocTagOpenBraceRemoved
            | DocTagCloseBraceAdded
            | DocTagCloseBraceRemoved => true,

            DeleteApi
            | ReduceDoc
            | MacroNameChanged
            | MacroTextChanged
            | FunctionNameChanged
            | FunctionReturnChanged
            | FunctionParamTypeChanged
            | FunctionParamAdded
            | FunctionParamRemoved
            | StructNameChanged
            | StructMemberNameChanged
            | StructMemberTypeChanged
            | StructMemberAdded
            | StructMemberRemoved
            | UnionNameChanged
            | UnionMemberNameChanged
            | UnionMemberTypeChanged
            | UnionMemberAdded
            | UnionMemberRemoved
            | EnumNameChanged
            | EnumMemberNameChanged
            | EnumMemberValueChanged
            | EnumMemberAdded
            | EnumMemberRemoved
            | VariableNameChanged
            | VariableTypeChanged
            | VariableValueChanged
            | ConstantNameChanged
            | ConstantTypeChanged
            | ConstantValueChanged
            | TypedefNameChanged
            | DocTagLibraryAdded
            | DocTagLibraryRemoved
            | DocTagLibraryChanged
            | DocTagParamAdded
            | DocTagParamRemoved
            | DocTagParamNameChanged
            | DocTagPermissionAdded
            | DocTagPermissionDecreased
            | DocTagPermissionChanged
            | DocTagPermissionUnparsable
            | DocTagSinceRemoved
            | DocTagSyscapAdded
            | DocTagSyscapRemoved
            | DocTagSyscapChanged => false,
        }
    }

    /// Human-readable description used as the event message.
    pub fn message(&self) -> &'static str {
        use DiffCategory::*;

        match self {
            AddApi => "add api",
            DeleteApi => "delete api",
            AddDoc => "add doc",
            ReduceDoc => "delete doc",
            MacroNameChanged => "change define name",
            MacroTextChanged => "change define text",
            FunctionNameChanged => "change function name",
            FunctionReturnChanged => "change function return value",
            FunctionParamNameChanged => "change param name in function",
            FunctionParamTypeChanged => "change param type in function",
            FunctionParamAdded => "add param in function",
            FunctionParamRemoved => "delete param in function",
            StructNameChanged => "change struct name",
            StructMemberNameChanged => "change member name in struct",
            StructMemberTypeChanged => "change member type in struct",
            StructMemberAdded => "add member in struct",
            StructMemberRemoved => "delete member in struct",
            UnionNameChanged => "change union name",
            UnionMemberNameChanged => "change member name in union",
            UnionMemberTypeChanged => "change member type in union",
            UnionMemberAdded => "add member in union",
            UnionMemberRemoved => "delete member in union",
            EnumNameChanged => "change enum name",
            EnumMemberNameChanged => "change member name in enum",
            EnumMemberValueChanged => "change member value in enum",
            EnumMemberAdded => "add member in enum",
            EnumMemberRemoved => "delete member in enum",
            VariableNameChanged => "change variable name",
            VariableTypeChanged => "change variable type",
            VariableValueChanged => "change variable value",
            ConstantNameChanged => "change constant name",
            ConstantTypeChanged => "change constant type",
            ConstantValueChanged => "change constant value",
            TypedefNameChanged => "change typedef name",
            DocTagAddToGroupAdded => "add addtogroup tag",
            DocTagAddToGroupRemoved => "delete addtogroup tag",
            DocTagAddToGroupChanged => "change addtogroup tag",
            DocTagBriefAdded => "add brief tag",
            DocTagBriefRemoved => "delete brief tag",
            DocTagBriefChanged => "change brief tag",
            DocTagDeprecatedAdded => "add deprecated tag",
            DocTagDeprecatedRemoved => "delete deprecated tag",
            DocTagDeprecatedChanged => "change deprecated tag",
            DocTagFileAdded => "add file tag",
            DocTagFileRemoved => "delete file tag",
            DocTagFileChanged => "change file tag",
            DocTagLibraryAdded => "add library tag",
            DocTagLibraryRemoved => "delete library tag",
            DocTagLibraryChanged => "change library tag",
            DocTagParamAdded => "add param tag",
            DocTagParamRemoved => "delete param tag",
            DocTagParamNameChanged => "change param tag name",
            DocTagParamDescriptionChanged => "change param tag value",
            DocTagPermissionAdded => "add permission tag",
            DocTagPermissionRemoved => "delete permission tag",
            DocTagPermissionIncreased => "increased permissions, ex: add \"or\" or remove \"and\"",
            DocTagPermissionDecreased => "reduced permissions, ex: add \"and\" or remove \"or\"",
            DocTagPermissionChanged => {
                "change permissions, before not included after and after not included before"
            }
            DocTagPermissionUnparsable => "permission expression could not be compared",
            DocTagSinceAdded => "add since tag",
            DocTagSinceRemoved => "delete since tag",
            DocTagSinceChanged => "change since tag",
            DocTagSyscapAdded => "add syscap tag",
            DocTagSyscapRemoved => "delete syscap tag",
            DocTagSyscapChanged => "change syscap tag",
            DocTagOpenBraceAdded => "add { tag",
            DocTagOpenBraceRemoved => "delete { tag",
            DocTagCloseBraceAdded => "add } tag",
            DocTagCloseBraceRemoved => "delete } tag",
        }
    }
}

impl fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
