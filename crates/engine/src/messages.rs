//! Message kinds reported by the rule. The camelCase names and the
//! placeholder set of each kind are the contract with the host.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    TypeReferenceResolvesToAny,
    LetVariableWithNoInitialAndNoAnnotation,
    LetVariableInitialisedToNullishAndNoAnnotation,
    VariableDeclarationInitialisedToAnyWithoutAnnotation,
    VariableDeclarationInitialisedToAnyWithAnnotation,
    VariableDeclarationInitialisedToAnyArrayWithoutAnnotation,
    PatternVariableDeclarationInitialisedToAny,
    LoopVariableInitialisedToAny,
    ReturnAny,
    PassedArgumentIsAny,
    AssignmentValueIsAny,
    UpdateExpressionIsAny,
    BooleanTestIsAny,
    SwitchDiscriminantIsAny,
    SwitchCaseTestIsAny,
}

impl MessageKind {
    pub const ALL: [MessageKind; 15] = [
        MessageKind::TypeReferenceResolvesToAny,
        MessageKind::LetVariableWithNoInitialAndNoAnnotation,
        MessageKind::LetVariableInitialisedToNullishAndNoAnnotation,
        MessageKind::VariableDeclarationInitialisedToAnyWithoutAnnotation,
        MessageKind::VariableDeclarationInitialisedToAnyWithAnnotation,
        MessageKind::VariableDeclarationInitialisedToAnyArrayWithoutAnnotation,
        MessageKind::PatternVariableDeclarationInitialisedToAny,
        MessageKind::LoopVariableInitialisedToAny,
        MessageKind::ReturnAny,
        MessageKind::PassedArgumentIsAny,
        MessageKind::AssignmentValueIsAny,
        MessageKind::UpdateExpressionIsAny,
        MessageKind::BooleanTestIsAny,
        MessageKind::SwitchDiscriminantIsAny,
        MessageKind::SwitchCaseTestIsAny,
    ];

    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::TypeReferenceResolvesToAny => "typeReferenceResolvesToAny",
            MessageKind::LetVariableWithNoInitialAndNoAnnotation => {
                "letVariableWithNoInitialAndNoAnnotation"
            }
            MessageKind::LetVariableInitialisedToNullishAndNoAnnotation => {
                "letVariableInitialisedToNullishAndNoAnnotation"
            }
            MessageKind::VariableDeclarationInitialisedToAnyWithoutAnnotation => {
                "variableDeclarationInitialisedToAnyWithoutAnnotation"
            }
            MessageKind::VariableDeclarationInitialisedToAnyWithAnnotation => {
                "variableDeclarationInitialisedToAnyWithAnnotation"
            }
            MessageKind::VariableDeclarationInitialisedToAnyArrayWithoutAnnotation => {
                "variableDeclarationInitialisedToAnyArrayWithoutAnnotation"
            }
            MessageKind::PatternVariableDeclarationInitialisedToAny => {
                "patternVariableDeclarationInitialisedToAny"
            }
            MessageKind::LoopVariableInitialisedToAny => "loopVariableInitialisedToAny",
            MessageKind::ReturnAny => "returnAny",
            MessageKind::PassedArgumentIsAny => "passedArgumentIsAny",
            MessageKind::AssignmentValueIsAny => "assignmentValueIsAny",
            MessageKind::UpdateExpressionIsAny => "updateExpressionIsAny",
            MessageKind::BooleanTestIsAny => "booleanTestIsAny",
            MessageKind::SwitchDiscriminantIsAny => "switchDiscriminantIsAny",
            MessageKind::SwitchCaseTestIsAny => "switchCaseTestIsAny",
        }
    }

    /// Message text; `{{name}}` is replaced with the datum `name`.
    pub fn template(self) -> &'static str {
        match self {
            MessageKind::TypeReferenceResolvesToAny => {
                "Referenced type {{typeName}} resolves to `any`."
            }
            MessageKind::LetVariableWithNoInitialAndNoAnnotation => {
                "Variable declared with {{kind}} with no initial value is implicitly typed as `any`."
            }
            MessageKind::LetVariableInitialisedToNullishAndNoAnnotation => {
                "Variable declared with {{kind}} and initialised to `null` or `undefined` is implicitly typed as `any`. Add an explicit type annotation."
            }
            MessageKind::VariableDeclarationInitialisedToAnyWithoutAnnotation => {
                "Variable declaration is initialised to `any` without an assertion or a type annotation."
            }
            MessageKind::VariableDeclarationInitialisedToAnyWithAnnotation => {
                "Variable declaration is initialised to `any` with an explicit type annotation, which is unsafe. Prefer explicit type narrowing via type guards."
            }
            MessageKind::VariableDeclarationInitialisedToAnyArrayWithoutAnnotation => {
                "Variable declaration is initialised to an empty array, which is implicitly typed as `any[]`. Add an explicit type annotation."
            }
            MessageKind::PatternVariableDeclarationInitialisedToAny => {
                "Destructured variable {{name}} is initialised to `any`. Add an explicit type annotation or narrow the value first."
            }
            MessageKind::LoopVariableInitialisedToAny => {
                "Loop variable is initialised to `any`. Narrow the iterated value before the loop."
            }
            MessageKind::ReturnAny => "Returning `any` from a function is unsafe.",
            MessageKind::PassedArgumentIsAny => {
                "Passing an `any` typed value as argument {{index}} is unsafe."
            }
            MessageKind::AssignmentValueIsAny => {
                "Assigning an `any` typed value with {{operator}} is unsafe."
            }
            MessageKind::UpdateExpressionIsAny => {
                "Applying {{operator}} to an `any` typed value is unsafe."
            }
            MessageKind::BooleanTestIsAny => "Using an `any` typed value as a condition is unsafe.",
            MessageKind::SwitchDiscriminantIsAny => {
                "Switching over an `any` typed value is unsafe."
            }
            MessageKind::SwitchCaseTestIsAny => "Using an `any` typed value as a case test is unsafe.",
        }
    }

    /// Names of the data entries a record of this kind carries.
    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            MessageKind::TypeReferenceResolvesToAny => &["typeName"],
            MessageKind::LetVariableWithNoInitialAndNoAnnotation
            | MessageKind::LetVariableInitialisedToNullishAndNoAnnotation => &["kind"],
            MessageKind::PatternVariableDeclarationInitialisedToAny => &["name"],
            MessageKind::PassedArgumentIsAny => &["index"],
            MessageKind::AssignmentValueIsAny | MessageKind::UpdateExpressionIsAny => {
                &["operator"]
            }
            MessageKind::VariableDeclarationInitialisedToAnyWithoutAnnotation
            | MessageKind::VariableDeclarationInitialisedToAnyWithAnnotation
            | MessageKind::VariableDeclarationInitialisedToAnyArrayWithoutAnnotation
            | MessageKind::LoopVariableInitialisedToAny
            | MessageKind::ReturnAny
            | MessageKind::BooleanTestIsAny
            | MessageKind::SwitchDiscriminantIsAny
            | MessageKind::SwitchCaseTestIsAny => &[],
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
