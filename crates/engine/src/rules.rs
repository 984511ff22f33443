//! Context rules. Each rule receives a node the dispatcher matched to its
//! syntactic shape and decides whether, and with which message and data,
//! to report. A rule that finds a required child missing returns an error;
//! the dispatcher logs it and carries on with the pass.

use crate::classify::{classify, classify_type, resolve, TypeClassification};
use crate::config::RuleConfiguration;
use crate::emitter::Emitter;
use crate::messages::MessageKind;
use anyhow::{anyhow, bail, Result};
use ir::{DeclarationKind, Field, NodeKind, SyntaxNode, SyntaxTree, TypeDescriptor, TypeOracle};

const NO_DATA: [(&str, String); 0] = [];

/// State shared by the rules during one pass.
pub(crate) struct RuleContext<'a, O> {
    pub tree: &'a SyntaxTree,
    pub oracle: &'a O,
    pub config: &'a RuleConfiguration,
    pub emitter: Emitter<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextRule {
    /// A type reference that resolves to `any`.
    TypeReference,
    /// `let`/`var` declarator without a value.
    UninitializedLet,
    /// `let`/`var` declarator initialised to `null` or `undefined`.
    NullishLet,
    /// Declarator initialised to an `any` value.
    UnsafeInitializer,
    /// Declarator initialised to `[]`, `Array()` or `Array(n)`.
    ImplicitAnyArray,
    /// Identifier bound by a destructuring declaration.
    PatternBinding,
    /// Binding of a `for-of` loop.
    LoopBinding,
    /// `return` argument or expression body of an arrow function.
    ReturnValue,
    CallArguments,
    AssignedValue,
    UpdatedValue,
    BooleanTest,
    SwitchDiscriminant,
    SwitchCaseTest,
}

impl ContextRule {
    pub fn name(self) -> &'static str {
        match self {
            ContextRule::TypeReference => "type-reference",
            ContextRule::UninitializedLet => "uninitialized-let",
            ContextRule::NullishLet => "nullish-let",
            ContextRule::UnsafeInitializer => "unsafe-initializer",
            ContextRule::ImplicitAnyArray => "implicit-any-array",
            ContextRule::PatternBinding => "pattern-binding",
            ContextRule::LoopBinding => "loop-binding",
            ContextRule::ReturnValue => "return-value",
            ContextRule::CallArguments => "call-arguments",
            ContextRule::AssignedValue => "assigned-value",
            ContextRule::UpdatedValue => "updated-value",
            ContextRule::BooleanTest => "boolean-test",
            ContextRule::SwitchDiscriminant => "switch-discriminant",
            ContextRule::SwitchCaseTest => "switch-case-test",
        }
    }

    pub(crate) fn apply<O: TypeOracle>(
        self,
        cx: &mut RuleContext<'_, O>,
        node: &SyntaxNode,
    ) -> Result<()> {
        match self {
            ContextRule::TypeReference => type_reference(cx, node),
            ContextRule::UninitializedLet => uninitialized_let(cx, node),
            ContextRule::NullishLet => nullish_let(cx, node),
            ContextRule::UnsafeInitializer => unsafe_initializer(cx, node),
            ContextRule::ImplicitAnyArray => implicit_any_array(cx, node),
            ContextRule::PatternBinding => pattern_binding(cx, node),
            ContextRule::LoopBinding => loop_binding(cx, node),
            ContextRule::ReturnValue => return_value(cx, node),
            ContextRule::CallArguments => call_arguments(cx, node),
            ContextRule::AssignedValue => assigned_value(cx, node),
            ContextRule::UpdatedValue => updated_value(cx, node),
            ContextRule::BooleanTest => boolean_test(cx, node),
            ContextRule::SwitchDiscriminant => switch_discriminant(cx, node),
            ContextRule::SwitchCaseTest => switch_case_test(cx, node),
        }
    }
}

fn required<'t>(tree: &'t SyntaxTree, node: &SyntaxNode, field: Field) -> Result<&'t SyntaxNode> {
    tree.child_by_field(node.id, field)
        .ok_or_else(|| anyhow!("{:?} node {} has no {:?} child", node.kind, node.id, field))
}

fn is_annotated(tree: &SyntaxTree, binding: &SyntaxNode) -> bool {
    tree.child_by_field(binding.id, Field::TypeAnnotation).is_some()
}

fn declaration_kind(tree: &SyntaxTree, declarator: &SyntaxNode) -> Result<DeclarationKind> {
    match tree.parent(declarator.id).map(|p| p.kind) {
        Some(NodeKind::VariableDeclaration { kind }) => Ok(kind),
        other => bail!("declarator {} sits under {:?}", declarator.id, other),
    }
}

/// Declarator whose pattern binds `leaf`, when `leaf` is an identifier
/// nested in an object or array pattern of an initialised declarator.
pub(crate) fn destructuring_declarator<'t>(
    tree: &'t SyntaxTree,
    leaf: &'t SyntaxNode,
) -> Option<&'t SyntaxNode> {
    if leaf.kind != NodeKind::Identifier {
        return None;
    }
    let mut current = leaf;
    loop {
        let parent = tree.parent(current.id)?;
        let field = current.field?;
        let inside_pattern = matches!(
            (parent.kind, field),
            (NodeKind::Property, Field::Value)
                | (NodeKind::ObjectPattern, Field::Properties)
                | (NodeKind::ArrayPattern, Field::Elements)
                | (NodeKind::AssignmentPattern, Field::Left)
                | (NodeKind::RestElement, Field::Argument)
        );
        if inside_pattern {
            current = parent;
            continue;
        }
        let bound = parent.kind == NodeKind::VariableDeclarator
            && field == Field::Id
            && current.id != leaf.id
            && tree.child_by_field(parent.id, Field::Init).is_some();
        return bound.then_some(parent);
    }
}

fn type_reference<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    if classify(cx.oracle, node) != TypeClassification::Unsafe {
        return Ok(());
    }
    let type_name = node
        .text()
        .ok_or_else(|| anyhow!("type reference {} carries no source text", node.id))?;
    cx.emitter.report(
        node,
        MessageKind::TypeReferenceResolvesToAny,
        [("typeName", type_name.to_string())],
    );
    Ok(())
}

fn uninitialized_let<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let tree = cx.tree;
    let kind = declaration_kind(tree, node)?;
    let id = required(tree, node, Field::Id)?;
    if is_annotated(tree, id) {
        return Ok(());
    }
    cx.emitter.report(
        node,
        MessageKind::LetVariableWithNoInitialAndNoAnnotation,
        [("kind", kind.as_str().to_string())],
    );
    Ok(())
}

fn nullish_let<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let tree = cx.tree;
    let kind = declaration_kind(tree, node)?;
    let id = required(tree, node, Field::Id)?;
    let init = required(tree, node, Field::Init)?;
    if is_annotated(tree, id) {
        return Ok(());
    }
    if init.is_null_literal() || init.is_identifier("undefined") {
        cx.emitter.report(
            node,
            MessageKind::LetVariableInitialisedToNullishAndNoAnnotation,
            [("kind", kind.as_str().to_string())],
        );
    }
    Ok(())
}

fn unsafe_initializer<O: TypeOracle>(
    cx: &mut RuleContext<'_, O>,
    node: &SyntaxNode,
) -> Result<()> {
    let tree = cx.tree;
    let id = required(tree, node, Field::Id)?;
    let init = required(tree, node, Field::Init)?;
    // an explicit assertion is the author's own narrowing
    if init.kind.is_type_assertion() {
        return Ok(());
    }
    if classify(cx.oracle, init) != TypeClassification::Unsafe {
        return Ok(());
    }
    let message = if !is_annotated(tree, id) {
        MessageKind::VariableDeclarationInitialisedToAnyWithoutAnnotation
    } else if cx.config.allow_annotation_from_any {
        return Ok(());
    } else {
        MessageKind::VariableDeclarationInitialisedToAnyWithAnnotation
    };
    cx.emitter.report(node, message, NO_DATA);
    Ok(())
}

fn implicit_any_array<O: TypeOracle>(
    cx: &mut RuleContext<'_, O>,
    node: &SyntaxNode,
) -> Result<()> {
    let tree = cx.tree;
    let id = required(tree, node, Field::Id)?;
    let init = required(tree, node, Field::Init)?;
    if is_annotated(tree, id) {
        return Ok(());
    }
    let implicit = match init.kind {
        NodeKind::ArrayExpression => tree.children_by_field(init.id, Field::Elements).next().is_none(),
        NodeKind::CallExpression | NodeKind::NewExpression => {
            array_constructor_is_implicit_any(tree, cx.oracle, init)
        }
        _ => false,
    };
    if implicit {
        cx.emitter.report(
            node,
            MessageKind::VariableDeclarationInitialisedToAnyArrayWithoutAnnotation,
            NO_DATA,
        );
    }
    Ok(())
}

/// `Array()` and `Array(n)` with a numeric `n` build arrays of inferred
/// `any`. Two or more arguments build a literal array of their types, and a
/// single non-numeric argument builds a one-element array of its type.
/// Explicit type arguments (`new Array<string>()`) fix the element type, as
/// does any resolved result type other than `any[]`.
fn array_constructor_is_implicit_any<O: TypeOracle>(
    tree: &SyntaxTree,
    oracle: &O,
    call: &SyntaxNode,
) -> bool {
    let is_array = tree
        .child_by_field(call.id, Field::Callee)
        .is_some_and(|callee| callee.is_identifier("Array"));
    if !is_array || tree.child_by_field(call.id, Field::TypeArguments).is_some() {
        return false;
    }
    let typed_elsewhere = resolve(oracle, call)
        .is_some_and(|ty| classify_type(&ty) != TypeClassification::UnsafeArray);
    if typed_elsewhere {
        return false;
    }
    let mut args = tree.children_by_field(call.id, Field::Arguments);
    match (args.next(), args.next()) {
        (None, _) => true,
        (Some(arg), None) => {
            arg.kind != NodeKind::SpreadElement
                && resolve(oracle, arg).is_some_and(|ty| ty.is_numeric_like())
        }
        _ => false,
    }
}

fn pattern_binding<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    if classify(cx.oracle, node) != TypeClassification::Unsafe {
        return Ok(());
    }
    let name = node
        .text()
        .ok_or_else(|| anyhow!("binding identifier {} has no name", node.id))?;
    cx.emitter.report(
        node,
        MessageKind::PatternVariableDeclarationInitialisedToAny,
        [("name", name.to_string())],
    );
    Ok(())
}

fn loop_binding<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let tree = cx.tree;
    let left = required(tree, node, Field::Left)?;
    let right = required(tree, node, Field::Right)?;
    let Some(iterated) = resolve(cx.oracle, right) else {
        return Ok(());
    };
    let element_is_unsafe = iterated.is_any()
        || iterated
            .array_element()
            .is_some_and(|element| classify_type(&element).is_unsafe());
    if element_is_unsafe {
        cx.emitter
            .report(left, MessageKind::LoopVariableInitialisedToAny, NO_DATA);
    }
    Ok(())
}

fn return_value<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let tree = cx.tree;
    let (anchor, value) = match node.kind {
        NodeKind::ReturnStatement => (node, required(tree, node, Field::Argument)?),
        NodeKind::ArrowFunctionExpression => {
            let body = required(tree, node, Field::Body)?;
            (body, body)
        }
        other => bail!("node {} of kind {other:?} returns nothing", node.id),
    };
    if classify(cx.oracle, value).is_unsafe() {
        cx.emitter.report(anchor, MessageKind::ReturnAny, NO_DATA);
    }
    Ok(())
}

fn call_arguments<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let tree = cx.tree;
    for (index, arg) in tree.children_by_field(node.id, Field::Arguments).enumerate() {
        if classify(cx.oracle, arg).is_unsafe() {
            cx.emitter.report(
                node,
                MessageKind::PassedArgumentIsAny,
                [("index", index.to_string())],
            );
        }
    }
    Ok(())
}

fn assigned_value<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let NodeKind::AssignmentExpression { operator } = node.kind else {
        bail!("node {} is not an assignment", node.id);
    };
    let right = required(cx.tree, node, Field::Right)?;
    if classify(cx.oracle, right).is_unsafe() {
        cx.emitter.report(
            node,
            MessageKind::AssignmentValueIsAny,
            [("operator", operator.as_str().to_string())],
        );
    }
    Ok(())
}

fn updated_value<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let NodeKind::UpdateExpression { operator, .. } = node.kind else {
        bail!("node {} is not an update expression", node.id);
    };
    let operand = required(cx.tree, node, Field::Argument)?;
    if classify(cx.oracle, operand).is_unsafe() {
        cx.emitter.report(
            node,
            MessageKind::UpdateExpressionIsAny,
            [("operator", operator.as_str().to_string())],
        );
    }
    Ok(())
}

fn boolean_test<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let test = required(cx.tree, node, Field::Test)?;
    if classify(cx.oracle, test).is_unsafe() {
        cx.emitter
            .report(test, MessageKind::BooleanTestIsAny, NO_DATA);
    }
    Ok(())
}

fn switch_discriminant<O: TypeOracle>(
    cx: &mut RuleContext<'_, O>,
    node: &SyntaxNode,
) -> Result<()> {
    let discriminant = required(cx.tree, node, Field::Discriminant)?;
    if classify(cx.oracle, discriminant).is_unsafe() {
        cx.emitter
            .report(discriminant, MessageKind::SwitchDiscriminantIsAny, NO_DATA);
    }
    Ok(())
}

fn switch_case_test<O: TypeOracle>(cx: &mut RuleContext<'_, O>, node: &SyntaxNode) -> Result<()> {
    let test = required(cx.tree, node, Field::Test)?;
    if classify(cx.oracle, test).is_unsafe() {
        cx.emitter
            .report(test, MessageKind::SwitchCaseTestIsAny, NO_DATA);
    }
    Ok(())
}
