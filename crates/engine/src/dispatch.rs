//! Single pre-order walk that matches every node against the syntactic
//! shapes of the context rules.

use crate::config::RuleConfiguration;
use crate::emitter::{DiagnosticSink, Emitter};
use crate::rules::{destructuring_declarator, ContextRule, RuleContext};
use ir::{Field, NodeKind, SyntaxNode, SyntaxTree, TypeOracle};
use tracing::{debug, warn};

/// Rules whose shape `node` satisfies, in the order they run.
pub fn matching_rules(tree: &SyntaxTree, node: &SyntaxNode) -> Vec<ContextRule> {
    let has = |field: Field| tree.child_by_field(node.id, field).is_some();
    match node.kind {
        NodeKind::TypeReference => vec![ContextRule::TypeReference],
        NodeKind::VariableDeclarator => declarator_rules(tree, node),
        NodeKind::Identifier if destructuring_declarator(tree, node).is_some() => {
            vec![ContextRule::PatternBinding]
        }
        NodeKind::ForOfStatement => vec![ContextRule::LoopBinding],
        NodeKind::ReturnStatement if has(Field::Argument) => vec![ContextRule::ReturnValue],
        NodeKind::ArrowFunctionExpression
            if tree
                .child_by_field(node.id, Field::Body)
                .is_some_and(|body| body.kind != NodeKind::BlockStatement) =>
        {
            vec![ContextRule::ReturnValue]
        }
        NodeKind::CallExpression | NodeKind::NewExpression => vec![ContextRule::CallArguments],
        NodeKind::AssignmentExpression { .. } => vec![ContextRule::AssignedValue],
        NodeKind::UpdateExpression { .. } => vec![ContextRule::UpdatedValue],
        NodeKind::IfStatement
        | NodeKind::WhileStatement
        | NodeKind::DoWhileStatement
        | NodeKind::ForStatement
        | NodeKind::ConditionalExpression
            if has(Field::Test) =>
        {
            vec![ContextRule::BooleanTest]
        }
        NodeKind::SwitchStatement => vec![ContextRule::SwitchDiscriminant],
        NodeKind::SwitchCase if has(Field::Test) => vec![ContextRule::SwitchCaseTest],
        NodeKind::Identifier
        | NodeKind::ReturnStatement
        | NodeKind::ArrowFunctionExpression
        | NodeKind::IfStatement
        | NodeKind::WhileStatement
        | NodeKind::DoWhileStatement
        | NodeKind::ForStatement
        | NodeKind::ConditionalExpression
        | NodeKind::SwitchCase
        | NodeKind::Program
        | NodeKind::VariableDeclaration { .. }
        | NodeKind::ObjectPattern
        | NodeKind::ArrayPattern
        | NodeKind::Property
        | NodeKind::AssignmentPattern
        | NodeKind::RestElement
        | NodeKind::TypeAnnotation
        | NodeKind::KeywordType
        | NodeKind::AsExpression
        | NodeKind::TypeAssertion
        | NodeKind::FunctionDeclaration
        | NodeKind::FunctionExpression
        | NodeKind::BlockStatement
        | NodeKind::ExpressionStatement
        | NodeKind::ForInStatement
        | NodeKind::MemberExpression
        | NodeKind::BinaryExpression
        | NodeKind::ArrayExpression
        | NodeKind::ObjectExpression
        | NodeKind::SpreadElement
        | NodeKind::Literal
        | NodeKind::Other => Vec::new(),
    }
}

fn declarator_rules(tree: &SyntaxTree, declarator: &SyntaxNode) -> Vec<ContextRule> {
    let Some(declaration) = tree.parent(declarator.id) else {
        return Vec::new();
    };
    let NodeKind::VariableDeclaration { kind } = declaration.kind else {
        return Vec::new();
    };
    let has_init = tree.child_by_field(declarator.id, Field::Init).is_some();
    match (has_init, kind.is_mutable()) {
        (false, true) if !is_loop_binding(tree, declaration) => vec![ContextRule::UninitializedLet],
        (false, _) => Vec::new(),
        (true, true) => vec![
            ContextRule::NullishLet,
            ContextRule::UnsafeInitializer,
            ContextRule::ImplicitAnyArray,
        ],
        (true, false) => vec![ContextRule::UnsafeInitializer, ContextRule::ImplicitAnyArray],
    }
}

// `for (let x of xs)` gets its value from the loop.
fn is_loop_binding(tree: &SyntaxTree, declaration: &SyntaxNode) -> bool {
    declaration.field == Some(Field::Left)
        && tree.parent(declaration.id).is_some_and(|p| {
            matches!(p.kind, NodeKind::ForOfStatement | NodeKind::ForInStatement)
        })
}

/// Runs every matching rule over `tree` and returns the number of records
/// forwarded to `sink`.
pub(crate) fn run<O: TypeOracle>(
    tree: &SyntaxTree,
    oracle: &O,
    config: &RuleConfiguration,
    sink: &mut dyn DiagnosticSink,
) -> usize {
    debug!(file = %tree.file_path, nodes = tree.len(), "starting no-unsafe-any pass");
    let mut cx = RuleContext {
        tree,
        oracle,
        config,
        emitter: Emitter::new(sink),
    };
    for node in tree.preorder() {
        for rule in matching_rules(tree, node) {
            if let Err(e) = rule.apply(&mut cx, node) {
                warn!(
                    file = %tree.file_path,
                    rule = rule.name(),
                    node = node.id,
                    error = ?e,
                    "rule skipped on malformed node"
                );
            }
        }
    }
    let emitted = cx.emitter.emitted();
    debug!(file = %tree.file_path, diagnostics = emitted, "no-unsafe-any pass completed");
    emitted
}
