//! Analysis engine for the `no-unsafe-any` rule.
//!
//! Walks a type-resolved [`SyntaxTree`] once and reports every position where
//! a value typed as `any` (or `any[]`) flows into a typed context. Types come
//! from a host-supplied [`TypeOracle`]; findings go to a [`DiagnosticSink`]
//! in document order.

use ir::{SyntaxTree, TypeOracle};
use rayon::prelude::*;
use tracing::debug;

pub mod classify;
pub mod config;
mod dispatch;
pub mod emitter;
pub mod messages;
mod rules;

pub use classify::{classify, classify_type, TypeClassification};
pub use config::RuleConfiguration;
pub use dispatch::matching_rules;
pub use emitter::{DiagnosticRecord, DiagnosticSink, Emitter};
pub use messages::MessageKind;
pub use rules::ContextRule;

pub const RULE_ID: &str = "no-unsafe-any";

/// Static description of the rule for hosts that list their rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
    pub category: &'static str,
    pub recommended: bool,
}

pub const RULE_META: RuleMeta = RuleMeta {
    name: RULE_ID,
    description: "Detects usages of any which can cause type safety holes within your codebase",
    kind: "problem",
    category: "Possible Errors",
    recommended: false,
};

/// Analyses one tree and returns its findings in document order.
///
/// # Example
/// ```
/// use engine::{analyze, MessageKind, RuleConfiguration};
/// use ir::{DeclarationKind, Field, NodeKind, TreeBuilder, TypeTable};
///
/// // let x;
/// let mut b = TreeBuilder::new("a.ts");
/// let decl = b.root(NodeKind::VariableDeclaration { kind: DeclarationKind::Let });
/// let declarator = b.child(decl, Field::Declarations, NodeKind::VariableDeclarator);
/// let id = b.child(declarator, Field::Id, NodeKind::Identifier);
/// b.value(id, "x");
/// let tree = b.finish();
///
/// let found = analyze(&tree, &TypeTable::new(), &RuleConfiguration::default());
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].message, MessageKind::LetVariableWithNoInitialAndNoAnnotation);
/// assert_eq!(found[0].render(), "Variable declared with let with no initial value is implicitly typed as `any`.");
/// ```
pub fn analyze<O: TypeOracle>(
    tree: &SyntaxTree,
    oracle: &O,
    config: &RuleConfiguration,
) -> Vec<DiagnosticRecord> {
    let mut out = Vec::new();
    analyze_with_sink(tree, oracle, config, &mut out);
    out
}

/// Same as [`analyze`] but streams findings into `sink`. Returns the number
/// of records reported.
pub fn analyze_with_sink<O: TypeOracle>(
    tree: &SyntaxTree,
    oracle: &O,
    config: &RuleConfiguration,
    sink: &mut dyn DiagnosticSink,
) -> usize {
    dispatch::run(tree, oracle, config, sink)
}

/// Analyses independent files in parallel. Results keep the input order.
pub fn analyze_files<O: TypeOracle + Sync>(
    units: &[(&SyntaxTree, &O)],
    config: &RuleConfiguration,
) -> Vec<Vec<DiagnosticRecord>> {
    debug!(files = units.len(), "analyzing files");
    units
        .par_iter()
        .map(|(tree, oracle)| analyze(tree, *oracle, config))
        .collect()
}

#[cfg(test)]
mod tests;
