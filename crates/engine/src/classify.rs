//! Reduction of oracle answers to the three classes the rules care about.

use ir::{SyntaxNode, TypeDescriptor, TypeOracle};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeClassification {
    /// Exactly the `any` type.
    Unsafe,
    /// An array (or read-only array) of `any`.
    UnsafeArray,
    Safe,
}

impl TypeClassification {
    /// True for both `Unsafe` and `UnsafeArray`.
    pub fn is_unsafe(self) -> bool {
        !matches!(self, TypeClassification::Safe)
    }
}

pub fn classify_type<T: TypeDescriptor>(ty: &T) -> TypeClassification {
    if ty.is_any() {
        return TypeClassification::Unsafe;
    }
    match ty.array_element() {
        Some(element) if element.is_any() => TypeClassification::UnsafeArray,
        _ => TypeClassification::Safe,
    }
}

/// Resolves the type of `node`, logging and swallowing oracle failures.
pub fn resolve<O: TypeOracle>(oracle: &O, node: &SyntaxNode) -> Option<O::Type> {
    match oracle.resolve_type(node) {
        Ok(ty) => Some(ty),
        Err(e) => {
            debug!(node = node.id, kind = ?node.kind, error = ?e, "type unavailable");
            None
        }
    }
}

/// Classifies the resolved type of `node`. Nodes the oracle cannot resolve
/// are `Safe`.
pub fn classify<O: TypeOracle>(oracle: &O, node: &SyntaxNode) -> TypeClassification {
    resolve(oracle, node)
        .map(|ty| classify_type(&ty))
        .unwrap_or(TypeClassification::Safe)
}
