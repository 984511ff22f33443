//! Intermediate representation shared by the `no-unsafe-any` engine and the
//! hosts that feed it.
//!
//! The module [`ast`] holds the type-resolved syntax tree produced by a
//! parser adapter; [`types`] holds the type oracle contract. Both serialise
//! with `serde`, so a host can hand over a JSON dump of a tree and its
//! resolved types.

pub mod ast;
pub mod types;

pub use ast::{
    AssignmentOperator, DeclarationKind, Field, Meta, NodeId, NodeKind, Preorder, Span,
    SyntaxNode, SyntaxTree, TreeBuilder, UpdateOperator,
};
pub use types::{ResolvedType, TypeDescriptor, TypeOracle, TypeTable};
