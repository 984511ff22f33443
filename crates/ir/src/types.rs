//! Contract between the engine and the type checker that resolved the tree.
//!
//! The engine never computes types. It asks a [`TypeOracle`] for the type of
//! a node and only inspects the answer through [`TypeDescriptor`]. Hosts
//! adapt their checker to these two traits; [`TypeTable`] is the adapter
//! for types that were resolved ahead of time and shipped as data.

use crate::ast::{NodeId, SyntaxNode};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// View over a resolved type.
pub trait TypeDescriptor: Sized {
    /// True only for the unsafe `any` type itself. A union that still has
    /// other constituents is not `any`.
    fn is_any(&self) -> bool;

    /// Element type when this is an array or read-only array type.
    fn array_element(&self) -> Option<Self>;

    /// Number, numeric literal, numeric enum, or a union made only of those.
    fn is_numeric_like(&self) -> bool;
}

/// Resolves the static type of a node.
pub trait TypeOracle {
    type Type: TypeDescriptor;

    fn resolve_type(&self, node: &SyntaxNode) -> anyhow::Result<Self::Type>;
}

impl<O: TypeOracle + ?Sized> TypeOracle for &O {
    type Type = O::Type;

    fn resolve_type(&self, node: &SyntaxNode) -> anyhow::Result<Self::Type> {
        (**self).resolve_type(node)
    }
}

/// Plain-data type description produced by a checker adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResolvedType {
    Any,
    Unknown,
    Never,
    Void,
    Null,
    Undefined,
    Boolean,
    String,
    Number,
    BigInt,
    NumberLiteral {
        value: f64,
    },
    StringLiteral {
        value: String,
    },
    NumericEnum {
        name: String,
    },
    Array {
        element: Box<ResolvedType>,
        #[serde(default)]
        readonly: bool,
    },
    Union {
        members: Vec<ResolvedType>,
    },
    /// Any other named or structural type (`Map<K, V>`, `{ x: any }`, ...).
    Named {
        name: String,
    },
}

impl ResolvedType {
    pub fn array_of(element: ResolvedType) -> Self {
        ResolvedType::Array {
            element: Box::new(element),
            readonly: false,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        ResolvedType::Named { name: name.into() }
    }
}

impl TypeDescriptor for ResolvedType {
    fn is_any(&self) -> bool {
        matches!(self, ResolvedType::Any)
    }

    fn array_element(&self) -> Option<Self> {
        match self {
            ResolvedType::Array { element, .. } => Some((**element).clone()),
            _ => None,
        }
    }

    fn is_numeric_like(&self) -> bool {
        match self {
            ResolvedType::Number
            | ResolvedType::NumberLiteral { .. }
            | ResolvedType::NumericEnum { .. } => true,
            ResolvedType::Union { members } => {
                !members.is_empty() && members.iter().all(|m| m.is_numeric_like())
            }
            _ => false,
        }
    }
}

/// Types keyed by node id, as dumped by a checker run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeTable {
    types: BTreeMap<NodeId, ResolvedType>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        serde_json::from_str(data).context("failed to parse type table")
    }

    pub fn insert(&mut self, node: NodeId, ty: ResolvedType) -> Option<ResolvedType> {
        self.types.insert(node, ty)
    }

    pub fn get(&self, node: NodeId) -> Option<&ResolvedType> {
        self.types.get(&node)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeOracle for TypeTable {
    type Type = ResolvedType;

    fn resolve_type(&self, node: &SyntaxNode) -> anyhow::Result<ResolvedType> {
        self.types
            .get(&node.id)
            .cloned()
            .ok_or_else(|| anyhow!("no type recorded for node {} ({:?})", node.id, node.kind))
    }
}
