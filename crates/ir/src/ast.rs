//! Typed syntax tree consumed by the analysis engine.
//!
//! Nodes live in a flat arena owned by [`SyntaxTree`] and refer to each other
//! by [`NodeId`]. The `parent` link is a plain index used only for context
//! lookups; the tree is never mutated once [`TreeBuilder::finish`] returns.
//! Every node also records the [`Field`] it occupies in its parent, which
//! plays the role of tree-sitter's `child_by_field_name`.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Index of a node within its [`SyntaxTree`]. Doubles as the type oracle
/// query key.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meta {
    pub file: String,
    pub line: usize,
    pub column: usize,
    /// Byte range in the source file.
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Let => "let",
            DeclarationKind::Var => "var",
        }
    }

    /// `let` and `var` bindings may be declared without a value.
    pub fn is_mutable(self) -> bool {
        matches!(self, DeclarationKind::Let | DeclarationKind::Var)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
    #[serde(rename = "%=")]
    RemAssign,
    #[serde(rename = "**=")]
    PowAssign,
    #[serde(rename = "<<=")]
    ShlAssign,
    #[serde(rename = ">>=")]
    ShrAssign,
    #[serde(rename = ">>>=")]
    UShrAssign,
    #[serde(rename = "|=")]
    BitOrAssign,
    #[serde(rename = "^=")]
    BitXorAssign,
    #[serde(rename = "&=")]
    BitAndAssign,
    #[serde(rename = "||=")]
    OrAssign,
    #[serde(rename = "&&=")]
    AndAssign,
    #[serde(rename = "??=")]
    NullishAssign,
}

impl AssignmentOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
            AssignmentOperator::RemAssign => "%=",
            AssignmentOperator::PowAssign => "**=",
            AssignmentOperator::ShlAssign => "<<=",
            AssignmentOperator::ShrAssign => ">>=",
            AssignmentOperator::UShrAssign => ">>>=",
            AssignmentOperator::BitOrAssign => "|=",
            AssignmentOperator::BitXorAssign => "^=",
            AssignmentOperator::BitAndAssign => "&=",
            AssignmentOperator::OrAssign => "||=",
            AssignmentOperator::AndAssign => "&&=",
            AssignmentOperator::NullishAssign => "??=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

/// Syntactic kind of a node. Attributes the rules inspect ride on the
/// variant; everything the analysis has no opinion about is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Program,
    VariableDeclaration { kind: DeclarationKind },
    VariableDeclarator,
    Identifier,
    ObjectPattern,
    ArrayPattern,
    /// Member of an object literal or object pattern (`key: value`).
    Property,
    /// Binding with a default value (`x = 1` inside a pattern).
    AssignmentPattern,
    RestElement,
    TypeAnnotation,
    TypeReference,
    /// Built-in type keyword such as `number` or `any`.
    KeywordType,
    AsExpression,
    TypeAssertion,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
    BlockStatement,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    SwitchStatement,
    SwitchCase,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    AssignmentExpression { operator: AssignmentOperator },
    UpdateExpression { operator: UpdateOperator, prefix: bool },
    BinaryExpression,
    ArrayExpression,
    ObjectExpression,
    SpreadElement,
    Literal,
    Other,
}

impl NodeKind {
    pub fn is_type_assertion(self) -> bool {
        matches!(self, NodeKind::AsExpression | NodeKind::TypeAssertion)
    }

    pub fn is_pattern(self) -> bool {
        matches!(
            self,
            NodeKind::ObjectPattern
                | NodeKind::ArrayPattern
                | NodeKind::AssignmentPattern
                | NodeKind::RestElement
        )
    }
}

/// Role of a node inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Body,
    Declarations,
    Id,
    Init,
    TypeAnnotation,
    ReturnType,
    TypeArguments,
    Params,
    Expression,
    Argument,
    Arguments,
    Callee,
    Object,
    Property,
    Properties,
    Elements,
    Key,
    Value,
    Left,
    Right,
    Test,
    Update,
    Consequent,
    Alternate,
    Discriminant,
    Cases,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub id: NodeId,
    /// Back-reference to the parent node, if any.
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    /// Role of the node inside its parent.
    #[serde(default)]
    pub field: Option<Field>,
    /// Identifier name, literal value or verbatim text of a type reference.
    #[serde(default)]
    pub value: JsonValue,
    /// Ordered children.
    #[serde(default)]
    pub children: Vec<NodeId>,
    pub meta: Meta,
}

impl SyntaxNode {
    /// Text carried by the node, when its value is a string.
    pub fn text(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        self.kind == NodeKind::Identifier && self.text() == Some(name)
    }

    pub fn is_null_literal(&self) -> bool {
        self.kind == NodeKind::Literal && self.value.is_null()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntaxTree {
    pub file_path: String,
    /// Top-level nodes in document order.
    pub roots: Vec<NodeId>,
    /// Node arena, indexed by `id`.
    pub nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Loads a tree dumped by a parser adapter and checks its links.
    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        let tree: SyntaxTree = serde_json::from_str(data).context("failed to parse syntax tree")?;
        tree.validate()?;
        Ok(tree)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Checks that ids match arena positions and that parent and child
    /// links agree, so every node is reachable from exactly one place.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut owners = vec![None; self.nodes.len()];
        for (pos, node) in self.nodes.iter().enumerate() {
            if node.id != pos {
                bail!("node at position {pos} has id {}", node.id);
            }
            for &child in &node.children {
                let Some(c) = self.nodes.get(child) else {
                    bail!("node {pos} references missing child {child}");
                };
                if c.parent != Some(pos) {
                    bail!("child {child} of node {pos} points to parent {:?}", c.parent);
                }
                if owners[child].replace(pos).is_some() {
                    bail!("node {child} is listed as a child more than once");
                }
            }
        }
        let mut listed_roots = vec![false; self.nodes.len()];
        for &root in &self.roots {
            match self.nodes.get(root) {
                Some(n) if n.parent.is_none() => {}
                Some(_) => bail!("root {root} has a parent"),
                None => bail!("missing root node {root}"),
            }
            if std::mem::replace(&mut listed_roots[root], true) {
                bail!("root {root} is listed more than once");
            }
        }
        for (pos, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() && owners[pos].is_none() {
                bail!("node {pos} is not listed among its parent's children");
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id)
    }

    /// Gets the parent node of `id`, if any.
    pub fn parent(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes
            .get(id)
            .and_then(|n| n.parent.and_then(|p| self.nodes.get(p)))
    }

    /// Returns the direct children of node `id` in source order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|c| self.nodes.get(*c))
    }

    /// First child of `id` occupying `field`.
    pub fn child_by_field(&self, id: NodeId, field: Field) -> Option<&SyntaxNode> {
        self.children(id).find(|c| c.field == Some(field))
    }

    /// All children of `id` occupying `field`, in order.
    pub fn children_by_field(
        &self,
        id: NodeId,
        field: Field,
    ) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.children(id).filter(move |c| c.field == Some(field))
    }

    /// Walks from the parent of `id` up to its root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SyntaxNode> + '_ {
        std::iter::successors(self.parent(id), move |n| self.parent(n.id))
    }

    /// Depth-first pre-order walk over every root, in document order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }
}

pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            if let Some(node) = self.tree.nodes.get(id) {
                self.stack.extend(node.children.iter().rev().copied());
                return Some(node);
            }
        }
    }
}

/// Incremental constructor used by parser adapters and fixtures.
///
/// # Example
/// ```
/// use ir::{Field, NodeKind, TreeBuilder};
/// let mut b = TreeBuilder::new("a.ts");
/// let program = b.root(NodeKind::Program);
/// let stmt = b.child(program, Field::Body, NodeKind::ExpressionStatement);
/// let tree = b.finish();
/// assert_eq!(tree.parent(stmt).map(|n| n.id), Some(program));
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    tree: SyntaxTree,
    line: usize,
    column: usize,
}

impl TreeBuilder {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            tree: SyntaxTree {
                file_path: file_path.into(),
                ..Default::default()
            },
            line: 1,
            column: 1,
        }
    }

    /// Sets the position recorded for nodes added from now on.
    pub fn at(&mut self, line: usize, column: usize) -> &mut Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn root(&mut self, kind: NodeKind) -> NodeId {
        let id = self.push(None, None, kind);
        self.tree.roots.push(id);
        id
    }

    /// Appends a child to `parent`.
    ///
    /// # Panics
    /// Panics if `parent` was not produced by this builder.
    pub fn child(&mut self, parent: NodeId, field: Field, kind: NodeKind) -> NodeId {
        assert!(parent < self.tree.nodes.len(), "unknown parent node {parent}");
        let id = self.push(Some(parent), Some(field), kind);
        self.tree.nodes[parent].children.push(id);
        id
    }

    /// Stores the identifier name or literal value of `id`.
    pub fn value(&mut self, id: NodeId, value: impl Into<JsonValue>) -> &mut Self {
        if let Some(node) = self.tree.nodes.get_mut(id) {
            node.value = value.into();
        }
        self
    }

    pub fn span(&mut self, id: NodeId, start: usize, end: usize) -> &mut Self {
        if let Some(node) = self.tree.nodes.get_mut(id) {
            node.meta.span = Span { start, end };
        }
        self
    }

    pub fn finish(self) -> SyntaxTree {
        self.tree
    }

    fn push(&mut self, parent: Option<NodeId>, field: Option<Field>, kind: NodeKind) -> NodeId {
        let id = self.tree.nodes.len();
        self.tree.nodes.push(SyntaxNode {
            id,
            parent,
            kind,
            field,
            value: JsonValue::Null,
            children: Vec::new(),
            meta: Meta {
                file: self.tree.file_path.clone(),
                line: self.line,
                column: self.column,
                span: Span::default(),
            },
        });
        id
    }
}
