#![allow(dead_code)]
// Fixture builder shared by the integration tests. Trees are assembled by
// hand the way a parser adapter would emit them, and types are recorded per
// node the way a checker dump would.

use engine::{analyze, DiagnosticRecord, MessageKind, RuleConfiguration};
use ir::{DeclarationKind, Field, NodeId, NodeKind, ResolvedType, SyntaxTree, TreeBuilder, TypeTable};
use serde_json::Value as JsonValue;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}

pub struct Fixture {
    pub b: TreeBuilder,
    pub types: TypeTable,
    pub program: NodeId,
}

impl Fixture {
    pub fn new() -> Self {
        init_tracing();
        let mut b = TreeBuilder::new("fixture.ts");
        let program = b.root(NodeKind::Program);
        Self {
            b,
            types: TypeTable::new(),
            program,
        }
    }

    /// Line recorded for the nodes added next.
    pub fn line(&mut self, line: usize) -> &mut Self {
        self.b.at(line, 1);
        self
    }

    pub fn node(&mut self, parent: NodeId, field: Field, kind: NodeKind) -> NodeId {
        self.b.child(parent, field, kind)
    }

    pub fn typed(&mut self, parent: NodeId, field: Field, kind: NodeKind, ty: ResolvedType) -> NodeId {
        let id = self.node(parent, field, kind);
        self.types.insert(id, ty);
        id
    }

    pub fn ident(&mut self, parent: NodeId, field: Field, name: &str) -> NodeId {
        let id = self.node(parent, field, NodeKind::Identifier);
        self.b.value(id, name);
        id
    }

    pub fn typed_ident(&mut self, parent: NodeId, field: Field, name: &str, ty: ResolvedType) -> NodeId {
        let id = self.ident(parent, field, name);
        self.types.insert(id, ty);
        id
    }

    pub fn literal(&mut self, parent: NodeId, field: Field, value: JsonValue, ty: ResolvedType) -> NodeId {
        let id = self.typed(parent, field, NodeKind::Literal, ty);
        self.b.value(id, value);
        id
    }

    pub fn number(&mut self, parent: NodeId, field: Field, value: f64) -> NodeId {
        self.literal(parent, field, value.into(), ResolvedType::NumberLiteral { value })
    }

    /// `(1 as <ty>)`, typed as `ty`.
    pub fn cast(&mut self, parent: NodeId, field: Field, ty: ResolvedType) -> NodeId {
        let cast = self.typed(parent, field, NodeKind::AsExpression, ty);
        self.number(cast, Field::Expression, 1.0);
        let keyword = self.node(cast, Field::TypeAnnotation, NodeKind::KeywordType);
        self.b.value(keyword, "any");
        cast
    }

    pub fn any_cast(&mut self, parent: NodeId, field: Field) -> NodeId {
        self.cast(parent, field, ResolvedType::Any)
    }

    pub fn any_array_cast(&mut self, parent: NodeId, field: Field) -> NodeId {
        self.cast(parent, field, ResolvedType::array_of(ResolvedType::Any))
    }

    pub fn declaration(&mut self, kind: DeclarationKind) -> NodeId {
        self.node(self.program, Field::Body, NodeKind::VariableDeclaration { kind })
    }

    /// Adds `name` to `declaration`; returns `(declarator, binding)`.
    pub fn declarator(&mut self, declaration: NodeId, name: &str) -> (NodeId, NodeId) {
        let declarator = self.node(declaration, Field::Declarations, NodeKind::VariableDeclarator);
        let id = self.ident(declarator, Field::Id, name);
        (declarator, id)
    }

    /// `kind name` as its own statement; returns `(declarator, binding)`.
    pub fn declare(&mut self, kind: DeclarationKind, name: &str) -> (NodeId, NodeId) {
        let declaration = self.declaration(kind);
        self.declarator(declaration, name)
    }

    /// `: keyword` on a binding.
    pub fn annotate(&mut self, binding: NodeId, keyword: &str) -> NodeId {
        let ann = self.node(binding, Field::TypeAnnotation, NodeKind::TypeAnnotation);
        let ty = self.node(ann, Field::TypeAnnotation, NodeKind::KeywordType);
        self.b.value(ty, keyword);
        ann
    }

    pub fn statement(&mut self, kind: NodeKind) -> NodeId {
        self.node(self.program, Field::Body, kind)
    }

    /// Expression statement under the program; returns the statement.
    pub fn expression_statement(&mut self) -> NodeId {
        self.statement(NodeKind::ExpressionStatement)
    }

    /// `callee(...)` with no arguments yet.
    pub fn call(&mut self, parent: NodeId, field: Field, callee: &str) -> NodeId {
        let call = self.node(parent, field, NodeKind::CallExpression);
        self.ident(call, Field::Callee, callee);
        call
    }

    pub fn finish(self) -> (SyntaxTree, TypeTable) {
        (self.b.finish(), self.types)
    }

    pub fn run(self, config: &RuleConfiguration) -> Vec<DiagnosticRecord> {
        let (tree, types) = self.finish();
        analyze(&tree, &types, config)
    }

    pub fn run_default(self) -> Vec<DiagnosticRecord> {
        self.run(&RuleConfiguration::default())
    }
}

pub fn messages(records: &[DiagnosticRecord]) -> Vec<MessageKind> {
    records.iter().map(|r| r.message).collect()
}

pub fn anchors(records: &[DiagnosticRecord]) -> Vec<NodeId> {
    records.iter().map(|r| r.anchor).collect()
}
