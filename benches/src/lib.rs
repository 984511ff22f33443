//! Synthetic workloads shared by the benchmarks.

use ir::{
    AssignmentOperator, DeclarationKind, Field, NodeKind, ResolvedType, SyntaxTree, TreeBuilder,
    TypeTable,
};

/// Synthetic file with `functions` functions, each declaring, assigning,
/// calling and returning a mix of `any` and safe values.
pub fn synthetic_file(functions: usize) -> (SyntaxTree, TypeTable) {
    let mut b = TreeBuilder::new("bench.ts");
    let mut types = TypeTable::new();
    let program = b.root(NodeKind::Program);
    for i in 0..functions {
        let ty = if i % 3 == 0 {
            ResolvedType::Any
        } else {
            ResolvedType::Number
        };
        b.at(i * 6 + 1, 1);
        let func = b.child(program, Field::Body, NodeKind::FunctionDeclaration);
        let name = b.child(func, Field::Id, NodeKind::Identifier);
        b.value(name, format!("f{i}"));
        let body = b.child(func, Field::Body, NodeKind::BlockStatement);

        let decl = b.child(
            body,
            Field::Body,
            NodeKind::VariableDeclaration {
                kind: DeclarationKind::Let,
            },
        );
        let declarator = b.child(decl, Field::Declarations, NodeKind::VariableDeclarator);
        let id = b.child(declarator, Field::Id, NodeKind::Identifier);
        b.value(id, "v");
        let init = b.child(declarator, Field::Init, NodeKind::Identifier);
        b.value(init, "src");
        types.insert(init, ty.clone());

        let stmt = b.child(body, Field::Body, NodeKind::ExpressionStatement);
        let assign = b.child(
            stmt,
            Field::Expression,
            NodeKind::AssignmentExpression {
                operator: AssignmentOperator::Assign,
            },
        );
        let left = b.child(assign, Field::Left, NodeKind::Identifier);
        b.value(left, "v");
        let right = b.child(assign, Field::Right, NodeKind::Identifier);
        b.value(right, "src");
        types.insert(right, ty.clone());

        let stmt = b.child(body, Field::Body, NodeKind::ExpressionStatement);
        let call = b.child(stmt, Field::Expression, NodeKind::CallExpression);
        let callee = b.child(call, Field::Callee, NodeKind::Identifier);
        b.value(callee, "sink");
        for _ in 0..3 {
            let arg = b.child(call, Field::Arguments, NodeKind::Identifier);
            b.value(arg, "v");
            types.insert(arg, ty.clone());
        }

        let ret = b.child(body, Field::Body, NodeKind::ReturnStatement);
        let arg = b.child(ret, Field::Argument, NodeKind::Identifier);
        b.value(arg, "v");
        types.insert(arg, ty);
    }
    (b.finish(), types)
}
