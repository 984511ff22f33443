use super::*;
use ir::{Field, NodeKind, ResolvedType, TreeBuilder, TypeTable};
use serde_json::json;
use std::collections::BTreeMap;

fn single_node(ty: Option<ResolvedType>) -> (SyntaxTree, TypeTable) {
    let mut b = TreeBuilder::new("a.ts");
    let id = b.root(NodeKind::Identifier);
    b.value(id, "x");
    let mut types = TypeTable::new();
    if let Some(ty) = ty {
        types.insert(id, ty);
    }
    (b.finish(), types)
}

#[test]
fn classifies_any_and_arrays_of_any() {
    assert_eq!(classify_type(&ResolvedType::Any), TypeClassification::Unsafe);
    assert_eq!(
        classify_type(&ResolvedType::array_of(ResolvedType::Any)),
        TypeClassification::UnsafeArray
    );
    let readonly = ResolvedType::Array {
        element: Box::new(ResolvedType::Any),
        readonly: true,
    };
    assert_eq!(classify_type(&readonly), TypeClassification::UnsafeArray);
    assert_eq!(
        classify_type(&ResolvedType::array_of(ResolvedType::array_of(ResolvedType::Any))),
        TypeClassification::Safe
    );
    assert_eq!(classify_type(&ResolvedType::Number), TypeClassification::Safe);
    assert_eq!(classify_type(&ResolvedType::Unknown), TypeClassification::Safe);
}

#[test]
fn unions_with_any_are_safe_unless_collapsed() {
    let union = ResolvedType::Union {
        members: vec![ResolvedType::Any, ResolvedType::Null],
    };
    assert_eq!(classify_type(&union), TypeClassification::Safe);
}

#[test]
fn classification_is_repeatable_and_oracle_failures_are_safe() {
    let (tree, types) = single_node(Some(ResolvedType::Any));
    let node = tree.node(0).unwrap();
    assert_eq!(classify(&types, node), TypeClassification::Unsafe);
    assert_eq!(classify(&types, node), classify(&types, node));

    let (tree, types) = single_node(None);
    assert_eq!(classify(&types, tree.node(0).unwrap()), TypeClassification::Safe);
}

#[test]
fn is_unsafe_covers_both_unsafe_classes() {
    assert!(TypeClassification::Unsafe.is_unsafe());
    assert!(TypeClassification::UnsafeArray.is_unsafe());
    assert!(!TypeClassification::Safe.is_unsafe());
}

#[test]
fn message_kinds_use_camel_case_wire_names() {
    for kind in MessageKind::ALL {
        let v = serde_json::to_value(kind).unwrap();
        assert_eq!(v, json!(kind.as_str()));
        let back: MessageKind = serde_json::from_value(v).unwrap();
        assert_eq!(back, kind);
        for name in kind.placeholders() {
            assert!(
                kind.template().contains(&format!("{{{{{name}}}}}")),
                "{kind} template does not mention {name}"
            );
        }
    }
    assert_eq!(
        MessageKind::VariableDeclarationInitialisedToAnyArrayWithoutAnnotation.to_string(),
        "variableDeclarationInitialisedToAnyArrayWithoutAnnotation"
    );
}

#[test]
fn render_fills_placeholders() {
    let record = DiagnosticRecord {
        rule_id: RULE_ID.into(),
        message: MessageKind::LetVariableInitialisedToNullishAndNoAnnotation,
        anchor: 3,
        meta: Default::default(),
        data: BTreeMap::from([("kind".to_string(), "var".to_string())]),
    };
    assert!(record
        .render()
        .starts_with("Variable declared with var and initialised to `null` or `undefined`"));

    let record = DiagnosticRecord {
        message: MessageKind::TypeReferenceResolvesToAny,
        data: BTreeMap::from([("typeName".to_string(), "T".to_string())]),
        ..record
    };
    assert_eq!(record.render(), "Referenced type T resolves to `any`.");
}

#[test]
fn emitter_drops_exact_duplicates_only() {
    let (tree, _) = single_node(None);
    let node = tree.node(0).unwrap();
    let mut out: Vec<DiagnosticRecord> = Vec::new();
    let mut emitter = Emitter::new(&mut out);
    assert!(emitter.report(node, MessageKind::PassedArgumentIsAny, [("index", "0".to_string())]));
    assert!(emitter.report(node, MessageKind::PassedArgumentIsAny, [("index", "1".to_string())]));
    assert!(!emitter.report(node, MessageKind::PassedArgumentIsAny, [("index", "0".to_string())]));
    assert!(emitter.report(node, MessageKind::ReturnAny, Vec::new()));
    assert_eq!(emitter.emitted(), 3);
    drop(emitter);
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|r| r.rule_id == "no-unsafe-any" && r.anchor == 0));
}

#[test]
fn configuration_defaults_and_options() {
    assert!(!RuleConfiguration::default().allow_annotation_from_any);
    assert_eq!(
        RuleConfiguration::from_options(&json!(null)).unwrap(),
        RuleConfiguration::default()
    );
    assert_eq!(
        RuleConfiguration::from_options(&json!([])).unwrap(),
        RuleConfiguration::default()
    );
    let cfg = RuleConfiguration::from_options(&json!([{ "allowAnnotationFromAny": true }])).unwrap();
    assert!(cfg.allow_annotation_from_any);
    let cfg = RuleConfiguration::from_options(&json!({})).unwrap();
    assert!(!cfg.allow_annotation_from_any);
}

#[test]
fn configuration_rejects_unknown_or_malformed_options() {
    assert!(RuleConfiguration::from_options(&json!({ "allowAny": true })).is_err());
    assert!(RuleConfiguration::from_options(&json!({ "allowAnnotationFromAny": "yes" })).is_err());
    assert!(RuleConfiguration::from_options(&json!([{}, {}])).is_err());
    assert!(RuleConfiguration::from_options(&json!(true)).is_err());
}

#[test]
fn rule_metadata() {
    assert_eq!(RULE_META.name, "no-unsafe-any");
    assert_eq!(RULE_META.kind, "problem");
    assert!(!RULE_META.recommended);
}

#[test]
fn shapes_select_rules() {
    let mut b = TreeBuilder::new("a.ts");
    let switch = b.root(NodeKind::SwitchStatement);
    b.child(switch, Field::Discriminant, NodeKind::Identifier);
    let default_case = b.child(switch, Field::Cases, NodeKind::SwitchCase);
    let case = b.child(switch, Field::Cases, NodeKind::SwitchCase);
    b.child(case, Field::Test, NodeKind::Literal);
    let ret = b.root(NodeKind::ReturnStatement);
    let arrow = b.root(NodeKind::ArrowFunctionExpression);
    b.child(arrow, Field::Body, NodeKind::BlockStatement);
    let tree = b.finish();

    let rules = |id| matching_rules(&tree, tree.node(id).unwrap());
    assert_eq!(rules(switch), vec![ContextRule::SwitchDiscriminant]);
    assert!(rules(default_case).is_empty());
    assert_eq!(rules(case), vec![ContextRule::SwitchCaseTest]);
    // bare `return;` and block bodies return nothing
    assert!(rules(ret).is_empty());
    assert!(rules(arrow).is_empty());
    assert_eq!(ContextRule::SwitchCaseTest.name(), "switch-case-test");
}
