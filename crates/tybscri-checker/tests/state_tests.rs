//! Node state transitions and checker options.

use crate::test_utils::*;
use crate::{CheckerOptions, NodeBinding, NodeScopes, NodeState, NodeStateTable, TypeEnvironment};
use tybscri_binder::{ScopeId, SymbolKind};
use tybscri_solver::{ParameterDef, Type};
use tybscri_syntax::{NodeIndex, TreeBuilder};

#[test]
fn test_transitions_follow_phase_order() {
    let mut table = NodeStateTable::new(2);
    let node = NodeIndex(0);
    let scopes = NodeScopes {
        scope: ScopeId(0),
        inner: None,
    };

    assert_eq!(table.phase_name(node), "Unresolved");
    assert!(!table.record_resolution(node, Type::Never, NodeBinding::None));
    assert!(!table.mark_generated(node));

    assert!(table.assign_scopes(node, scopes));
    assert!(!table.assign_scopes(node, scopes));
    assert_eq!(table.scopes(node), Some(scopes));
    assert!(table.resolved(node).is_none());

    assert!(table.record_resolution(node, Type::Never, NodeBinding::None));
    assert!(!table.record_resolution(node, Type::Unknown, NodeBinding::None));
    assert_eq!(table.resolved_type(node), Some(&Type::Never));

    assert!(table.mark_generated(node));
    assert!(!table.mark_generated(node));
    assert!(table.is_generated(node));
    assert_eq!(table.phase_name(node), "Generated");
    assert_eq!(table.resolved_type(node), Some(&Type::Never));
    assert_eq!(table.scopes(node), Some(scopes));

    assert_eq!(table.phase_name(NodeIndex(1)), "Unresolved");
    assert_eq!(table.phase_name(NodeIndex(7)), "Missing");
}

#[test]
fn test_check_leaves_every_node_type_resolved() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let one = b.number(1.0);
    let decl = b.const_decl("a", one);
    let a = b.ident("a");
    let root = b.block(vec![decl, a]);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    for node in arena.descendants(root) {
        assert!(
            matches!(result.nodes.get(node), Some(NodeState::TypeResolved(_))),
            "node {} is {}",
            node.0,
            result.nodes.phase_name(node)
        );
    }
}

#[test]
fn test_block_and_lambda_introduce_inner_scopes() {
    let env = TypeEnvironment::new();
    let expected = Type::func(
        vec![ParameterDef::new("n", env.well_known.number.clone())],
        env.well_known.number.clone(),
    );
    let mut b = TreeBuilder::new();
    let it = b.ident("it");
    let decl = b.const_decl("copy", it);
    let copy = b.ident("copy");
    let block = b.block(vec![decl, copy]);
    let root = b.implicit_lambda(block);
    let arena = b.finish();

    let (result, symbols) = check_with(
        &arena,
        root,
        &env,
        Vec::new(),
        Some(&expected),
        &CheckerOptions::default(),
    );
    assert!(codes(&result).is_empty(), "{:?}", result.diagnostics);

    let lambda_scopes = result.nodes.scopes(root).expect("scopes");
    let lambda_scope = lambda_scopes.inner.expect("lambda scope");
    let block_scopes = result.nodes.scopes(block).expect("scopes");
    assert_eq!(block_scopes.scope, lambda_scope);
    let block_scope = block_scopes.inner.expect("block scope");
    assert_eq!(
        symbols.scope(block_scope).and_then(|s| s.parent),
        Some(lambda_scope)
    );
    assert_eq!(result.nodes.scopes(copy).map(|s| s.scope), Some(block_scope));

    let NodeBinding::Symbol(it_symbol) = result.nodes.resolved(it).expect("resolved").binding
    else {
        panic!("identifier should bind a symbol");
    };
    assert!(matches!(
        symbols.symbol(it_symbol).map(|s| &s.kind),
        Some(SymbolKind::Parameter { index: 0, .. })
    ));
    assert_eq!(
        result.symbol_types.get(&it_symbol),
        Some(&env.well_known.number)
    );
    assert_type(&env, Some(&result.root_type), &expected);
}

#[test]
fn test_declaration_binding_records_symbol() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let one = b.number(1.0);
    let decl = b.let_decl("a", one);
    let root = b.block(vec![decl]);
    let arena = b.finish();

    let (result, symbols) = check_with(
        &arena,
        root,
        &env,
        Vec::new(),
        None,
        &CheckerOptions::default(),
    );
    let NodeBinding::Declaration { symbol } = result.nodes.resolved(decl).expect("resolved").binding
    else {
        panic!("declaration should bind its symbol");
    };
    assert_eq!(symbols.symbol(symbol).map(|s| &*s.name), Some("a"));
    assert!(!symbols.is_const(symbol));
    assert_eq!(result.symbol_types.get(&symbol), Some(&env.well_known.number));
}

#[test]
fn test_renamed_implicit_parameter() {
    let env = TypeEnvironment::new();
    let expected = Type::func(
        vec![ParameterDef::new("s", env.well_known.string.clone())],
        env.well_known.number.clone(),
    );
    let mut b = TreeBuilder::new();
    let self_ = b.ident("self");
    let root_body = b.member(self_, "length");
    let root = b.implicit_lambda(root_body);
    let arena = b.finish();

    let options = CheckerOptions {
        implicit_lambda_parameter: "self".to_string(),
        ..CheckerOptions::default()
    };
    let (result, _) = check_with(&arena, root, &env, Vec::new(), Some(&expected), &options);
    assert!(codes(&result).is_empty(), "{:?}", result.diagnostics);
    assert_eq!(result.type_of(self_), Some(&env.well_known.string));
}

#[test]
fn test_options_from_json() {
    let options: CheckerOptions = serde_json::from_str(
        r#"{"fileName": "rules.tys", "implicitLambdaParameter": "self", "reportNonNarrowableGuards": false}"#,
    )
    .expect("valid options");
    assert_eq!(options.file_name, "rules.tys");
    assert_eq!(options.implicit_lambda_parameter, "self");
    assert!(!options.report_non_narrowable_guards);
    assert_eq!(
        options.max_resolution_depth,
        CheckerOptions::default().max_resolution_depth
    );

    let defaults: CheckerOptions = serde_json::from_str("{}").expect("empty options");
    assert_eq!(defaults, CheckerOptions::default());
}
