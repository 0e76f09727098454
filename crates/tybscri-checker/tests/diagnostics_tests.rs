//! Diagnostics reported while resolving.

use crate::test_utils::*;
use crate::{CheckerOptions, TypeEnvironment};
use tybscri_common::diagnostic_codes as codes_;
use tybscri_solver::{MemberDef, ParameterDef, Type};
use tybscri_syntax::TreeBuilder;

fn unary_function(env: &TypeEnvironment) -> Type {
    Type::func(
        vec![ParameterDef::new("x", env.well_known.number.clone())],
        env.well_known.string.clone(),
    )
}

#[test]
fn test_unknown_name() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let root = b.ident("missing");
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::CANNOT_FIND_NAME]);
    assert_eq!(result.diagnostics[0].span, arena.span(root));
    assert!(result.diagnostics[0].message.contains("missing"));
    assert!(result.root_type.is_unknown());
    assert!(result.has_errors());
}

#[test]
fn test_unknown_does_not_cascade() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let missing = b.ident("missing");
    let length = b.member(missing, "length");
    let callee = b.ident("f");
    let root = b.call(callee, vec![length]);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("f", unary_function(&env))]);
    assert_eq!(codes(&result), vec![codes_::CANNOT_FIND_NAME]);
    assert_eq!(result.root_type, env.well_known.string);
}

#[test]
fn test_unknown_type_name() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let v = b.ident("v");
    let target = b.type_ref("Cat");
    let root = b.is(v, target);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("v", env.well_known.number.clone())]);
    assert_eq!(codes(&result), vec![codes_::CANNOT_FIND_TYPE]);
    assert_eq!(result.diagnostics[0].span, arena.span(target));
}

#[test]
fn test_type_argument_count_mismatch() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let v = b.ident("v");
    let number = b.type_ref("number");
    let string = b.type_ref("string");
    let target = b.generic_type_ref("List", vec![number, string]);
    let root = b.is(v, target);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("v", env.well_known.number.clone())]);
    assert_eq!(codes(&result), vec![codes_::TYPE_ARGUMENT_COUNT_MISMATCH]);
}

#[test]
fn test_type_arguments_on_non_generic_type() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let v = b.ident("v");
    let string = b.type_ref("string");
    let target = b.generic_type_ref("number", vec![string]);
    let root = b.is(v, target);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("v", env.well_known.number.clone())]);
    assert_eq!(codes(&result), vec![codes_::TYPE_ARGUMENT_COUNT_MISMATCH]);
}

#[test]
fn test_generic_type_without_arguments() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let v = b.ident("v");
    let target = b.type_ref("List");
    let root = b.is(v, target);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("v", env.well_known.number.clone())]);
    assert_eq!(
        codes(&result),
        vec![codes_::GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS]
    );
}

#[test]
fn test_argument_not_assignable() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let callee = b.ident("f");
    let argument = b.string("a");
    let root = b.call(callee, vec![argument]);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("f", unary_function(&env))]);
    assert_eq!(codes(&result), vec![codes_::ARGUMENT_NOT_ASSIGNABLE]);
    assert_eq!(result.diagnostics[0].span, arena.span(argument));
    assert_eq!(result.root_type, env.well_known.string);
}

#[test]
fn test_lambda_argument_with_wrong_return_type() {
    let env = TypeEnvironment::new();
    let list = env.well_known.list_of(env.well_known.string.clone());

    let mut b = TreeBuilder::new();
    let receiver = b.ident("list");
    let filter = b.member(receiver, "filter");
    let it = b.ident("it");
    let length = b.member(it, "length");
    let lambda = b.implicit_lambda(length);
    let root = b.call_with_lambda(filter, Vec::new(), lambda);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("list", list)]);
    assert_eq!(codes(&result), vec![codes_::ARGUMENT_NOT_ASSIGNABLE]);
    assert_eq!(result.diagnostics[0].span, arena.span(lambda));
}

#[test]
fn test_argument_count_mismatch() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let callee = b.ident("f");
    let one = b.number(1.0);
    let two = b.number(2.0);
    let root = b.call(callee, vec![one, two]);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("f", unary_function(&env))]);
    assert_eq!(codes(&result), vec![codes_::ARGUMENT_COUNT_MISMATCH]);
    assert_eq!(result.diagnostics[0].span, arena.span(root));
    assert!(result.root_type.is_unknown());
    assert!(result.type_of(two).is_some());
}

#[test]
fn test_trailing_lambda_counts_as_argument() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let callee = b.ident("f");
    let one = b.number(1.0);
    let body = b.number(2.0);
    let lambda = b.implicit_lambda(body);
    let root = b.call_with_lambda(callee, vec![one], lambda);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("f", unary_function(&env))]);
    assert_eq!(codes(&result), vec![codes_::ARGUMENT_COUNT_MISMATCH]);
}

#[test]
fn test_not_invocable() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let callee = b.ident("s");
    let argument = b.number(1.0);
    let root = b.call(callee, vec![argument]);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("s", env.well_known.string.clone())]);
    assert_eq!(codes(&result), vec![codes_::NOT_INVOCABLE]);
    assert_eq!(result.diagnostics[0].span, arena.span(callee));
    assert!(result.type_of(argument).is_some());
}

#[test]
fn test_member_not_found() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let s = b.ident("s");
    let root = b.member(s, "foo");
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("s", env.well_known.string.clone())]);
    assert_eq!(codes(&result), vec![codes_::MEMBER_NOT_FOUND]);
    assert!(result.diagnostics[0].message.contains("foo"));
}

#[test]
fn test_ambiguous_member() {
    let mut env = TypeEnvironment::new();
    let number = env.well_known.number.clone();
    let string = env.well_known.string.clone();
    let overloaded = env.definitions.register(
        "Printer",
        None,
        vec![
            MemberDef::method(
                "print",
                Vec::new(),
                Type::func(vec![ParameterDef::new("n", number)], Type::Never),
            ),
            MemberDef::method(
                "print",
                Vec::new(),
                Type::func(vec![ParameterDef::new("s", string)], Type::Never),
            ),
        ],
    );

    let mut b = TreeBuilder::new();
    let p = b.ident("p");
    let root = b.member(p, "print");
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("p", overloaded)]);
    assert_eq!(codes(&result), vec![codes_::MEMBER_AMBIGUOUS]);
}

#[test]
fn test_root_not_assignable_to_expected() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let root = b.number(1.0);
    let arena = b.finish();

    let (result, _) = check_with(
        &arena,
        root,
        &env,
        Vec::new(),
        Some(&env.well_known.string),
        &CheckerOptions::default(),
    );
    assert_eq!(codes(&result), vec![codes_::TYPE_NOT_ASSIGNABLE]);
}

#[test]
fn test_annotation_mismatch() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let annotation = b.type_ref("string");
    let value = b.number(1.0);
    let decl = b.declaration("x", true, Some(annotation), value);
    let x = b.ident("x");
    let root = b.block(vec![decl, x]);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::TYPE_NOT_ASSIGNABLE]);
    assert_eq!(result.diagnostics[0].span, arena.span(value));
    assert_eq!(result.root_type, env.well_known.string);
}

#[test]
fn test_condition_not_boolean() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let condition = b.number(1.0);
    let two = b.number(2.0);
    let three = b.number(3.0);
    let root = b.if_else(condition, two, three);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::CONDITION_NOT_BOOLEAN]);
    assert_eq!(result.diagnostics[0].span, arena.span(condition));
}

#[test]
fn test_conjunction_operands_must_be_boolean() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let left = b.boolean(true);
    let right = b.string("x");
    let root = b.and(left, right);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::CONDITION_NOT_BOOLEAN]);
    assert_eq!(result.diagnostics[0].span, arena.span(right));
    assert_eq!(result.root_type, env.well_known.boolean);
}

#[test]
fn test_assign_to_const_declaration() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let one = b.number(1.0);
    let decl = b.const_decl("a", one);
    let target = b.ident("a");
    let two = b.number(2.0);
    let assign = b.assign(target, two);
    let root = b.block(vec![decl, assign]);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::CANNOT_ASSIGN_TO_CONST]);
    assert_eq!(result.diagnostics[0].span, arena.span(target));
}

#[test]
fn test_assign_to_const_external() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let target = b.ident("limit");
    let value = b.number(2.0);
    let root = b.assign(target, value);
    let arena = b.finish();

    let result = check(&arena, root, &env, vec![("limit", env.well_known.number.clone())]);
    assert_eq!(codes(&result), vec![codes_::CANNOT_ASSIGN_TO_CONST]);
}

#[test]
fn test_assign_wrong_type_to_let() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let one = b.number(1.0);
    let decl = b.let_decl("a", one);
    let target = b.ident("a");
    let text = b.string("x");
    let assign = b.assign(target, text);
    let root = b.block(vec![decl, assign]);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::TYPE_NOT_ASSIGNABLE]);
    assert_eq!(result.diagnostics[0].span, arena.span(text));
}

#[test]
fn test_invalid_assignment_target() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let target = b.number(1.0);
    let value = b.number(2.0);
    let root = b.assign(target, value);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::INVALID_ASSIGNMENT_TARGET]);
    assert_eq!(result.diagnostics[0].span, arena.span(target));
}

#[test]
fn test_circular_declarations() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let use_b = b.ident("b");
    let decl_a = b.const_decl("a", use_b);
    let use_a = b.ident("a");
    let decl_b = b.const_decl("b", use_a);
    let result_a = b.ident("a");
    let root = b.block(vec![decl_a, decl_b, result_a]);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::CIRCULAR_REFERENCE]);
    assert_eq!(result.diagnostics[0].span, arena.span(use_a));
    assert!(result.root_type.is_unknown());
}

#[test]
fn test_self_referencing_declaration() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let use_a = b.ident("a");
    let decl = b.const_decl("a", use_a);
    let root = b.block(vec![decl]);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::CIRCULAR_REFERENCE]);
}

#[test]
fn test_explicit_parameter_without_type() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let param = b.param("x");
    let param_span = param.span;
    let x = b.ident("x");
    let root = b.lambda(vec![param], x);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::CANNOT_INFER_PARAMETER_TYPE]);
    assert_eq!(result.diagnostics[0].span, param_span);
}

#[test]
fn test_implicit_parameter_without_expected_type() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let it = b.ident("it");
    let root = b.implicit_lambda(it);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(codes(&result), vec![codes_::CANNOT_INFER_PARAMETER_TYPE]);
    assert_eq!(result.diagnostics[0].span, arena.span(it));
}

#[test]
fn test_nesting_limit_reported_once() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let one = b.number(1.0);
    let level1 = b.collection(vec![one]);
    let level2 = b.collection(vec![level1]);
    let level3 = b.collection(vec![level2]);
    let root = b.collection(vec![level3]);
    let arena = b.finish();

    let options = CheckerOptions {
        max_resolution_depth: 3,
        ..CheckerOptions::default()
    };
    let (result, _) = check_with(&arena, root, &env, Vec::new(), None, &options);
    assert_eq!(codes(&result), vec![codes_::EXPRESSION_TOO_DEEP]);
    assert_eq!(result.diagnostics[0].span, arena.span(level1));
    for node in arena.descendants(root) {
        assert!(result.type_of(node).is_some());
    }
}

#[test]
fn test_independent_errors_are_all_reported() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let first = b.ident("first");
    let second = b.ident("second");
    let root = b.collection(vec![first, second]);
    let arena = b.finish();

    let result = check(&arena, root, &env, Vec::new());
    assert_eq!(
        codes(&result),
        vec![codes_::CANNOT_FIND_NAME, codes_::CANNOT_FIND_NAME]
    );
}
