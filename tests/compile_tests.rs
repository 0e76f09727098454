//! End-to-end compilation through the facade.

use tybscri::common::diagnostic_codes;
use tybscri::solver::{LiteralValue, MemberDef, Name, ParameterDef, create_union};
use tybscri::{
    CheckerOptions, Compiler, ExecKind, SymbolTable, TreeBuilder, Type, TypeEnvironment,
    compile_expression, print_exec,
};

#[test]
fn test_collection_of_mixed_literals() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let t = b.boolean(true);
    let n = b.number(123.0);
    let s = b.string("321");
    let root = b.collection(vec![t, n, s]);
    let arena = b.finish();

    let compilation = compile_expression(
        &arena,
        root,
        &env,
        Vec::new(),
        None,
        &CheckerOptions::default(),
    )
    .expect("compiles");
    assert!(compilation.diagnostics.is_empty());

    let wk = &env.well_known;
    let expected = wk.list_of(create_union(vec![
        wk.true_type.clone(),
        wk.literal(LiteralValue::Number(123.0)),
        wk.literal(LiteralValue::String(Name::from("321"))),
    ]));
    assert!(tybscri::solver::are_equivalent(
        &env.definitions,
        &compilation.root_type,
        &expected
    ));
    let executable = compilation.executable.expect("executable form");
    assert_eq!(print_exec(&executable), r#"[true, 123, "321"]"#);
}

#[test]
fn test_map_over_host_list() {
    let env = TypeEnvironment::new();
    let list = env.well_known.list_of(env.well_known.string.clone());

    let mut b = TreeBuilder::new();
    let receiver = b.ident("list");
    let map = b.member(receiver, "map");
    let it = b.ident("it");
    let length = b.member(it, "length");
    let lambda = b.implicit_lambda(length);
    let root = b.call_with_lambda(map, Vec::new(), lambda);
    let arena = b.finish();

    let compilation = compile_expression(
        &arena,
        root,
        &env,
        vec![("list", list)],
        None,
        &CheckerOptions::default(),
    )
    .expect("compiles");
    assert!(compilation.diagnostics.is_empty());
    assert!(tybscri::solver::are_equivalent(
        &env.definitions,
        &compilation.root_type,
        &env.well_known.list_of(env.well_known.number.clone())
    ));
    let executable = compilation.executable.expect("executable form");
    assert!(matches!(executable.kind, ExecKind::Invoke { .. }));
}

#[test]
fn test_lambda_checked_against_expected_function_type() {
    let env = TypeEnvironment::new();
    let expected = Type::func(
        vec![ParameterDef::new("str", env.well_known.string.clone())],
        env.well_known.number.clone(),
    );

    let mut b = TreeBuilder::new();
    let it = b.ident("it");
    let length = b.member(it, "length");
    let root = b.implicit_lambda(length);
    let arena = b.finish();

    let compilation = compile_expression(
        &arena,
        root,
        &env,
        Vec::new(),
        Some(&expected),
        &CheckerOptions::default(),
    )
    .expect("compiles");
    assert!(compilation.diagnostics.is_empty());
    assert_eq!(
        print_exec(&compilation.executable.expect("executable form")),
        "{ it -> it.length }"
    );
}

#[test]
fn test_errors_suppress_generation() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let missing = b.ident("missing");
    let root = b.member(missing, "length");
    let arena = b.finish();

    let compilation = compile_expression(
        &arena,
        root,
        &env,
        Vec::new(),
        None,
        &CheckerOptions::default(),
    )
    .expect("no fatal error");
    assert!(compilation.has_errors());
    assert_eq!(compilation.diagnostics[0].code, diagnostic_codes::CANNOT_FIND_NAME);
    assert!(compilation.executable.is_none());
    assert!(compilation.root_type.is_unknown());
}

#[test]
fn test_compiler_with_host_types_and_mutable_values() {
    let mut env = TypeEnvironment::new();
    let string = env.well_known.string.clone();
    let animal = env.definitions.register(
        "Animal",
        None,
        vec![MemberDef::property("name", string.clone())],
    );
    let dog = env.definitions.register(
        "Dog",
        Some(animal.clone()),
        vec![MemberDef::property("bark", string.clone())],
    );
    env.types.insert("Dog", dog);

    let mut b = TreeBuilder::new();
    let guard_pet = b.ident("pet");
    let dog_ref = b.type_ref("Dog");
    let guard = b.is(guard_pet, dog_ref);
    let then_pet = b.ident("pet");
    let bark = b.member(then_pet, "bark");
    let else_pet = b.ident("pet");
    let name = b.member(else_pet, "name");
    let sound = b.if_else(guard, bark, name);
    let target = b.ident("last");
    let root = b.assign(target, sound);
    let arena = b.finish();

    let mut symbols = SymbolTable::new();
    let pet = symbols.add_symbol(tybscri::Symbol::external("pet", animal));
    let last = symbols.add_symbol(tybscri::Symbol::mutable_external("last", string));
    let scope = symbols.add_scope(None, vec![pet, last]);

    let compiler = Compiler::new(env).with_options(CheckerOptions {
        file_name: "pets.tys".to_string(),
        ..CheckerOptions::default()
    });
    let compilation = compiler
        .compile(&arena, root, &mut symbols, scope, None)
        .expect("compiles");
    assert!(compilation.diagnostics.is_empty(), "{:?}", compilation.diagnostics);
    assert_eq!(compilation.root_type, compiler.env().well_known.null);
    assert_eq!(
        print_exec(&compilation.executable.expect("executable form")),
        "$last = if(($pet is Dog), ($pet as Dog).bark, $pet.name)"
    );
}

#[test]
fn test_root_expected_type_mismatch() {
    let env = TypeEnvironment::new();
    let mut b = TreeBuilder::new();
    let root = b.string("text");
    let arena = b.finish();

    let compilation = compile_expression(
        &arena,
        root,
        &env,
        Vec::new(),
        Some(&env.well_known.number),
        &CheckerOptions::default(),
    )
    .expect("no fatal error");
    let codes: Vec<u32> = compilation.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![diagnostic_codes::TYPE_NOT_ASSIGNABLE]);
    assert!(compilation.executable.is_none());
}
