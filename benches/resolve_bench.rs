//! Resolver Benchmark
//!
//! Measures all three phases over generated trees of increasing size.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tybscri::{CheckerOptions, NodeArena, NodeIndex, TreeBuilder, Type, TypeEnvironment, compile_expression};

/// `list.map { it.length }.map { it }...` chained `depth` times, with a
/// narrowing conditional in every lambda body.
fn chained_maps(depth: usize) -> (NodeArena, NodeIndex) {
    let mut b = TreeBuilder::new();
    let mut receiver = b.ident("list");
    for _ in 0..depth {
        let map = b.member(receiver, "map");
        let guard_it = b.ident("it");
        let number = b.type_ref("number");
        let guard = b.is(guard_it, number);
        let then_it = b.ident("it");
        let zero = b.number(0.0);
        let body = b.if_else(guard, then_it, zero);
        let lambda = b.implicit_lambda(body);
        receiver = b.call_with_lambda(map, Vec::new(), lambda);
    }
    (b.finish(), receiver)
}

fn bench_compile(c: &mut Criterion) {
    let env = TypeEnvironment::new();
    let list: Type = env.well_known.list_of(env.well_known.number.clone());
    let options = CheckerOptions::default();

    let mut group = c.benchmark_group("compile_expression");
    for depth in [1usize, 8, 64] {
        let (arena, root) = chained_maps(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |bench, _| {
            bench.iter(|| {
                let compilation = compile_expression(
                    black_box(&arena),
                    root,
                    &env,
                    vec![("list", list.clone())],
                    None,
                    &options,
                );
                black_box(compilation)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
