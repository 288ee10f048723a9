use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tidy_tree_wasm::graph::{NodeId, Tree};
use tidy_tree_wasm::layout::{TidyTree, TidyTreeConfig, TidyTreeLayout, WalkStrategy};

/// Root with `n` children, each the top of a chain one longer than the last.
/// Contour merging without threads re-walks the long chains for every
/// sibling and goes quadratic on this shape.
fn staircase(n: usize) -> (Tree, NodeId) {
    let mut tree = Tree::with_capacity(n * (n + 1) / 2 + 1);
    let root = tree.add_node(10.0, 10.0).unwrap();
    for len in 1..=n {
        let mut node = tree.push_child(root, 10.0, 10.0).unwrap();
        for _ in 1..len {
            node = tree.push_child(node, 10.0, 10.0).unwrap();
        }
    }
    (tree, root)
}

/// Complete tree with the given branching factor and depth, varying sizes.
fn bushy(branching: usize, depth: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let root = tree.add_node(20.0, 10.0).unwrap();
    let mut level = vec![root];
    for d in 0..depth {
        let mut next = Vec::with_capacity(level.len() * branching);
        for &parent in &level {
            for k in 0..branching {
                let w = 5.0 + ((d + k) % 4) as f64 * 10.0;
                let h = 5.0 + ((d * k) % 3) as f64 * 15.0;
                next.push(tree.push_child(parent, w, h).unwrap());
            }
        }
        level = next;
    }
    (tree, root)
}

fn run(c: &mut Criterion, group_name: &str, shapes: &[(usize, (Tree, NodeId))]) {
    let mut group = c.benchmark_group(group_name);
    for walk in [WalkStrategy::Recursive, WalkStrategy::Iterative] {
        let layout = TidyTreeLayout::new(TidyTreeConfig {
            walk,
            ..Default::default()
        });
        for (param, (tree, root)) in shapes {
            group.bench_with_input(
                BenchmarkId::new(format!("{walk:?}"), param),
                tree,
                |b, tree| {
                    b.iter_batched(
                        || tree.clone(),
                        |mut tree| {
                            layout.layout(&mut tree, *root);
                            black_box(tree.state(*root).x)
                        },
                        criterion::BatchSize::LargeInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn bench_staircase(c: &mut Criterion) {
    let shapes: Vec<_> = [50, 100, 200].into_iter().map(|n| (n, staircase(n))).collect();
    run(c, "staircase", &shapes);
}

fn bench_bushy(c: &mut Criterion) {
    let shapes: Vec<_> = [(4, 5), (4, 7), (3, 10)]
        .into_iter()
        .map(|(b, d)| (b.pow(d as u32), bushy(b, d)))
        .collect();
    run(c, "bushy", &shapes);
}

criterion_group!(benches, bench_staircase, bench_bushy);
criterion_main!(benches);
