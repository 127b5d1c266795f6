use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ordered_tree::tree::OrderedTree;

/// Inserts the midpoint of the range first and recurses on both halves so the
/// tree stays shallow. The tree does not rebalance itself, so sequential
/// insertion would produce a linear chain.
fn fill_balanced(tree: &mut OrderedTree<i32>, lo: i32, hi: i32) {
    if lo > hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    tree.insert(mid);
    fill_balanced(tree, lo, mid - 1);
    fill_balanced(tree, mid + 1, hi);
}

/// Helper to bench a function on an `OrderedTree`.
/// It creates a group for the given name and closure and runs tests for
/// various tree sizes before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut OrderedTree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2i32.pow(num_levels as u32) - 1;
        let largest_element_in_tree = num_nodes - 1;

        let mut tree = OrderedTree::new();
        fill_balanced(&mut tree, 0, num_nodes - 1);

        let id = BenchmarkId::new("owned", largest_element_in_tree);

        group.bench_function(id, |b| {
            b.iter_custom(|iters| {
                let mut time = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut tree = black_box(tree.clone());
                    let instant = std::time::Instant::now();
                    f(&mut tree, black_box(largest_element_in_tree));
                    let elapsed = instant.elapsed();
                    time += elapsed;
                }
                time
            })
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _value = black_box(tree.find(&i));
    });
    bench_helper(c, "remove", |tree, i| {
        tree.remove(&i);
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "find-miss", |tree, i| {
        let _value = black_box(tree.find(&(i + 1)));
    });
    bench_helper(c, "remove-miss", |tree, i| {
        tree.remove(&(i + 1));
    });

    bench_helper(c, "in-order", |tree, _i| {
        let _values = black_box(tree.dfs_in_order());
    });
    bench_helper(c, "bfs", |tree, _i| {
        let _values = black_box(tree.bfs());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
