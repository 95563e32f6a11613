use bptree_index::{BPlusTree, Comparator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TREE_SIZE: usize = 100_000;

fn build_tree(branching_factor: usize, distinct_keys: u32) -> BPlusTree<u32, usize> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = BPlusTree::new(branching_factor).expect("valid factor");
    for value in 0..TREE_SIZE {
        tree.insert(rng.gen_range(0..distinct_keys), value);
    }
    tree
}

fn insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for branching_factor in [4, 16, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(branching_factor),
            &branching_factor,
            |b, &branching_factor| {
                b.iter(|| black_box(build_tree(branching_factor, 10_000)));
            },
        );
    }
    group.finish();
}

fn range_search_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_search");

    // Few distinct keys means long duplicate runs crossing many leaves
    for distinct_keys in [100, 100_000] {
        let tree = build_tree(16, distinct_keys);
        let target = distinct_keys / 2;

        for comparator in Comparator::ALL {
            group.bench_with_input(
                BenchmarkId::new(comparator.symbol(), format!("{}_distinct", distinct_keys)),
                &(&tree, target),
                |b, (tree, target)| {
                    b.iter(|| black_box(tree.range_search_by(target, comparator).len()));
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, insert_benchmark, range_search_benchmark);
criterion_main!(benches);
