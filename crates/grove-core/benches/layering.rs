//! Benchmarks for the layering pass and whole-tree builds.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use grove_core::hierarchy::GroupCollection;
use grove_core::model::Group;

fn member(short_id: &str, refs: &[String]) -> Group {
    let mut group = Group::new(format!("id-{short_id}"), short_id, short_id);
    group.referring_groups = refs.iter().cloned().collect();
    group
}

/// `branches` chains of `depth` groups each, all under one root, every
/// member carrying its full ancestor chain.
fn wide_collection(branches: usize, depth: usize) -> GroupCollection {
    let mut collection = GroupCollection::new(Group::new("id-root", "root", "root"), 64);
    for branch in 0..branches {
        let mut chain: Vec<String> = vec!["root".to_string()];
        for level in 0..depth {
            let short_id = format!("b{branch}-l{level}");
            collection
                .add_element(member(&short_id, &chain))
                .expect("member references root");
            chain.push(short_id);
        }
    }
    collection
}

fn bench_layering(c: &mut Criterion) {
    let collection = wide_collection(20, 5);
    let root_path = vec!["root".to_string()];

    c.bench_function("next_level/20x5", |b| {
        b.iter(|| black_box(collection.next_level(black_box(&root_path))));
    });

    c.bench_function("get_hierarchy/20x5", |b| {
        b.iter(|| collection.get_hierarchy().expect("build"));
    });

    let deep = wide_collection(1, 50);
    c.bench_function("get_hierarchy/1x50", |b| {
        b.iter(|| deep.get_hierarchy().expect("build"));
    });
}

criterion_group!(benches, bench_layering);
criterion_main!(benches);
