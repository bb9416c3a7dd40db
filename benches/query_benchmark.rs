//! Benchmark for query tree edits
//!
//! Edits only rebuild the path to the changed node, so add/remove/move on a
//! large tree should stay in the microsecond range.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use advanced_search_core::query::{
    add_descendant, find_descendant, flip_operator, from_json, move_descendant,
    remove_descendant, to_json, BoolOp, BooleanNode, ComparisonOp, Query, ValueNode,
};
use advanced_search_core::{QueryConfig, QueryEditor};
use std::sync::Arc;

fn leaf(key: &str, value: String) -> Query {
    Arc::new(ValueNode::new(key, ComparisonOp::Contains, value).into())
}

/// Create a tree of `groups` alternating AND/OR groups with `width` leaves each
fn create_test_tree(groups: usize, width: usize) -> Query {
    let children: Vec<Query> = (0..groups)
        .map(|g| {
            let op = if g % 2 == 0 { BoolOp::Or } else { BoolOp::And };
            let leaves: Vec<Query> = (0..width).map(|i| leaf("title", format!("term{}_{}", g, i))).collect();
            let group: Query = Arc::new(BooleanNode::new(op, leaves).into());
            group
        })
        .collect();
    Arc::new(BooleanNode::new(BoolOp::And, children).into())
}

fn benchmark_tree_edits(c: &mut Criterion) {
    let tree = create_test_tree(100, 10);
    let last_group = tree.children()[99].clone();
    let last_leaf = last_group.children()[9].id().clone();
    let first_leaf = tree.children()[0].children()[0].id().clone();

    c.bench_function("add_descendant_promote", |b| {
        b.iter(|| {
            let result = add_descendant(
                Some(black_box(&tree)),
                black_box(&last_leaf),
                leaf("author", "Smith".to_string()),
                BoolOp::And,
            );
            black_box(result)
        })
    });

    c.bench_function("remove_descendant", |b| {
        b.iter(|| black_box(remove_descendant(black_box(&tree), black_box(&last_leaf), None)))
    });

    c.bench_function("move_descendant", |b| {
        b.iter(|| {
            black_box(move_descendant(
                black_box(&tree),
                black_box(&first_leaf),
                last_group.id(),
                BoolOp::And,
                None,
            ))
        })
    });

    c.bench_function("find_descendant", |b| {
        b.iter(|| black_box(find_descendant(black_box(&tree), black_box(&last_leaf)).is_some()))
    });

    c.bench_function("flip_operator", |b| {
        b.iter(|| black_box(flip_operator(black_box(&tree), last_group.id())))
    });
}

fn benchmark_serialization(c: &mut Criterion) {
    let tree = create_test_tree(100, 10);
    let json = to_json(&tree).unwrap();

    c.bench_function("to_json_1000_leaves", |b| {
        b.iter(|| black_box(to_json(black_box(&tree)).unwrap()))
    });

    c.bench_function("from_json_1000_leaves", |b| {
        b.iter(|| black_box(from_json(black_box(&json)).unwrap()))
    });
}

fn benchmark_editor(c: &mut Criterion) {
    let config = Arc::new(QueryConfig::default());

    // Build a query the way a user would, one filter at a time
    c.bench_function("editor_build_100_filters", |b| {
        b.iter(|| {
            let mut editor = QueryEditor::with_config(Arc::clone(&config));
            for i in 0..100 {
                let _ = editor.add_filter("title", "contains", &format!("term{}", i));
            }
            black_box(editor)
        })
    });
}

criterion_group!(benches, benchmark_tree_edits, benchmark_serialization, benchmark_editor);
criterion_main!(benches);
