//! 排序策略性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use openlink::links::gesture::{from_drag, from_keyboard};
use openlink::links::ordering::{plan_insert, plan_reorder};
use openlink::links::KeyDirection;
use std::hint::black_box;

fn list(n: usize) -> Vec<(String, i32)> {
    (0..n).map(|i| (format!("link-{}", i), i as i32)).collect()
}

// ============== plan_reorder 基准测试 ==============

fn bench_plan_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering/plan_reorder");

    for size in [10usize, 50, 200] {
        let current = list(size);

        group.bench_with_input(BenchmarkId::new("first_to_last", size), &current, |b, cur| {
            b.iter(|| plan_reorder(black_box(cur), 0, cur.len() - 1).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("adjacent_swap", size), &current, |b, cur| {
            b.iter(|| plan_reorder(black_box(cur), cur.len() / 2, cur.len() / 2 + 1).unwrap());
        });
    }

    group.finish();
}

// ============== plan_insert 基准测试 ==============

fn bench_plan_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering/plan_insert");

    let normal = list(200);
    group.bench_function("front", |b| {
        b.iter(|| plan_insert(black_box(&normal)));
    });

    // 最小值已到 i32::MIN，需要整体重排
    let mut exhausted = list(200);
    exhausted[0].1 = i32::MIN;
    group.bench_function("renumber", |b| {
        b.iter(|| plan_insert(black_box(&exhausted)));
    });

    group.finish();
}

// ============== 手势转换 ==============

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering/gesture");
    let ids: Vec<String> = list(200).into_iter().map(|(id, _)| id).collect();

    group.bench_function("drag", |b| {
        b.iter(|| from_drag(black_box(ids.as_slice()), "link-150", Some("link-3")));
    });

    group.bench_function("keyboard", |b| {
        b.iter(|| from_keyboard(black_box(ids.as_slice()), "link-199", KeyDirection::Up));
    });

    group.finish();
}

criterion_group!(benches, bench_plan_reorder, bench_plan_insert, bench_gestures);
criterion_main!(benches);
