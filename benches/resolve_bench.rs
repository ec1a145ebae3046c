/// Message resolution and fault dispatch benchmarks
/// Measures the per-request cost of answering a fault
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::hint::black_box;
use std::sync::Arc;

use fault_translator::application::message::{format_template, MessageSourceResolver};
use fault_translator::application::ports::MessageResolver;
use fault_translator::{
    BusinessFault, Fault, FaultDispatcher, GlobalErrorCode, MessageCatalog, Violation,
};

fn resolution_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("message_resolution");
    let resolver = MessageSourceResolver::new(MessageCatalog::bundled());
    let args = vec!["id".to_string(), "abc".to_string()];

    group.bench_function("format_two_args", |b| {
        b.iter(|| format_template(black_box("파라미터 {0}의 값 {1}는 올바르지 않습니다."), black_box(&args)))
    });
    group.bench_function("resolve_without_args", |b| {
        b.iter(|| resolver.resolve(black_box("NOT_FOUND"), &[]))
    });
    group.bench_function("resolve_with_args", |b| {
        b.iter(|| resolver.resolve(black_box("TYPE_MISMATCH"), black_box(&args)))
    });
    group.bench_function("resolve_unknown_code", |b| {
        b.iter(|| resolver.resolve(black_box("NO_SUCH_CODE"), &[]))
    });

    group.finish();
}

fn dispatch_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("fault_dispatch");
    let dispatcher = FaultDispatcher::new(Arc::new(MessageSourceResolver::new(
        MessageCatalog::bundled(),
    )));

    let business = Fault::from(BusinessFault::new(GlobalErrorCode::NotFound));
    group.bench_function("business", |b| b.iter(|| dispatcher.dispatch(black_box(&business))));

    let unclassified = Fault::unclassified(anyhow::anyhow!("boom"));
    group.bench_function("unclassified", |b| {
        b.iter(|| dispatcher.dispatch(black_box(&unclassified)))
    });

    for count in [1usize, 10, 100] {
        let violations: Vec<Violation> = (0..count)
            .map(|i| {
                if i % 5 == 0 {
                    Violation::global(format!("rule {i} failed"))
                } else {
                    Violation::field(format!("field_{i}"), Some(json!(i)), "must not be blank")
                }
            })
            .collect();
        let fault = Fault::BodyValidation(violations);

        group.bench_with_input(BenchmarkId::new("body_validation", count), &fault, |b, fault| {
            b.iter(|| dispatcher.dispatch(black_box(fault)))
        });
    }

    group.finish();
}

criterion_group!(benches, resolution_benchmarks, dispatch_benchmarks);
criterion_main!(benches);
