/// Error boundary benchmarks
/// Measures sanitizer throughput and the cost of a full failure round trip
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;
use tower::ServiceExt;

use error_boundary::{
    api::{create_router, middleware::audit::RecordingSink},
    application::MessageSanitizer,
    Environment, ErrorBoundary, ErrorHandlingConfig,
};

fn sanitizer_benchmarks(c: &mut Criterion) {
    let sanitizer = MessageSanitizer::new();
    let mut group = c.benchmark_group("sanitize");

    let inputs = [
        ("whitelisted", "Validation failed: email is required".to_string()),
        ("clean", "Order limit reached for this account".to_string()),
        (
            "sensitive",
            "connect postgres://admin:pw@db:5432/app failed at /app/src/db.ts:10:5".to_string(),
        ),
        ("too_long", "x".repeat(512)),
    ];

    for (name, input) in inputs.iter() {
        group.bench_with_input(BenchmarkId::new("message", name), input, |b, input| {
            b.iter(|| sanitizer.sanitize(Some(input.as_str())))
        });
    }

    group.finish();
}

fn boundary_benchmarks(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("boundary");
    group.measurement_time(Duration::from_secs(5));

    let boundary = ErrorBoundary::new(
        ErrorHandlingConfig::new().with_environment(Environment::Production),
        Arc::new(RecordingSink::new()),
    );
    let app = create_router(boundary);

    group.bench_function("not_found_round_trip", |b| {
        b.to_async(&rt).iter(|| {
            let app = app.clone();
            async move {
                let request = Request::builder()
                    .uri("/missing")
                    .body(Body::empty())
                    .unwrap();
                app.oneshot(request).await.unwrap()
            }
        })
    });

    group.finish();
}

criterion_group!(benches, sanitizer_benchmarks, boundary_benchmarks);
criterion_main!(benches);
