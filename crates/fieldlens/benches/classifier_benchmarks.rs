//! Benchmarks for the classification pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use fieldlens::{DetectionCache, FieldClassifier, FieldDescriptor, FieldType, SemanticDetector};

fn sample_fields() -> Vec<FieldDescriptor> {
    let total = 12;
    vec![
        FieldDescriptor::new("product_title", "product_title", FieldType::String, 0, total)
            .with_samples(vec![json!("Widget"), json!("Gadget")]),
        FieldDescriptor::new("description", "description", FieldType::String, 1, total)
            .with_samples(vec![json!(
                "A sturdy widget for everyday use around the workshop."
            )]),
        FieldDescriptor::new("price", "price", FieldType::Number, 2, total)
            .with_samples(vec![json!(29.99)]),
        FieldDescriptor::new("currency", "currency", FieldType::String, 3, total)
            .with_samples(vec![json!("USD")]),
        FieldDescriptor::new("rating", "rating", FieldType::Number, 4, total)
            .with_samples(vec![json!(4.5)]),
        FieldDescriptor::new("image_url", "image_url", FieldType::String, 5, total)
            .with_samples(vec![json!("https://cdn.example.com/widget.png")]),
        FieldDescriptor::new("status", "status", FieldType::String, 6, total)
            .with_samples(vec![json!("active")]),
        FieldDescriptor::new("email", "email", FieldType::String, 7, total)
            .with_samples(vec![json!("support@example.com")]),
        FieldDescriptor::new("phone", "phone", FieldType::String, 8, total)
            .with_samples(vec![json!("+1 555 123 4567")]),
        FieldDescriptor::new("id", "id", FieldType::String, 9, total)
            .with_samples(vec![json!("3b241101-e2bb-4255-8caf-4136c566a962")]),
        FieldDescriptor::new("created_at", "created_at", FieldType::String, 10, total)
            .with_samples(vec![json!("2024-01-15T10:00:00Z")]),
        FieldDescriptor::new("updated_at", "updated_at", FieldType::String, 11, total)
            .with_samples(vec![json!("2024-02-20T11:30:00Z")]),
    ]
}

fn bench_detection(c: &mut Criterion) {
    let detector = SemanticDetector::new();
    let fields = sample_fields();

    c.bench_function("detect_cold", |b| {
        b.iter(|| {
            let mut cache = DetectionCache::new();
            for field in &fields {
                black_box(detector.detect(&mut cache, field));
            }
        })
    });

    c.bench_function("detect_warm", |b| {
        let mut cache = DetectionCache::new();
        for field in &fields {
            detector.detect(&mut cache, field);
        }
        b.iter(|| {
            for field in &fields {
                black_box(detector.detect(&mut cache, field));
            }
        })
    });
}

fn bench_full_classification(c: &mut Criterion) {
    let classifier = FieldClassifier::new();
    let fields = sample_fields();

    c.bench_function("classify_batch", |b| {
        b.iter(|| {
            let mut cache = DetectionCache::new();
            black_box(classifier.classify(&fields, &mut cache))
        })
    });
}

criterion_group!(benches, bench_detection, bench_full_classification);
criterion_main!(benches);
