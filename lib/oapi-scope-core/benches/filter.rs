#![allow(missing_docs)]
use criterion::{Criterion, criterion_group, criterion_main};
use oapi_scope_core::{Audience, AudienceFilter, Document};
use serde_json::{Map, Value, json};
use std::hint::black_box;

/// Builds a canonical document with `resources` paths in each public API and internal API.
fn canonical_document(resources: usize) -> Document {
    let mut paths = Map::new();
    for index in 0..resources {
        for api in ["/api/notifications/v1.0", "/api/integrations/v1.0", "/internal"] {
            paths.insert(
                format!("{api}/resource{index}/{{id}}"),
                json!({
                    "parameters": [{ "name": "id", "in": "path", "required": true }],
                    "get": {
                        "tags": ["resources"],
                        "operationId": format!("get{index}"),
                        "security": [{ "SecurityScheme": ["read"] }]
                    },
                    "delete": {
                        "tags": ["resources", "private"],
                        "operationId": format!("delete{index}"),
                        "security": [{ "SecurityScheme": ["admin"] }]
                    }
                }),
            );
        }
    }

    let document = json!({
        "openapi": "3.0.3",
        "tags": [{ "name": "resources" }, { "name": "private" }],
        "paths": Value::Object(paths),
        "components": {}
    });
    Document::try_from(document).unwrap_or_default()
}

fn benchmark_filter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("filter");
    let filter = AudienceFilter::default();

    for resources in [10, 100, 500] {
        let document = canonical_document(resources);

        for (audience, version) in [
            (Audience::Notifications, Some("v1.0")),
            (Audience::Private, Some("v1.0")),
            (Audience::Internal, None),
        ] {
            group.bench_function(format!("{audience}_{resources}"), |bencher| {
                bencher.iter(|| {
                    let result = filter.filter(black_box(&document), audience, version);
                    let _ = black_box(result);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_filter);
criterion_main!(benches);
