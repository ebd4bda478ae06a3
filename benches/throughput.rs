use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use waypoint::{MethodMask, Resource, Router, RouterConfig};

fn zoo_router(chunk_size: usize) -> Router {
    let mut router = Router::with_config(RouterConfig::default().with_chunk_size(chunk_size));
    router.get("/", Some("root_handler")).unwrap();
    router.get("/zoo/animals", Some("get_animals")).unwrap();
    router.post("/zoo/animals", Some("create_animal")).unwrap();
    router.get("/zoo/animals/{id:\\d+}", Some("get_animal")).unwrap();
    router.put("/zoo/animals/{id:\\d+}", Some("update_animal")).unwrap();
    router.delete("/zoo/animals/{id:\\d+}", Some("delete_animal")).unwrap();
    router
        .get("/zoo/animals/{id}/toys/{toy_id}", Some("animal_toy"))
        .unwrap();
    router
        .get(
            "/zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}",
            Some("habitat_section"),
        )
        .unwrap();
    router
        .post(
            "/inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}",
            Some("post_item_batch"),
        )
        .unwrap();
    router
        .get("/complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}", Some("complex_many_params"))
        .unwrap();
    for i in 0..40 {
        Resource::plural(format!("thing{i}"), &format!("things{i}"))
            .register(&mut router)
            .unwrap();
    }
    router
}

fn bench_route_throughput(c: &mut Criterion) {
    let test_paths = [
        (MethodMask::GET, "/zoo/animals"),
        (MethodMask::GET, "/zoo/animals/123"),
        (MethodMask::GET, "/zoo/animals/123/toys/456"),
        (MethodMask::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
        (MethodMask::POST, "/inventory/1/feeds/2/items/3/batches/4"),
        (MethodMask::GET, "/complex/1/2/3/4/5/6/7/8/9"),
        (MethodMask::PUT, "things39/77"),
    ];

    for chunk_size in [1, 10, 50] {
        let router = zoo_router(chunk_size);
        let matcher = router.matcher().unwrap();
        c.bench_function(&format!("route_match_chunk_{chunk_size}"), |b| {
            b.iter(|| {
                for (method, path) in test_paths.iter() {
                    let res = matcher.match_path(path, Some(*method));
                    black_box(&res);
                }
            })
        });
    }
}

fn bench_generate(c: &mut Criterion) {
    let router = zoo_router(10);
    let generator = router.generator();
    c.bench_function("route_generate", |b| {
        b.iter(|| {
            let url = generator
                .generate(
                    "habitat_section",
                    [
                        ("category", "cats"),
                        ("id", "1"),
                        ("habitat_id", "2"),
                        ("section_id", "3"),
                        ("sort", "desc"),
                    ],
                )
                .unwrap();
            black_box(url);
        })
    });
}

criterion_group!(benches, bench_route_throughput, bench_generate);
criterion_main!(benches);
