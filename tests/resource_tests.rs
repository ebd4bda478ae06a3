#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;
use waypoint::{MethodMask, Resource, Router, RouterConfig};

fn route_pairs(router: &Router) -> HashSet<(String, MethodMask)> {
    router
        .routes()
        .map(|r| (r.path().to_string(), r.method().unwrap()))
        .collect()
}

#[test]
fn test_plural_resource_route_set() {
    let mut router = Router::new();
    let count = Resource::plural("post", "posts").register(&mut router).unwrap();
    assert_eq!(count, 7);
    assert_eq!(router.len(), 7);

    let expected: HashSet<(String, MethodMask)> = [
        ("posts", MethodMask::GET),
        ("posts/new", MethodMask::GET),
        ("posts", MethodMask::POST),
        ("posts/{id}", MethodMask::GET),
        ("posts/{id}", MethodMask::DELETE),
        ("posts/{id}/edit", MethodMask::GET),
        ("posts/{id}", MethodMask::PUT),
    ]
    .into_iter()
    .map(|(p, m)| (p.to_string(), m))
    .collect();
    assert_eq!(route_pairs(&router), expected);
}

#[test]
fn test_singleton_resource_route_set() {
    let mut router = Router::new();
    let count = Resource::singleton("profile").register(&mut router).unwrap();
    assert_eq!(count, 6);
    assert!(router.routes().all(|r| !r.path().contains('{')));
}

#[test]
fn test_resources_honour_prefix_and_suffix() {
    let config = RouterConfig::default()
        .with_prefix("/api/")
        .with_suffix(".json");
    let mut router = Router::with_config(config);
    Resource::plural("post", "posts")
        .only(["index", "show"])
        .register(&mut router)
        .unwrap();

    assert_eq!(router.get_route("posts").unwrap().path(), "/api/posts.json");
    assert_eq!(router.get_route("post").unwrap().path(), "/api/posts/{id}.json");

    let matcher = router.matcher().unwrap();
    let found = matcher
        .match_path("/api/posts/5.json", Some(MethodMask::GET))
        .unwrap();
    assert_eq!(found.name(), "post");
    assert_eq!(found.get("id"), Some("5"));
}

#[test]
fn test_resource_routes_generate_and_match() {
    let mut router = Router::new();
    Resource::plural("post", "posts")
        .id_pattern(r"\d+")
        .resource(Resource::plural("comment", "comments"))
        .register(&mut router)
        .unwrap();

    let url = router
        .generator()
        .generate("post_comment", [("post_id", "3"), ("id", "8")])
        .unwrap();
    assert_eq!(url, "posts/3/comments/8");

    let matcher = router.matcher().unwrap();
    let found = matcher.match_path(&url, Some(MethodMask::DELETE)).unwrap();
    assert_eq!(found.get("action"), Some("destroy"));
    assert_eq!(found.get("controller"), Some("Comments"));
    assert_eq!(found.get("post_id"), Some("3"));
}

#[test]
fn test_global_values_reach_resource_routes() {
    let mut router = Router::new();
    router.add_global_values([("format", "html"), ("controller", "Global")]);
    Resource::plural("post", "posts")
        .only(["index"])
        .register(&mut router)
        .unwrap();

    let route = router.get_route("posts").unwrap();
    assert_eq!(route.defaults()["format"], "html");
    // globals are applied first and the first value written is kept
    assert_eq!(route.defaults()["controller"], "Global");
}
