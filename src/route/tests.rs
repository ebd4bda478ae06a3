use super::{RouteParser, Segment};
use crate::error::RouterError;
use crate::method::MethodMask;

#[test]
fn test_static_template() {
    let route = RouteParser::default().parse("/about", Some(MethodMask::GET)).unwrap();
    assert!(route.is_static());
    assert!(route.regex().is_none());
    assert!(route.regex_source().is_none());
    assert_eq!(route.path(), "/about");
}

#[test]
fn test_placeholders_are_canonicalised() {
    let route = RouteParser::default()
        .parse(r"/users/{id:\d+}/posts/{slug}", None)
        .unwrap();
    assert_eq!(route.path(), "/users/{id}/posts/{slug}");
    assert_eq!(route.template(), r"/users/{id:\d+}/posts/{slug}");
    assert_eq!(route.parameter_names().collect::<Vec<_>>(), vec!["id", "slug"]);
    assert_eq!(
        route.parameter_patterns()[1],
        ("slug".to_string(), "[^/]+".to_string())
    );
    assert_eq!(
        route.segments()[1],
        Segment::Param("id".to_string())
    );
}

#[test]
fn test_capture_order_follows_declaration_order() {
    let route = RouteParser::default()
        .parse(r"/{year:\d{4}}/{month:\d{2}}/{title}", None)
        .unwrap();
    let caps = route.regex().unwrap().captures("/2024/06/hello").unwrap();
    assert_eq!(&caps[1], "2024");
    assert_eq!(&caps[2], "06");
    assert_eq!(&caps[3], "hello");
    assert!(!route.regex().unwrap().is_match("/24/06/hello"));
}

#[test]
fn test_literals_are_quoted() {
    let route = RouteParser::default().parse("/files/{name}.json", None).unwrap();
    let regex = route.regex().unwrap();
    assert!(regex.is_match("/files/report.json"));
    assert!(!regex.is_match("/files/reportXjson"));
}

#[test]
fn test_custom_default_pattern() {
    let route = RouteParser::new(r"\d+").parse("/items/{id}", None).unwrap();
    assert!(route.regex().unwrap().is_match("/items/7"));
    assert!(!route.regex().unwrap().is_match("/items/x"));
}

#[test]
fn test_specify_recompiles() {
    let mut route = RouteParser::default().parse("/items/{id}", None).unwrap();
    assert!(route.regex().unwrap().is_match("/items/abc"));
    route.specify("id", r"\d+").unwrap();
    assert!(!route.regex().unwrap().is_match("/items/abc"));
    assert!(route.regex().unwrap().is_match("/items/12"));
    // unknown names are ignored
    route.specify("missing", r"\d+").unwrap();
    assert_eq!(route.parameter_count(), 1);
}

#[test]
fn test_specify_rejects_bad_patterns_and_keeps_old_one() {
    let mut route = RouteParser::default().parse("/items/{id}", None).unwrap();
    assert!(matches!(
        route.specify("id", "(a|b)"),
        Err(RouterError::CapturingGroup { .. })
    ));
    assert!(matches!(
        route.specify("id", "[unclosed"),
        Err(RouterError::InvalidPattern { .. })
    ));
    assert!(route.regex().unwrap().is_match("/items/anything"));
}

#[test]
fn test_duplicate_placeholder_rejected() {
    let err = RouteParser::default().parse("/a/{id}/b/{id}", None).unwrap_err();
    assert!(matches!(err, RouterError::DuplicatePlaceholder { .. }));
}

#[test]
fn test_non_capturing_groups_allowed() {
    let route = RouteParser::default()
        .parse("/export.{format:(?:json|csv)}", None)
        .unwrap();
    assert!(route.regex().unwrap().is_match("/export.csv"));
    assert!(!route.regex().unwrap().is_match("/export.xml"));
}

#[test]
fn test_method_checks() {
    let mut route = RouteParser::default().parse("/x", None).unwrap();
    assert!(route.is_method(Some(MethodMask::DELETE)));
    route.set_method(MethodMask::GET.bits() | MethodMask::POST.bits()).unwrap();
    assert!(route.is_method(Some(MethodMask::POST)));
    assert!(!route.is_method(Some(MethodMask::PUT)));
    assert!(route.is_method(None));
    assert!(matches!(
        route.set_method(0),
        Err(RouterError::InvalidMethodMask(0))
    ));
    assert!(route.set_method(16).is_err());
}

#[test]
fn test_defaults_keep_first_value() {
    let mut route = RouteParser::default().parse("/x", None).unwrap();
    route.set("controller", "Pages").set("controller", "Other");
    route.add_parameters([("action", "index"), ("controller", "Third")]);
    assert_eq!(route.defaults()["controller"], "Pages");
    assert_eq!(route.defaults()["action"], "index");
}

#[test]
fn test_escaped_brace_stays_inside_pattern() {
    let route = RouteParser::default().parse(r"/tags/{x:[^\}]+}", None).unwrap();
    assert_eq!(route.path(), "/tags/{x}");
    assert_eq!(route.parameter_patterns()[0].1, r"[^\}]+");
    assert!(route.regex().unwrap().is_match("/tags/rust"));
    assert!(!route.regex().unwrap().is_match("/tags/a}b"));

    let quantified = RouteParser::default().parse(r"/y/{year:\d{4}}", None).unwrap();
    assert!(quantified.regex().unwrap().is_match("/y/2024"));
}
