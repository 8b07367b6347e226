//! Request label derivation tests.

use autoname::engine::{normalize, PathNormalizer, RewriteRule, RuleSet};

#[test]
fn api_prefix_and_numeric_id_collapse() {
    assert_eq!(normalize("GET", "/api/users/42").as_str(), "GET /users/:num");
}

#[test]
fn version_marker_and_uuid_collapse() {
    assert_eq!(
        normalize("POST", "/v1/orders/3fa85f64-5717-4562-b3fc-2c963f66afa6").as_str(),
        "POST /orders/:uuid"
    );
}

#[test]
fn api_and_version_both_collapse() {
    assert_eq!(normalize("GET", "/api/v2/items").as_str(), "GET /items");
}

#[test]
fn uppercase_uuid_matches() {
    assert_eq!(
        normalize("GET", "/files/3FA85F64-5717-4562-B3FC-2C963F66AFA6/raw").as_str(),
        "GET /files/:uuid/raw"
    );
}

#[test]
fn every_uuid_is_replaced() {
    let a = uuid::Uuid::new_v4();
    let b = uuid::Uuid::new_v4();
    let path = format!("/orgs/{a}/projects/{b}");
    assert_eq!(normalize("DELETE", &path).as_str(), "DELETE /orgs/:uuid/projects/:uuid");
}

#[test]
fn normalizing_twice_is_stable_for_uuid_paths() {
    let normalizer = PathNormalizer::default();
    for _ in 0..20 {
        let path = format!("/users/{}/sessions/{}", uuid::Uuid::new_v4(), 17);
        let once = normalizer.normalize_path(&path);
        let twice = normalizer.normalize_path(&once);
        assert_eq!(once, "/users/:uuid/sessions/:num");
        assert_eq!(once, twice);
    }
}

#[test]
fn plain_path_is_unchanged() {
    assert_eq!(normalize("GET", "/about/team").as_str(), "GET /about/team");
}

#[test]
fn empty_path_yields_method_and_space() {
    assert_eq!(normalize("OPTIONS", "").as_str(), "OPTIONS ");
}

#[test]
fn method_case_is_preserved() {
    assert_eq!(normalize("get", "/x").as_str(), "get /x");
}

#[test]
fn digits_after_letters_are_untouched() {
    assert_eq!(normalize("GET", "/v2abc/x").as_str(), "GET /v2abc/x");
}

#[test]
fn numeric_prefix_of_segment_still_collapses() {
    // The numeric rule is not anchored at the segment end.
    assert_eq!(normalize("GET", "/items/12abc").as_str(), "GET /items/:numabc");
}

#[test]
fn trailing_version_without_slash_is_kept() {
    assert_eq!(normalize("GET", "/service/v3").as_str(), "GET /service/v3");
}

#[test]
fn two_digit_version_is_not_a_version_marker() {
    assert_eq!(normalize("GET", "/v10/x").as_str(), "GET /v10/x");
}

#[test]
fn api_collapse_is_substring_based() {
    assert_eq!(normalize("GET", "/internal/api/status").as_str(), "GET /internal/status");
}

#[test]
fn custom_rule_runs_after_defaults() {
    let mut rules = RuleSet::default_rules();
    rules.push(RewriteRule::new(r"/[0-9a-f]{40}", "/:sha").expect("compile"));
    let normalizer = PathNormalizer::new(rules);

    let path = "/commits/a94a8fe5ccb19ba61c4c0873d391e987982fbbd3";
    assert_eq!(normalizer.label("GET", path).as_str(), "GET /commits/:sha");
    assert_eq!(normalizer.rules().rules().len(), 5);
}

#[test]
fn rule_order_matters() {
    // A numeric rule ahead of the UUID rule eats the UUID's leading digits.
    let mut reordered = RuleSet::new();
    reordered.push(RewriteRule::new(r"/\d+", "/:num").expect("compile"));
    reordered.push(
        RewriteRule::new(
            r"(?i)/[0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12}",
            "/:uuid",
        )
        .expect("compile"),
    );
    let normalizer = PathNormalizer::new(reordered);

    let path = "/u/12345678-1234-1234-1234-123456789012";
    assert_eq!(
        normalizer.normalize_path(path),
        "/u/:num-1234-1234-1234-123456789012"
    );
    assert_eq!(PathNormalizer::default().normalize_path(path), "/u/:uuid");
}
