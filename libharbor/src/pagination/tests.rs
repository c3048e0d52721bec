use super::*;
use reqwest::header::HeaderValue;

fn headers_with(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        headers.insert(*name, HeaderValue::from_static(value));
    }
    headers
}

#[test]
fn test_next_link_with_double_quotes() {
    let headers = headers_with(&[(
        "link",
        r#"</api/v2.0/projects?page=2&page_size=10>; rel="next""#,
    )]);
    assert_eq!(
        next_link(&headers),
        Some("/api/v2.0/projects?page=2&page_size=10".to_string())
    );
}

#[test]
fn test_next_link_with_single_quotes() {
    let headers = headers_with(&[("link", r#"</v2/alpine/tags/list?n=50&last=3.18>; rel='next'"#)]);
    assert_eq!(
        next_link(&headers),
        Some("/v2/alpine/tags/list?n=50&last=3.18".to_string())
    );
}

#[test]
fn test_next_link_no_link_header() {
    assert_eq!(next_link(&HeaderMap::new()), None);
}

#[test]
fn test_next_link_multiple_links() {
    let headers = headers_with(&[(
        "link",
        r#"</api/v2.0/projects?page=1&page_size=10>; rel="prev" , </api/v2.0/projects?page=3&page_size=10>; rel="next""#,
    )]);
    assert_eq!(
        next_link(&headers),
        Some("/api/v2.0/projects?page=3&page_size=10".to_string())
    );
}

#[test]
fn test_next_link_only_prev() {
    let headers = headers_with(&[("link", r#"</api/v2.0/projects?page=1>; rel="prev""#)]);
    assert_eq!(next_link(&headers), None);
}

#[test]
fn test_total_count() {
    assert_eq!(total_count(&headers_with(&[("x-total-count", "42")])), Some(42));
    assert_eq!(total_count(&headers_with(&[("x-total-count", "many")])), None);
    assert_eq!(total_count(&HeaderMap::new()), None);
}

#[test]
fn test_page_from_headers() {
    let headers = headers_with(&[
        ("x-total-count", "3"),
        ("link", r#"</api/v2.0/audit-logs?page=2&page_size=2>; rel="next""#),
    ]);
    let page = Page::from_headers(vec!["a", "b"], &headers);
    assert_eq!(page.items, vec!["a", "b"]);
    assert_eq!(page.total, Some(3));
    assert!(page.has_next());

    let last = Page::from_headers(vec!["c"], &headers_with(&[("x-total-count", "3")]));
    assert!(!last.has_next());
}

#[test]
fn test_list_options_empty() {
    assert_eq!(ListOptions::new().to_query(), "");
}

#[test]
fn test_list_options_page_size_is_its_own_field() {
    let options = ListOptions::new().with_page(3).with_page_size(25);
    assert_eq!(options.to_query(), "page=3&page_size=25");
}

#[test]
fn test_list_options_encodes_query_and_sort() {
    let options = ListOptions::new()
        .with_query("name=~nginx")
        .with_sort("-creation_time");
    assert_eq!(options.to_query(), "q=name%3D%7Enginx&sort=-creation_time");
}

#[test]
fn test_query_builder_apply_to() {
    let mut query = QueryBuilder::new();
    query.push("scope", "g").push_opt::<u64>("project_id", None);
    assert_eq!(query.apply_to("/labels"), "/labels?scope=g");

    let mut query = QueryBuilder::new();
    query.push("page", 2);
    assert_eq!(query.apply_to("/projects?with_detail=true"), "/projects?with_detail=true&page=2");

    assert_eq!(QueryBuilder::new().apply_to("/projects"), "/projects");
}
