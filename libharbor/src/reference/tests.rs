use super::*;
use std::str::FromStr;

const DIGEST: &str = "sha256:7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc";

fn parts(image: &str) -> (String, String, String, String) {
    let reference = ImageReference::parse(image).unwrap();
    (
        reference.domain().to_string(),
        reference.project().to_string(),
        reference.repository().to_string(),
        reference.reference().to_string(),
    )
}

#[test]
fn test_parse_full_coordinate() {
    assert_eq!(
        parts("harbor.example.com/library/nginx:alpine"),
        (
            "harbor.example.com".into(),
            "library".into(),
            "nginx".into(),
            "alpine".into()
        )
    );
}

#[test]
fn test_parse_defaults_project_to_library() {
    let reference = ImageReference::parse("harbor.example.com/nginx:alpine").unwrap();
    assert_eq!(reference.domain(), "harbor.example.com");
    assert_eq!(reference.project(), "library");
    assert_eq!(reference.repository(), "nginx");
    assert_eq!(reference.reference(), "alpine");
}

#[test]
fn test_parse_nested_repository_splits_on_first_slash() {
    let reference = ImageReference::parse("harbor.example.com/team/group/app:v1").unwrap();
    assert_eq!(reference.project(), "team");
    assert_eq!(reference.repository(), "group/app");
    assert_eq!(reference.reference(), "v1");
    assert_eq!(reference.name(), "team/group/app");
}

#[test]
fn test_parse_defaults_tag_to_latest() {
    let reference = ImageReference::parse("harbor.example.com/library/nginx").unwrap();
    assert_eq!(reference.reference(), "latest");
    assert!(!reference.is_digest());
}

#[test]
fn test_parse_digest_keeps_full_digest_string() {
    let image = format!("harbor.example.com/library/nginx@{}", DIGEST);
    let reference = ImageReference::parse(&image).unwrap();
    assert_eq!(reference.reference(), DIGEST);
    assert!(reference.is_digest());
}

#[test]
fn test_parse_tag_and_digest_prefers_digest() {
    let image = format!("harbor.example.com/library/nginx:alpine@{}", DIGEST);
    let reference = ImageReference::parse(&image).unwrap();
    assert_eq!(reference.reference(), DIGEST);
}

#[test]
fn test_parse_without_domain_uses_docker_hub() {
    assert_eq!(
        parts("nginx"),
        (
            "docker.io".into(),
            "library".into(),
            "nginx".into(),
            "latest".into()
        )
    );
    assert_eq!(
        parts("myuser/app:1.0"),
        (
            "docker.io".into(),
            "myuser".into(),
            "app".into(),
            "1.0".into()
        )
    );
}

#[test]
fn test_parse_legacy_docker_hub_domain() {
    let reference = ImageReference::parse("index.docker.io/nginx").unwrap();
    assert_eq!(reference.domain(), "docker.io");
    assert_eq!(reference.project(), "library");
    assert_eq!(reference.repository(), "nginx");
}

#[test]
fn test_parse_domain_with_port() {
    let reference = ImageReference::parse("harbor.example.com:8443/proj/app:v2").unwrap();
    assert_eq!(reference.domain(), "harbor.example.com:8443");
    assert_eq!(reference.project(), "proj");
    assert_eq!(reference.repository(), "app");
    assert_eq!(reference.reference(), "v2");

    let reference = ImageReference::parse("localhost:5000/app").unwrap();
    assert_eq!(reference.domain(), "localhost:5000");
    assert_eq!(reference.project(), "library");
    assert_eq!(reference.repository(), "app");
    assert_eq!(reference.reference(), "latest");
}

#[test]
fn test_parse_bare_host_has_empty_repository() {
    let reference = ImageReference::parse("harbor.example.com").unwrap();
    assert_eq!(reference.domain(), "harbor.example.com");
    assert_eq!(reference.repository(), "");

    let reference = ImageReference::parse("harbor.example.com:5000").unwrap();
    assert_eq!(reference.domain(), "harbor.example.com:5000");
    assert_eq!(reference.repository(), "");
}

#[test]
fn test_parse_coordinate_rejects_bare_host() {
    let err = ImageReference::parse_coordinate("harbor.example.com").unwrap_err();
    assert!(matches!(err, HarborError::NotRegistryCoordinate { .. }));

    let err = ImageReference::parse_coordinate("localhost:5000").unwrap_err();
    assert!(matches!(err, HarborError::NotRegistryCoordinate { .. }));
}

#[test]
fn test_parse_coordinate_accepts_complete_coordinate() {
    let reference =
        ImageReference::parse_coordinate("harbor.example.com/library/nginx:alpine").unwrap();
    assert_eq!(reference.project(), "library");
    assert_eq!(reference.repository(), "nginx");
    assert_eq!(reference.reference(), "alpine");
}

#[test]
fn test_parse_coordinate_propagates_grammar_errors() {
    let err = ImageReference::parse_coordinate("Harbor/NGINX").unwrap_err();
    assert!(matches!(err, HarborError::Reference { .. }));
}

#[test]
fn test_reference_from_invalid_string_fails() {
    let reference = ImageReference::from_str("Invalid-Reference-With-Caps");
    assert!(matches!(
        reference.unwrap_err(),
        HarborError::Reference { .. }
    ));
}

#[test]
fn test_parse_rejects_malformed_coordinates() {
    for image in [
        "",
        "harbor.example.com/",
        "harbor.example.com//nginx",
        "harbor.example.com/library/nginx:",
        "harbor.example.com/library/nginx:-bad",
        "harbor.example.com/library/-nginx",
        "harbor.example.com/library/ng..inx",
        "harbor.example.com/library/nginx@sha256:tooshort",
        "harbor.example.com/library/nginx@",
        "bad_host!.com/library/nginx",
    ] {
        assert!(
            ImageReference::parse(image).is_err(),
            "expected '{}' to be rejected",
            image
        );
    }
}

#[test]
fn test_parse_accepts_path_separators() {
    let reference = ImageReference::parse("harbor.example.com/my_team/app-name__x.y:1.0_rc-2").unwrap();
    assert_eq!(reference.project(), "my_team");
    assert_eq!(reference.repository(), "app-name__x.y");
    assert_eq!(reference.reference(), "1.0_rc-2");
}

#[test]
fn test_parse_uppercase_domain_is_allowed() {
    let reference = ImageReference::parse("Harbor.Example.com/library/nginx").unwrap();
    assert_eq!(reference.domain(), "Harbor.Example.com");
}

#[test]
fn test_parse_rejects_image_identifier() {
    let identifier = "7173b809ca12ec5dee4506cd86be934c4596dd234ee82c0662eac04a8c2c71dc";
    assert!(ImageReference::parse(identifier).is_err());
}

#[test]
fn test_parse_rejects_overlong_name() {
    let image = format!("harbor.example.com/library/{}", "a".repeat(256));
    assert!(ImageReference::parse(&image).is_err());
}

#[test]
fn test_display() {
    let reference = ImageReference::parse("harbor.example.com/team/group/app:v1").unwrap();
    assert_eq!(reference.to_string(), "harbor.example.com/team/group/app:v1");

    let reference = ImageReference::parse("nginx").unwrap();
    assert_eq!(reference.to_string(), "docker.io/library/nginx:latest");

    let image = format!("harbor.example.com/library/nginx@{}", DIGEST);
    let reference = ImageReference::parse(&image).unwrap();
    assert_eq!(reference.to_string(), image);
}

#[test]
fn test_split_name_tag_uses_grammar() {
    assert_eq!(
        split_name_tag("harbor.example.com:8443/library/nginx:alpine"),
        (
            "harbor.example.com:8443/library/nginx".to_string(),
            "alpine".to_string()
        )
    );
    assert_eq!(
        split_name_tag(&format!("library/nginx@{}", DIGEST)),
        ("library/nginx".to_string(), DIGEST.to_string())
    );
    assert_eq!(
        split_name_tag("harbor.example.com"),
        ("harbor.example.com".to_string(), String::new())
    );
}

#[test]
fn test_split_name_tag_falls_back_to_last_colon() {
    assert_eq!(
        split_name_tag("Harbor/Library/Nginx:V1"),
        ("Harbor/Library/Nginx".to_string(), "V1".to_string())
    );
    assert_eq!(
        split_name_tag("Some Image"),
        ("Some Image".to_string(), String::new())
    );
}

#[test]
fn test_parse_bare_host_with_tag() {
    let reference = ImageReference::parse("my.app:v1").unwrap();
    assert_eq!(reference.domain(), "my.app");
    assert_eq!(reference.repository(), "");
    assert_eq!(reference.reference(), "v1");

    let reference = ImageReference::parse("localhost").unwrap();
    assert_eq!(reference.domain(), "localhost");
    assert_eq!(reference.repository(), "");
}

#[test]
fn test_parse_numeric_tag_on_plain_name_is_not_a_port() {
    let reference = ImageReference::parse("nginx:5000").unwrap();
    assert_eq!(reference.domain(), "docker.io");
    assert_eq!(reference.project(), "library");
    assert_eq!(reference.repository(), "nginx");
    assert_eq!(reference.reference(), "5000");
}

#[test]
fn test_parse_rejects_uppercase_docker_hub_path() {
    let err = ImageReference::parse("Foo/bar").unwrap_err();
    assert!(matches!(err, HarborError::Reference { .. }));
}

#[test]
fn test_parse_rejects_invalid_bare_host() {
    assert!(ImageReference::parse("bad_host!.com").is_err());
    assert!(ImageReference::parse("my.app:-v1").is_err());
}

#[test]
fn test_parse_error_keeps_grammar_source() {
    let err = ImageReference::parse("harbor.example.com/library/nginx:").unwrap_err();
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_split_name_tag_keeps_explicit_latest() {
    assert_eq!(
        split_name_tag("library/nginx:latest"),
        ("library/nginx".to_string(), "latest".to_string())
    );
    assert_eq!(
        split_name_tag(&format!("library/nginx:alpine@{}", DIGEST)),
        ("library/nginx".to_string(), DIGEST.to_string())
    );
}
