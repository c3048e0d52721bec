use libharbor::api::label::LabelColor;
use libharbor::api::project::ProjectReq;
use libharbor::{ClientBuilder, Credentials, HarborError, ImageReference, ListOptions, Settings};

#[test]
fn test_builder_requires_endpoint() {
    let err = ClientBuilder::new().build().unwrap_err();
    assert!(matches!(err, HarborError::Validation { .. }));
}

#[test]
fn test_builder_builds_both_clients() {
    let client = ClientBuilder::new()
        .endpoint("harbor.example.com")
        .bearer_token("robot-token")
        .build()
        .unwrap();
    assert_eq!(client.base_url(), "https://harbor.example.com/api/v2.0");
    assert_eq!(client.credentials(), &Credentials::bearer("robot-token"));

    let registry = ClientBuilder::new()
        .endpoint("http://localhost:8080/")
        .build_distribution()
        .unwrap();
    assert_eq!(registry.server_url(), "http://localhost:8080");
}

#[test]
fn test_builder_from_settings() {
    let settings = Settings::from_yaml_str(
        "endpoint: harbor.example.com\ncredentials:\n  username: admin\n  password: secret\n",
    )
    .unwrap();
    let client = ClientBuilder::from_settings(&settings).unwrap().build().unwrap();
    assert_eq!(client.credentials(), &Credentials::basic("admin", "secret"));
}

#[test]
fn test_image_reference_parsing() {
    let reference = ImageReference::parse_coordinate("harbor.example.com/library/nginx:alpine").unwrap();
    assert_eq!(reference.project(), "library");
    assert_eq!(reference.repository(), "nginx");
    assert_eq!(reference.reference(), "alpine");
}

#[test]
fn test_list_options_query() {
    let options = ListOptions::new().with_page(1).with_sort("name");
    assert_eq!(options.to_query(), "page=1&sort=name");
}

#[test]
fn test_request_types() {
    let project = ProjectReq::new("demo").with_public(true);
    assert_eq!(project.project_name, "demo");
    assert_eq!(LabelColor::Red.to_string(), "#C92100");
}

#[test]
fn test_version() {
    assert!(!libharbor::version().is_empty());
}
