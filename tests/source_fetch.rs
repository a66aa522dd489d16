use category_sync::config::{Config, FormatSelector, SourceFormat};
use category_sync::error::SyncError;
use category_sync::source::fetch;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(source_url: String) -> Config {
    Config {
        client_id: "id".into(),
        client_secret: "secret".into(),
        vanity_domain: "acme".into(),
        category_name: "Blocked Sites".into(),
        url_list_source: source_url,
        gateway_base_url: "https://gateway.invalid".into(),
        token_url: "https://acme.invalid/token".into(),
        super_category: "USER_DEFINED".into(),
        source_format: FormatSelector::Auto,
        table_url_column: None,
        fetch_timeout: Duration::from_secs(5),
        activate_changes: true,
        log_level: "info".into(),
    }
}

#[tokio::test]
async fn fetch_resolves_format_from_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"["bad.com"]"#, "application/json"),
        )
        .mount(&server)
        .await;

    let config = test_config(format!("{}/feed", server.uri()));
    let raw = fetch(&reqwest::Client::new(), &config).await.unwrap();

    assert_eq!(raw.format, SourceFormat::Structured);
    assert_eq!(raw.body, r#"["bad.com"]"#);
}

#[tokio::test]
async fn fetch_falls_back_to_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("bad.com\n"))
        .mount(&server)
        .await;

    let config = test_config(format!("{}/hosts", server.uri()));
    let raw = fetch(&reqwest::Client::new(), &config).await.unwrap();
    assert_eq!(raw.format, SourceFormat::Text);
}

#[tokio::test]
async fn explicit_format_overrides_detection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string("url\nbad.com\n"),
        )
        .mount(&server)
        .await;

    let mut config = test_config(format!("{}/feed", server.uri()));
    config.source_format = FormatSelector::Fixed(SourceFormat::Table);

    let raw = fetch(&reqwest::Client::new(), &config).await.unwrap();
    assert_eq!(raw.format, SourceFormat::Table);
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = test_config(format!("{}/gone", server.uri()));
    let err = fetch(&reqwest::Client::new(), &config).await.unwrap_err();
    assert!(matches!(err, SyncError::Fetch(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_fetch_error() {
    // Nothing listens here.
    let config = test_config("http://127.0.0.1:1/list.txt".into());
    let err = fetch(&reqwest::Client::new(), &config).await.unwrap_err();
    assert!(matches!(err, SyncError::Fetch(_)));
}
