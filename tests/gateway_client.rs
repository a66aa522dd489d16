use category_sync::config::{Config, FormatSelector};
use category_sync::error::SyncError;
use category_sync::gateway::{CategoryStore, GatewayClient};
use category_sync::normalize::EntrySet;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server_uri: &str) -> Config {
    Config {
        client_id: "test-client".into(),
        client_secret: "test-secret".into(),
        vanity_domain: "acme".into(),
        category_name: "Blocked Sites".into(),
        url_list_source: format!("{server_uri}/list.txt"),
        gateway_base_url: server_uri.to_string(),
        token_url: format!("{server_uri}/oauth2/v1/token"),
        super_category: "USER_DEFINED".into(),
        source_format: FormatSelector::Auto,
        table_url_column: None,
        fetch_timeout: Duration::from_secs(5),
        activate_changes: true,
        log_level: "info".into(),
    }
}

fn gateway(server: &MockServer) -> GatewayClient {
    GatewayClient::new(reqwest::Client::new(), test_config(&server.uri()))
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-1"})),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn find_by_name_requires_exact_match() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    // The search parameter matches loosely; the client must pick the exact
    // configured name out of the results.
    Mock::given(method("GET"))
        .and(path("/urlCategories"))
        .and(query_param("search", "Blocked Sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "CUSTOM_07", "configuredName": "Blocked Sites Staging", "urls": []},
            {"id": "CUSTOM_03", "configuredName": "Blocked Sites", "urls": ["old.com"]}
        ])))
        .mount(&server)
        .await;

    let client = gateway(&server);
    let found = client.find_by_name("Blocked Sites").await.unwrap().unwrap();
    assert_eq!(found.id, "CUSTOM_03");
    assert_eq!(found.urls, vec!["old.com"]);
}

#[tokio::test]
async fn find_by_name_returns_none_when_absent() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/urlCategories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = gateway(&server);
    assert!(client.find_by_name("Blocked Sites").await.unwrap().is_none());
}

#[tokio::test]
async fn create_posts_when_absent() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/urlCategories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/urlCategories"))
        .and(body_partial_json(json!({
            "configuredName": "Blocked Sites",
            "superCategory": "USER_DEFINED",
            "customCategory": true,
            "urls": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": "CUSTOM_09", "configuredName": "Blocked Sites", "urls": []}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = gateway(&server);
    let created = client.create("Blocked Sites", "synced").await.unwrap();
    assert_eq!(created.id, "CUSTOM_09");
    assert!(created.urls.is_empty());
}

#[tokio::test]
async fn create_is_idempotent_when_category_exists() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    // Only the list endpoint is mounted; a POST would fail the test by
    // hitting an unmatched route.
    Mock::given(method("GET"))
        .and(path("/urlCategories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "CUSTOM_03", "configuredName": "Blocked Sites", "urls": ["old.com"]}
        ])))
        .mount(&server)
        .await;

    let client = gateway(&server);
    let category = client.create("Blocked Sites", "synced").await.unwrap();
    assert_eq!(category.id, "CUSTOM_03");
}

#[tokio::test]
async fn replace_entries_puts_the_full_set() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("PUT"))
        .and(path("/urlCategories/CUSTOM_03"))
        .and(body_partial_json(json!({
            "configuredName": "Blocked Sites",
            "urls": ["new.com", "old.com"],
            "customCategory": true
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = gateway(&server);
    let category = category_sync::gateway::Category {
        id: "CUSTOM_03".into(),
        configured_name: "Blocked Sites".into(),
        urls: vec!["old.com".into()],
        description: None,
    };
    let entries: EntrySet = ["old.com".to_string(), "new.com".to_string()]
        .into_iter()
        .collect();

    client.replace_entries(&category, &entries).await.unwrap();
}

#[tokio::test]
async fn activate_posts_to_the_activation_endpoint() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/status/activate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server).activate().await.unwrap();
}

#[tokio::test]
async fn rejected_credentials_surface_as_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/v1/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .find_by_name("Blocked Sites")
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Auth(_)));
}

#[tokio::test]
async fn expired_token_triggers_one_reauth_and_replay() {
    let server = MockServer::start().await;
    // Initial auth plus one re-auth.
    mount_token(&server, 2).await;

    Mock::given(method("GET"))
        .and(path("/urlCategories"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/urlCategories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let found = gateway(&server).find_by_name("Blocked Sites").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn second_rejection_surfaces_auth_error() {
    let server = MockServer::start().await;
    mount_token(&server, 2).await;

    Mock::given(method("GET"))
        .and(path("/urlCategories"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let err = gateway(&server)
        .find_by_name("Blocked Sites")
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Auth(_)));
}

#[tokio::test]
async fn gateway_rejection_carries_status_and_body() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/urlCategories"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .find_by_name("Blocked Sites")
        .await
        .unwrap_err();
    match err {
        SyncError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance window");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
