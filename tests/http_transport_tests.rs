//! End-to-end tests of the default `reqwest` transport against a mock server.

use arm_fluent::cdn::ProfilesClient;
use arm_fluent::sql::RecommendedElasticPoolsClient;
use arm_fluent::{
    ArmConfig, ArmError, BaseUrl, ServiceClient, StaticTokenCredential, SubscriptionId,
};
use serde_json::json;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(base_url: &str) -> ServiceClient {
    let config = ArmConfig::builder()
        .subscription_id(SubscriptionId::new("sub1").unwrap())
        .base_url(BaseUrl::new(base_url).unwrap())
        .accept_language("de-DE")
        .user_agent_prefix("my-app/1.0")
        .build()
        .unwrap();
    ServiceClient::new(config, Arc::new(StaticTokenCredential::new("secret-token")))
}

#[tokio::test]
async fn test_get_reaches_server_with_expected_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Cdn/profiles/p1",
        ))
        .and(query_param("api-version", "2016-04-02"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("accept-language", "de-DE"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-request-id", "abc-123")
                .set_body_json(json!({ "name": "p1", "location": "westus" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let profiles = ProfilesClient::new(client_for(&server.uri()));
    let profile = assert_ok!(profiles.get("rg1", "p1").await);

    assert_eq!(profile.name.as_deref(), Some("p1"));
    assert_eq!(profile.location.as_deref(), Some("westus"));
}

#[tokio::test]
async fn test_user_agent_carries_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(header_regex("user-agent", r"^my-app/1\.0 \| arm-fluent/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let profiles = ProfilesClient::new(client_for(&server.uri()));
    assert_ok!(profiles.delete("rg1", "p1").await);
}

#[tokio::test]
async fn test_patch_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(body_json(json!({ "tags": { "env": "prod" } })))
        .and(header("content-type", "application/json; charset=utf-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "p1",
            "tags": { "env": "prod" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profiles = ProfilesClient::new(client_for(&server.uri()));
    let mut parameters = arm_fluent::cdn::ProfileUpdateParameters::default();
    parameters.tags.insert("env".to_string(), "prod".to_string());
    let updated = assert_ok!(profiles.update("rg1", "p1", &parameters).await).unwrap();

    assert_eq!(updated.tags.get("env").map(String::as_str), Some("prod"));
}

#[tokio::test]
async fn test_server_error_carries_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("x-ms-request-id", "req-500")
                .set_body_json(json!({
                    "error": { "code": "InternalServerError", "message": "Try again later" }
                })),
        )
        .mount(&server)
        .await;

    let pools = RecommendedElasticPoolsClient::new(client_for(&server.uri()));
    let error = assert_err!(pools.get("rg1", "server1", "pool1").await);

    let cloud = error.cloud_error().unwrap();
    assert_eq!(cloud.status, 500);
    assert_eq!(cloud.code, "InternalServerError");
    assert_eq!(cloud.request_id.as_deref(), Some("req-500"));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let profiles = ProfilesClient::new(client_for("http://127.0.0.1:1"));

    let error = assert_err!(profiles.get("rg1", "p1").await);

    assert!(matches!(error, ArmError::Transport(_)));
}
