#![allow(clippy::unwrap_used)]
// Resource pipeline tests against a mocked ZIA API.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zia_api::{TransportConfig, ZiaClient};
use zia_provider::{ActivationSettings, Meta, Provider, ProviderError, ResourceData};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(activation: bool) -> (MockServer, Meta) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api/v1/", server.uri())).unwrap();
    let client = ZiaClient::new(base_url, &TransportConfig::default()).unwrap();
    let settings = ActivationSettings::enabled(activation).with_delay(Duration::ZERO);
    (server, Meta::new(client, settings))
}

fn obj(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

async fn mount_activation(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/status/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ACTIVE"})))
        .expect(times)
        .mount(server)
        .await;
}

fn label_body(id: i64, name: &str, description: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "lastModifiedTime": 1_700_000_000,
        "referencedRuleCount": 2,
        "lastModifiedBy": {"id": 9, "name": "admin@example.com"}
    })
}

// ── CRUD round-trip ─────────────────────────────────────────────────

#[tokio::test]
async fn test_create_then_read_reproduces_configuration() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/ruleLabels"))
        .and(body_partial_json(json!({"name": "infra", "description": "core"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(42, "infra", "core")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(42, "infra", "core")))
        .mount(&server)
        .await;
    mount_activation(&server, 0).await;

    let mut d = ResourceData::from_config(
        resource.schema(),
        obj(json!({"name": "infra", "description": "core"})),
    )
    .unwrap();
    resource.create(&mut d, &meta).await.unwrap();

    assert_eq!(d.id(), Some("42"));
    assert_eq!(d.get_string("name"), "infra");
    assert_eq!(d.get_string("description"), "core");
    assert_eq!(d.get_int("label_id"), 42);
    assert_eq!(d.get_int("referenced_rule_count"), 2);
    assert_eq!(d.get_string("last_modified_by.0.name"), "admin@example.com");
}

#[tokio::test]
async fn test_update_sends_new_values_and_refreshes() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/v1/ruleLabels/42"))
        .and(body_partial_json(json!({"name": "infra", "description": "renamed"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(label_body(42, "infra", "renamed")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(label_body(42, "infra", "renamed")),
        )
        .mount(&server)
        .await;

    let prior = obj(json!({"name": "infra", "description": "core", "label_id": 42}));
    let mut d = ResourceData::for_update(
        resource.schema(),
        "42",
        prior,
        obj(json!({"name": "infra", "description": "renamed"})),
    )
    .unwrap();
    assert!(d.has_change("description"));
    assert!(!d.has_change("name"));

    resource.update(&mut d, &meta).await.unwrap();
    assert_eq!(d.get_string("description"), "renamed");
    assert_eq!(d.get_int("label_id"), 42);
}

#[tokio::test]
async fn test_delete_then_read_removes_from_state() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "RESOURCE_NOT_FOUND",
            "message": "Resource not found"
        })))
        .mount(&server)
        .await;

    let state = obj(json!({"name": "infra", "label_id": 42}));
    let mut d = ResourceData::from_state(resource.schema(), "42", state.clone());
    resource.delete(&mut d, &meta).await.unwrap();
    assert!(d.id().is_none());

    let mut d = ResourceData::from_state(resource.schema(), "42", state);
    resource.read(&mut d, &meta).await.unwrap();
    assert!(d.id().is_none());
}

#[tokio::test]
async fn test_read_surfaces_other_errors() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": "UNEXPECTED_ERROR",
            "message": "boom"
        })))
        .mount(&server)
        .await;

    let mut d = ResourceData::from_state(resource.schema(), "42", Map::new());
    let err = resource.read(&mut d, &meta).await.unwrap_err();
    assert!(matches!(err, ProviderError::Api(_)));
    assert_eq!(d.id(), Some("42"));
}

#[tokio::test]
async fn test_create_fails_when_entity_cannot_be_read_back() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/ruleLabels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(42, "infra", "")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut d =
        ResourceData::from_config(resource.schema(), obj(json!({"name": "infra"}))).unwrap();
    let err = resource.create(&mut d, &meta).await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::MissingAfterCreate { kind: "zia_rule_labels", ref id } if id == "42"
    ));
    assert!(!err.is_not_found());
    // The ID survives so the created entity can still be tracked.
    assert_eq!(d.id(), Some("42"));
}

// ── Import ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_by_numeric_id_skips_lookup() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(7, "dmz", "")))
        .expect(1)
        .mount(&server)
        .await;

    let d = resource.import("7", &meta).await.unwrap();
    assert_eq!(d.id(), Some("7"));
    assert_eq!(d.get_string("name"), "dmz");
}

#[tokio::test]
async fn test_import_by_name_looks_up_list() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            label_body(6, "infra", ""),
            label_body(7, "DMZ", "")
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(7, "DMZ", "")))
        .expect(1)
        .mount(&server)
        .await;

    let d = resource.import("dmz", &meta).await.unwrap();
    assert_eq!(d.id(), Some("7"));
}

#[tokio::test]
async fn test_import_missing_entity_fails() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_firewall_filtering_rule").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/firewallFilteringRules/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = resource.import("99", &meta).await.unwrap_err();
    assert!(err.is_not_found());
}

// ── Activation ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_activation_fires_after_mutation_when_enabled() {
    let (server, meta) = setup(true).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/ruleLabels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(42, "infra", "")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(label_body(42, "infra", "")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    mount_activation(&server, 2).await;

    let mut d =
        ResourceData::from_config(resource.schema(), obj(json!({"name": "infra"}))).unwrap();
    resource.create(&mut d, &meta).await.unwrap();
    resource.read(&mut d, &meta).await.unwrap();
    resource.delete(&mut d, &meta).await.unwrap();
}

#[tokio::test]
async fn test_activation_error_fails_the_operation() {
    let (server, meta) = setup(true).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_rule_labels").unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/v1/ruleLabels/42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/status/activate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "busy"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut d = ResourceData::from_state(resource.schema(), "42", Map::new());
    assert!(resource.delete(&mut d, &meta).await.is_err());
}

#[tokio::test]
async fn test_activation_status_resource_activates_regardless_of_toggle() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_activation_status").unwrap();

    mount_activation(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ACTIVE"})))
        .mount(&server)
        .await;

    let mut d =
        ResourceData::from_config(resource.schema(), obj(json!({"status": "ACTIVE"}))).unwrap();
    resource.create(&mut d, &meta).await.unwrap();
    assert_eq!(d.id(), Some("activation"));
    assert_eq!(d.get_string("status"), "ACTIVE");
}

// ── Settings singletons ─────────────────────────────────────────────

#[tokio::test]
async fn test_auth_settings_urls_sends_only_the_delta() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_auth_settings_urls").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/authSettings/exemptedUrls"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"urls": ["old.example.com", "keep.example.com"]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/authSettings/exemptedUrls"))
        .and(query_param("action", "ADD_TO_LIST"))
        .and(body_partial_json(json!({"urls": ["new.example.com"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/authSettings/exemptedUrls"))
        .and(query_param("action", "REMOVE_FROM_LIST"))
        .and(body_partial_json(json!({"urls": ["old.example.com"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut d = ResourceData::from_config(
        resource.schema(),
        obj(json!({"urls": ["keep.example.com", "new.example.com"]})),
    )
    .unwrap();
    resource.create(&mut d, &meta).await.unwrap();
    assert_eq!(d.id(), Some("all_urls"));
}

#[tokio::test]
async fn test_security_settings_create_reads_lists_back() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_security_settings").unwrap();

    Mock::given(method("PUT"))
        .and(path("/api/v1/security"))
        .and(body_partial_json(json!({"whitelistUrls": ["good.example.com"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/security/advanced"))
        .and(body_partial_json(json!({"blacklistUrls": ["bad.example.com"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"whitelistUrls": ["good.example.com"]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/security/advanced"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"blacklistUrls": ["bad.example.com"]})),
        )
        .mount(&server)
        .await;

    let mut d = ResourceData::from_config(
        resource.schema(),
        obj(json!({
            "whitelist_urls": ["good.example.com"],
            "blacklist_urls": ["bad.example.com"]
        })),
    )
    .unwrap();
    resource.create(&mut d, &meta).await.unwrap();

    assert_eq!(d.id(), Some("all_urls"));
    assert_eq!(d.get_string_set("whitelist_urls"), vec!["good.example.com"]);
    assert_eq!(d.get_string_set("blacklist_urls"), vec!["bad.example.com"]);
}

#[tokio::test]
async fn test_security_settings_delete_is_local_only() {
    let (server, meta) = setup(true).await;
    let provider = Provider::new();
    let resource = provider.resource("zia_security_settings").unwrap();
    mount_activation(&server, 0).await;

    let mut d = ResourceData::from_state(resource.schema(), "all_urls", Map::new());
    resource.delete(&mut d, &meta).await.unwrap();
    assert!(d.id().is_none());
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Data sources ────────────────────────────────────────────────────

#[tokio::test]
async fn test_data_source_reads_by_name() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let data_source = provider.data_source("zia_location_groups").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/locations/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 11,
            "name": "Corporate",
            "groupType": "STATIC",
            "locations": [{"id": 3, "name": "HQ", "extensions": {"externalId": 17}}]
        }])))
        .mount(&server)
        .await;

    let mut d =
        ResourceData::from_config(data_source.schema(), obj(json!({"name": "corporate"})))
            .unwrap();
    data_source.read(&mut d, &meta).await.unwrap();

    assert_eq!(d.id(), Some("11"));
    assert_eq!(d.get_int("id"), 11);
    assert_eq!(d.get_string("group_type"), "STATIC");
    assert_eq!(
        d.get("locations"),
        Some(&json!([{"id": 3, "name": "HQ", "extensions": {"externalId": "17"}}]))
    );
}

#[tokio::test]
async fn test_url_categories_reads_by_string_id() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let data_source = provider.data_source("zia_url_categories").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/urlCategories/CUSTOM_01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "CUSTOM_01",
            "configuredName": "Blocked sites",
            "superCategory": "USER_DEFINED",
            "urls": ["bad.example.com", ".gambling.example"],
            "customCategory": true,
            "scopes": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut d =
        ResourceData::from_config(data_source.schema(), obj(json!({"id": "CUSTOM_01"}))).unwrap();
    data_source.read(&mut d, &meta).await.unwrap();

    assert_eq!(d.id(), Some("CUSTOM_01"));
    assert_eq!(d.get_string("configured_name"), "Blocked sites");
    assert_eq!(d.get_string("super_category"), "USER_DEFINED");
    assert_eq!(d.get_string_set("urls"), vec!["bad.example.com", ".gambling.example"]);
    assert_eq!(d.get("scopes"), Some(&json!([])));
}

#[tokio::test]
async fn test_data_source_not_found_is_an_error() {
    let (server, meta) = setup(false).await;
    let provider = Provider::new();
    let data_source = provider.data_source("zia_rule_labels").unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/ruleLabels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut d =
        ResourceData::from_config(data_source.schema(), obj(json!({"name": "ghost"}))).unwrap();
    let err = data_source.read(&mut d, &meta).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_data_source_requires_id_or_name() {
    let (_server, meta) = setup(false).await;
    let provider = Provider::new();
    let data_source = provider.data_source("zia_rule_labels").unwrap();

    let mut d = ResourceData::from_config(data_source.schema(), Map::new()).unwrap();
    let err = data_source.read(&mut d, &meta).await.unwrap_err();
    assert!(matches!(err, ProviderError::MissingAttribute { .. }));
}
