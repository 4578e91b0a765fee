//! Create / read / update / find / delete flows for every resource kind.

use growthbook_api::rest::FeatureEnvironmentConfig;
use growthbook_api::{Environment, Feature, Project, SdkConnection};
use wiremock::matchers::{body_partial_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use super::common::{setup, API_KEY};

#[tokio::test]
async fn test_project_lifecycle() {
    let (server, client) = setup(0).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/projects"))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(serde_json::json!({"name": "checkout"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "project": {"id": "prj_1", "name": "checkout", "settings": {}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/prj_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "project": {"id": "prj_1", "name": "checkout", "settings": {"statsEngine": "frequentist"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/projects/prj_1"))
        .and(body_partial_json(serde_json::json!({"description": "Checkout funnel"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "project": {"id": "prj_1", "name": "checkout", "description": "Checkout funnel"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/projects/prj_1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_project(&Project::new("checkout")).await.unwrap();
    let id = created.id.clone().unwrap();
    assert_eq!(id, "prj_1");

    let fetched = client.get_project(&id).await.unwrap();
    assert_eq!(fetched.settings.stats_engine.as_deref(), Some("frequentist"));

    let mut changed = fetched.clone();
    changed.description = Some("Checkout funnel".into());
    let updated = client.update_project(&id, &changed).await.unwrap();
    assert_eq!(updated.description.as_deref(), Some("Checkout funnel"));

    client.delete_project(&id).await.unwrap();
}

#[tokio::test]
async fn test_feature_list_spans_three_pages() {
    let (server, client) = setup(0).await;

    let page = |start: usize, count: usize| -> Vec<serde_json::Value> {
        (start..start + count)
            .map(|i| serde_json::json!({"id": format!("flag-{i}"), "valueType": "boolean"}))
            .collect()
    };

    Mock::given(method("GET"))
        .and(path("/api/v1/features"))
        .and(query_param("limit", "100"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "features": page(0, 100), "hasMore": true, "nextOffset": 100
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/features"))
        .and(query_param("offset", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "features": page(100, 100), "hasMore": true, "nextOffset": 200
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/features"))
        .and(query_param("offset", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "features": page(200, 37), "hasMore": false, "nextOffset": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let features = client.list_features().await.unwrap();
    assert_eq!(features.len(), 237);
    let ids: Vec<_> = features.iter().filter_map(|f| f.id.as_deref()).collect();
    assert_eq!(ids[0], "flag-0");
    assert_eq!(ids[236], "flag-236");
}

#[tokio::test]
async fn test_feature_create_and_update() {
    let (server, client) = setup(0).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/features"))
        .and(body_partial_json(serde_json::json!({
            "id": "new-checkout",
            "tags": [],
            "prerequisites": [],
            "environments": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "feature": {"id": "new-checkout", "valueType": "boolean", "defaultValue": "false"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/features/new-checkout"))
        .and(body_partial_json(serde_json::json!({
            "environments": {"production": {"enabled": true}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "feature": {
                "id": "new-checkout",
                "environments": {"production": {"enabled": true, "rules": []}}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let feature = Feature {
        id: Some("new-checkout".into()),
        value_type: Some("boolean".into()),
        default_value: Some("false".into()),
        ..Default::default()
    };
    let created = client.create_feature(&feature).await.unwrap();

    let mut enabled = created.clone();
    enabled.environments.insert(
        "production".into(),
        FeatureEnvironmentConfig {
            enabled: true,
            ..Default::default()
        },
    );
    let updated = client.update_feature("new-checkout", &enabled).await.unwrap();
    assert!(updated.environments["production"].enabled);
}

#[tokio::test]
async fn test_environment_find_and_delete() {
    let (server, client) = setup(0).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/environments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "environments": [
                {"id": "production", "toggleOnList": true, "defaultState": true},
                {"id": "staging", "description": "QA", "toggleOnList": false, "defaultState": false}
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/environments/staging"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let all = client.list_environments().await.unwrap();
    assert_eq!(all.len(), 2);

    let staging = client.find_environment_by_id("staging").await.unwrap();
    assert_eq!(
        staging,
        Environment {
            id: "staging".into(),
            description: Some("QA".into()),
            ..Default::default()
        }
    );

    client.delete_environment("staging").await.unwrap();
}

#[tokio::test]
async fn test_sdk_connection_language_normalization() {
    let (server, client) = setup(0).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sdk-connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "connections": [
                {"id": "sdk_1", "name": "backend", "languages": ["python"], "environment": "production"},
                {"id": "sdk_2", "name": "web", "languages": ["react", "javascript"], "environment": "production"}
            ],
            "hasMore": false
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sdk-connections/sdk_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sdkConnection": {"id": "sdk_2", "name": "web", "language": "", "languages": ["react"]}
        })))
        .mount(&server)
        .await;

    let web: SdkConnection = client.find_sdk_connection_by_name("web").await.unwrap();
    assert_eq!(web.language, "react");

    let by_id = client.find_sdk_connection_by_id("sdk_2").await.unwrap();
    assert_eq!(by_id.language, "react");

    let listed = client.list_sdk_connections().await.unwrap();
    assert_eq!(listed[0].language, "python");
}
