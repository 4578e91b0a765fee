//! Retry, rate limiting, error classification and cancellation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use growthbook_api::client::ErrorKind as ClientErrorKind;
use growthbook_api::{BackoffPolicy, CancellationToken, GrowthBookClient, GrowthBookRestClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::common::{config, init_tracing, setup};

#[tokio::test]
async fn test_recovers_from_transient_server_errors() {
    let (server, client) = setup(5).await;
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/prj_1"))
        .respond_with(move |_: &wiremock::Request| {
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 => ResponseTemplate::new(502),
                1 => ResponseTemplate::new(503),
                _ => ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "project": {"id": "prj_1", "name": "checkout"}
                })),
            }
        })
        .mount(&server)
        .await;

    let project = client.get_project("prj_1").await.unwrap();
    assert_eq!(project.name, "checkout");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_exhausted_budget_surfaces_attempts() {
    let (server, client) = setup(3).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/prj_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .expect(4)
        .mount(&server)
        .await;

    let err = client.get_project("prj_1").await.unwrap_err();
    assert!(!err.is_not_found());

    let inner = err.client_error().expect("client error");
    match &inner.kind {
        ClientErrorKind::RetriesExhausted { attempts, last } => {
            assert_eq!(*attempts, 4);
            assert!(last.contains("database unavailable"));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_waits_for_retry_after() {
    let (server, client) = setup(0).await;
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/api/v1/environments"))
        .respond_with(move |_: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(429).insert_header("Retry-After", "1")
            } else {
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"environments": []}))
            }
        })
        .mount(&server)
        .await;

    let started = Instant::now();
    let environments = client.list_environments().await.unwrap();

    assert!(environments.is_empty());
    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_client_errors_fail_fast() {
    let (server, client) = setup(5).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/environments/production"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"message": "projects must be an array"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/features/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .update_environment("production", &Default::default())
        .await
        .unwrap_err();
    let inner = err.client_error().expect("client error");
    assert_eq!(inner.status(), Some(422));
    assert!(inner.to_string().contains("projects must be an array"));

    let err = client.delete_feature("gone").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_cancellation_interrupts_backoff() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let slow = BackoffPolicy::default()
        .with_max_retries(5)
        .with_initial_interval(Duration::from_secs(20))
        .with_max_interval(Duration::from_secs(60));

    let token = CancellationToken::new();
    let core = GrowthBookClient::with_config(config(&server, slow))
        .unwrap()
        .with_cancellation(token.clone());
    let client = GrowthBookRestClient::from_client(core);

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = client.list_projects().await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(err.client_error().is_some_and(|e| e.is_cancelled()));
}

#[tokio::test]
async fn test_deadline_bounds_rate_limit_waits() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sdk-connections/sdk_1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let core = GrowthBookClient::with_config(config(&server, BackoffPolicy::default()))
        .unwrap()
        .with_deadline(tokio::time::Instant::now() + Duration::from_millis(200));
    let client = GrowthBookRestClient::from_client(core);

    let started = Instant::now();
    let err = client.get_sdk_connection("sdk_1").await.unwrap_err();

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(err.client_error().is_some_and(|e| e.is_cancelled()));
}
