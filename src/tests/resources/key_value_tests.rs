use super::helpers::{create_console, mount_status, request_count, unreachable_url};
use crate::{
    ClientConfig, DeleteOutcome, GetOutcome, KvConsole, KvError, RefreshOutcome, SetOutcome,
    ValidationError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

async fn mount_get(mock_server: &MockServer, key: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("key", key))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_set_success_triggers_one_refresh() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    Mock::given(method("POST"))
        .and(path("/set"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"key": "a", "value": "1"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_status(
        &mock_server,
        serde_json::json!({"nodes": [{"id": "n1", "status": "up"}]}),
    )
    .await;

    let outcome = console.set("a", "1").await;

    match outcome {
        SetOutcome::Stored { refresh } => assert!(refresh.is_applied()),
        other => panic!("Expected stored outcome, got {:?}", other),
    }
    assert_eq!(request_count(&mock_server, "/status").await, 1);
    assert_eq!(console.rendered().await, vec!["n1: up"]);
}

#[tokio::test]
async fn test_set_rejected_triggers_no_refresh() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    Mock::given(method("POST"))
        .and(path("/set"))
        .respond_with(ResponseTemplate::new(500).set_body_string("replication failed"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_status(&mock_server, serde_json::json!({"nodes": []})).await;

    let outcome = console.set("a", "1").await;

    assert!(matches!(
        outcome,
        SetOutcome::Failed(KvError::Protocol { status: 500, .. })
    ));
    assert_eq!(request_count(&mock_server, "/status").await, 0);
}

#[tokio::test]
async fn test_set_transport_failure_triggers_no_refresh() {
    let console = KvConsole::from_config(ClientConfig {
        base_url: unreachable_url(),
        ..Default::default()
    })
    .unwrap();

    let outcome = console.set("a", "1").await;
    assert!(matches!(outcome, SetOutcome::Failed(KvError::Transport(_))));
    assert_eq!(console.synchronizer().latest_tag(), 0);
}

#[tokio::test]
async fn test_set_success_with_failing_status_still_stored() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    Mock::given(method("POST"))
        .and(path("/set"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = console.set("a", "1").await;
    assert!(matches!(
        outcome,
        SetOutcome::Stored {
            refresh: RefreshOutcome::Failed(KvError::Protocol { status: 503, .. })
        }
    ));
}

#[tokio::test]
async fn test_set_empty_key_sends_nothing() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    let outcome = console.set("", "1").await;

    assert!(matches!(
        outcome,
        SetOutcome::Failed(KvError::Validation(ValidationError::Field { .. }))
    ));
    assert!(mock_server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_set_empty_value_is_passed_through() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    Mock::given(method("POST"))
        .and(path("/set"))
        .and(body_json(serde_json::json!({"key": "a", "value": ""})))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = console.set("a", "").await;
    assert!(matches!(
        outcome,
        SetOutcome::Failed(KvError::Protocol { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_overlapping_sets_are_independent() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    Mock::given(method("POST"))
        .and(path("/set"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;
    mount_status(&mock_server, serde_json::json!({"nodes": []})).await;

    let (first, second) = tokio::join!(console.set("a", "1"), console.set("b", "2"));

    assert!(matches!(first, SetOutcome::Stored { .. }));
    assert!(matches!(second, SetOutcome::Stored { .. }));
    assert_eq!(request_count(&mock_server, "/status").await, 2);
    assert_eq!(console.synchronizer().latest_tag(), 2);
}

#[tokio::test]
async fn test_get_found() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    mount_get(&mock_server, "a", serde_json::json!({"value": "1"})).await;

    match console.get("a").await {
        GetOutcome::Found { key, value } => {
            assert_eq!(key, "a");
            assert_eq!(value, "1");
        }
        other => panic!("Expected found outcome, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_missing_value_is_not_found() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    mount_get(&mock_server, "missing", serde_json::json!({})).await;

    let outcome = console.get("missing").await;
    assert!(matches!(outcome, GetOutcome::NotFound { ref key } if key == "missing"));
}

#[tokio::test]
async fn test_get_empty_value_is_not_found() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    mount_get(&mock_server, "blank", serde_json::json!({"value": ""})).await;

    assert!(matches!(
        console.get("blank").await,
        GetOutcome::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_get_protocol_failure_is_an_error() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Key not found"))
        .mount(&mock_server)
        .await;

    let outcome = console.get("a").await;
    match outcome {
        GetOutcome::Failed(error) => {
            assert_eq!(error.status(), Some(404));
        }
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(request_count(&mock_server, "/status").await, 0);
}

#[tokio::test]
async fn test_get_is_repeatable() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    mount_get(&mock_server, "a", serde_json::json!({"value": "1"})).await;
    mount_get(&mock_server, "missing", serde_json::json!({})).await;

    let first = console.get("a").await;
    let second = console.get("a").await;
    assert_eq!(first.value(), Some("1"));
    assert_eq!(first.value(), second.value());

    let first = console.get("missing").await;
    let second = console.get("missing").await;
    assert!(matches!(first, GetOutcome::NotFound { .. }));
    assert!(matches!(second, GetOutcome::NotFound { .. }));
}

#[tokio::test]
async fn test_get_encodes_reserved_characters() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    mount_get(&mock_server, "a&b=c d", serde_json::json!({"value": "x"})).await;

    assert_eq!(console.get("a&b=c d").await.value(), Some("x"));
}

#[tokio::test]
async fn test_get_empty_key_sends_nothing() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    assert!(matches!(
        console.get("").await,
        GetOutcome::Failed(KvError::Validation(_))
    ));
    assert!(mock_server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_delete_success_triggers_one_refresh() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    Mock::given(method("DELETE"))
        .and(path("/delete"))
        .and(query_param("key", "a"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_status(
        &mock_server,
        serde_json::json!({"nodes": [{"id": "n1", "status": "up"}]}),
    )
    .await;

    let outcome = console.delete("a").await;
    assert!(matches!(outcome, DeleteOutcome::Deleted { ref refresh } if refresh.is_applied()));
    assert_eq!(request_count(&mock_server, "/status").await, 1);
}

#[tokio::test]
async fn test_delete_failure_triggers_no_refresh() {
    let mock_server = MockServer::start().await;
    let console = create_console(&mock_server);

    Mock::given(method("DELETE"))
        .and(path("/delete"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_status(&mock_server, serde_json::json!({"nodes": []})).await;

    let outcome = console.delete("a").await;
    assert!(matches!(
        outcome,
        DeleteOutcome::Failed(KvError::Protocol { status: 500, .. })
    ));
    assert_eq!(request_count(&mock_server, "/status").await, 0);
}

#[tokio::test]
async fn test_delete_transport_failure_triggers_no_refresh() {
    let console = KvConsole::from_config(ClientConfig {
        base_url: unreachable_url(),
        ..Default::default()
    })
    .unwrap();

    let outcome = console.delete("a").await;
    assert!(matches!(outcome, DeleteOutcome::Failed(KvError::Transport(_))));
    assert_eq!(console.synchronizer().latest_tag(), 0);
}
