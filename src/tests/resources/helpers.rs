use crate::{ClientConfig, KvConsole};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub(super) fn create_console(mock_server: &MockServer) -> KvConsole {
    KvConsole::from_config(ClientConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap()
}

pub(super) async fn mount_status(mock_server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

/// Number of requests the mock server received for `request_path`.
pub(super) async fn request_count(mock_server: &MockServer, request_path: &str) -> usize {
    mock_server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}

/// A base URL nothing listens on.
pub(super) fn unreachable_url() -> String {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    format!("http://127.0.0.1:{}", port)
}
