//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, client list, static assets).

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_clients_endpoint_lists_connections() {
    // テスト項目: /api/clients エンドポイントが接続中のクライアントを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let _alice = server.connect().await;
    let _bob = server.connect().await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("{}/api/clients", server.base_url()))
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");

    // then (期待する結果):
    let clients = body.as_array().expect("Response should be an array");
    assert_eq!(clients.len(), 2);
    for client in clients {
        assert_eq!(client["connection_id"].as_str().unwrap().len(), 36);
        assert!(client["connected_at"].as_str().unwrap().ends_with("+09:00"));
    }
}

#[tokio::test]
async fn test_static_assets_are_served_at_root() {
    // テスト項目: public ディレクトリのファイルがルートで配信される
    // given (前提条件):
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hiroba</h1>").unwrap();
    let server = TestServer::start_with_public_dir(None, dir.path().to_path_buf()).await;

    // when (操作):
    let response = reqwest::get(format!("{}/", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "<h1>hiroba</h1>");
}

#[tokio::test]
async fn test_websocket_path_requires_upgrade() {
    // テスト項目: アップグレードなしの /websocket へのリクエストは拒否される
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(format!("{}/websocket", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert!(response.status().is_client_error());
    assert_eq!(server.client_count().await, 0);
}
