use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::{Duration, Instant};

use quiverdb_common::{COMMAND_PATH, MAX_CONNECTIONS};
use quiverdb_server::{Dispatcher, router};
use quiverdb_storage::Db;

/// Helper: sobe o servidor numa porta efêmera e retorna a URL do comando.
async fn start_server() -> String {
    start_server_with_limit(MAX_CONNECTIONS).await
}

async fn start_server_with_limit(max_connections: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Dispatcher::new(Db::new()), max_connections);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}{COMMAND_PATH}")
}

/// Helper: envia um comando e retorna (status, corpo JSON).
async fn send_command(client: &reqwest::Client, url: &str, command: &str) -> (u16, Value) {
    let response = client
        .post(url)
        .json(&json!({ "command": command }))
        .send()
        .await
        .unwrap();

    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn test_set_get() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let response = send_command(&client, &url, "SET mykey myvalue").await;
    assert_eq!(response, (200, json!("OK")));

    let response = send_command(&client, &url, "GET mykey").await;
    assert_eq!(response, (200, json!({"value": "myvalue"})));
}

#[tokio::test]
async fn test_get_nonexistent() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let response = send_command(&client, &url, "get missing").await;
    assert_eq!(response, (404, json!("Key does not exist")));
}

#[tokio::test]
async fn test_set_nx_xx() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    // XX quando key não existe → 404
    let (status, _) = send_command(&client, &url, "SET key v0 EX60 _ XX").await;
    assert_eq!(status, 404);

    // NX quando key não existe → OK
    let (status, _) = send_command(&client, &url, "SET key v1 EX60 _ NX").await;
    assert_eq!(status, 200);

    // NX quando key existe → 409
    let (status, _) = send_command(&client, &url, "SET key v2 EX60 _ NX").await;
    assert_eq!(status, 409);

    let response = send_command(&client, &url, "GET key").await;
    assert_eq!(response, (200, json!({"value": "v1"})));
}

#[tokio::test]
async fn test_set_with_ex() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    send_command(&client, &url, "SET temp val EX1").await;
    let response = send_command(&client, &url, "GET temp").await;
    assert_eq!(response, (200, json!({"value": "val"})));

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (status, _) = send_command(&client, &url, "GET temp").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_queue_operations() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let response = send_command(&client, &url, "QPUSH list a b c").await;
    assert_eq!(response, (200, json!("OK")));

    for expected in ["c", "b", "a"] {
        let response = send_command(&client, &url, "QPOP list").await;
        assert_eq!(response, (200, json!({"value": expected})));
    }

    let (status, body) = send_command(&client, &url, "QPOP list").await;
    assert_eq!(status, 400);
    assert!(body.get("error").is_some(), "unexpected body {body}");
}

#[tokio::test]
async fn test_wrong_kind() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    send_command(&client, &url, "SET s v").await;
    let (status, _) = send_command(&client, &url, "QPUSH s a").await;
    assert_eq!(status, 409);

    send_command(&client, &url, "QPUSH q a").await;
    let (status, _) = send_command(&client, &url, "SET q v").await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn test_bqpop_timeout() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let start = Instant::now();
    let response = send_command(&client, &url, "BQPOP q 0.2").await;
    assert_eq!(response, (404, Value::Null));
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_bqpop_wakes_on_push() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let waiter = {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move { send_command(&client, &url, "BQPOP jobs 5").await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    let start = Instant::now();
    send_command(&client, &url, "QPUSH jobs job-1").await;

    let response = waiter.await.unwrap();
    assert_eq!(response, (200, json!({"value": "job-1"})));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_invalid_command() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    for command in ["FOOBAR", "GET", "QPUSH q", "BQPOP q never", ""] {
        let response = send_command(&client, &url, command).await;
        assert_eq!(response, (400, json!("Invalid Command")), "command {command:?}");
    }
}

#[tokio::test]
async fn test_missing_command_field() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .json(&json!({ "cmd": "GET k" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.json::<Value>().await.unwrap(), json!("Invalid Command"));
}

#[tokio::test]
async fn test_requires_json_content_type() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .header("Content-Type", "text/plain")
        .body(r#"{"command": "GET k"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_null_body_is_empty_command() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .body("null")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.json::<Value>().await.unwrap(), json!("Invalid Command"));
}

#[tokio::test]
async fn test_trailing_bytes_after_body_are_ignored() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    send_command(&client, &url, "SET k v").await;
    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .body(r#"{"command": "GET k"} garbage"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"value": "v"}));
}

#[tokio::test]
async fn test_concurrency_limit_queues_requests() {
    let url = start_server_with_limit(1).await;
    let client = reqwest::Client::new();

    let waiter = {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move { send_command(&client, &url, "BQPOP jobs 0.5").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    // A única vaga está com o BQPOP: o SET só roda quando ele expira
    let start = Instant::now();
    let response = send_command(&client, &url, "SET k v").await;
    assert_eq!(response, (200, json!("OK")));
    assert!(start.elapsed() >= Duration::from_millis(300));

    assert_eq!(waiter.await.unwrap(), (404, Value::Null));
}

#[tokio::test]
async fn test_only_post_is_allowed() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let response = client.get(&url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 405);
}

#[tokio::test]
async fn test_unknown_path() {
    let url = start_server().await;
    let client = reqwest::Client::new();

    let other = url.replace(COMMAND_PATH, "/other");
    let response = client
        .post(&other)
        .json(&json!({ "command": "GET k" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
