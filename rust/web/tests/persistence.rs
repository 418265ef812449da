use std::fs;
use std::path::Path;

use nebula_web::store::{TABLE_FILE, USERS_FILE};
use nebula_web::{ServerConfig, WebServer};
use serde_json::{json, Value};
use warp::hyper::{self, Body, Client as HyperClient, Request};

async fn call(
    client: &HyperClient<hyper::client::HttpConnector>,
    method: hyper::Method,
    uri: String,
    body: Option<Value>,
) -> (hyper::StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("build request");
    let response = client.request(request).await.expect("send request");
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("read body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

fn write_users(dir: &Path) {
    let users = json!([{
        "id": "nebula-pilot",
        "name": "Captain Vega",
        "email": "vega@nebula.gg",
        "avatar": "🂡",
        "stack": 90000,
        "password": "lightyear"
    }]);
    fs::write(dir.join(USERS_FILE), users.to_string()).expect("write users");
}

#[tokio::test]
async fn table_survives_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_users(dir.path());
    let client = HyperClient::new();

    let handle = WebServer::new(ServerConfig::for_tests(dir.path()))
        .expect("server")
        .start()
        .await
        .expect("start");
    let base = format!("http://{}", handle.address());

    let (status, profile) = call(
        &client,
        hyper::Method::POST,
        format!("{base}/login"),
        Some(json!({ "email": "vega@nebula.gg", "password": "lightyear" })),
    )
    .await;
    assert_eq!(status, hyper::StatusCode::OK);
    assert_eq!(profile["name"], "Captain Vega");

    let (status, dealt) =
        call(&client, hyper::Method::POST, format!("{base}/table/new-hand"), None).await;
    assert_eq!(status, hyper::StatusCode::OK);
    assert_eq!(dealt["players"][0]["name"], "Captain Vega");
    assert_eq!(dealt["players"][0]["stack"], 90_000 - 25);
    assert_eq!(dealt["players"][0]["title"], "Pro");

    let (status, flop) = call(
        &client,
        hyper::Method::POST,
        format!("{base}/table/action"),
        Some(json!({ "action": "raise" })),
    )
    .await;
    assert_eq!(status, hyper::StatusCode::OK);
    assert_eq!(flop["stage"], "flop");
    handle.shutdown().await.expect("shutdown");

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(TABLE_FILE)).expect("snapshot"))
            .expect("snapshot json");
    assert_eq!(saved["stage"], "flop");
    assert_eq!(saved["deck"].as_array().map(Vec::len), Some(52 - 10 - 4));

    let handle = WebServer::new(ServerConfig::for_tests(dir.path()))
        .expect("server")
        .start()
        .await
        .expect("restart");
    let base = format!("http://{}", handle.address());
    let (status, restored) = call(&client, hyper::Method::GET, format!("{base}/table"), None).await;
    assert_eq!(status, hyper::StatusCode::OK);
    assert_eq!(restored, flop);

    let (status, turn) = call(
        &client,
        hyper::Method::POST,
        format!("{base}/table/action"),
        Some(json!({ "action": "check" })),
    )
    .await;
    assert_eq!(status, hyper::StatusCode::OK);
    assert_eq!(turn["stage"], "turn");
    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn corrupt_snapshot_starts_an_idle_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join(TABLE_FILE), "{ truncated").expect("write");

    let handle = WebServer::new(ServerConfig::for_tests(dir.path()))
        .expect("server")
        .start()
        .await
        .expect("start");
    let client = HyperClient::new();
    let (status, table) = call(
        &client,
        hyper::Method::GET,
        format!("http://{}/table", handle.address()),
        None,
    )
    .await;
    assert_eq!(status, hyper::StatusCode::OK);
    assert_eq!(table["stage"], "idle");

    let rewritten = fs::read_to_string(dir.path().join(TABLE_FILE)).expect("snapshot");
    assert!(rewritten.contains("\"idle\""));
    handle.shutdown().await.expect("shutdown");
}
