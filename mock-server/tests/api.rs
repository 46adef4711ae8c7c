use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Db};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn object(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().unwrap()
}

// --- channels ---

#[tokio::test]
async fn list_channels_empty() {
    let resp = app().oneshot(empty_request("GET", "/api/channels")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn add_channel_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/api/channels", r#"{"name":"Foo"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await, json!({"id": 1, "name": "Foo"}));
}

#[tokio::test]
async fn add_channel_rejects_non_object_body() {
    let resp = app()
        .oneshot(json_request("POST", "/api/channels", "[1,2]"))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn delete_unknown_channel_is_404() {
    let resp = app().oneshot(empty_request("DELETE", "/api/channels/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_is_400() {
    let resp = app().oneshot(empty_request("DELETE", "/api/items/abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_channel_replaces_fields() {
    let db = Db::default();
    let id = db.write().await.insert_channel(object(json!({"name": "Old", "tag": "x"})));

    let resp = app_with(db.clone())
        .oneshot(json_request("PUT", &format!("/api/channels/{id}"), r#"{"name":"New"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(db.read().await.channel_json(id).unwrap(), json!({"id": id, "name": "New"}));
}

// --- items ---

#[tokio::test]
async fn list_items_only_returns_channel_items() {
    let db = Db::default();
    let (first, second) = {
        let mut store = db.write().await;
        let first = store.insert_channel(object(json!({"name": "A"})));
        let second = store.insert_channel(object(json!({"name": "B"})));
        store.seed_item(first, object(json!({"title": "a1"})));
        store.seed_item(second, object(json!({"title": "b1"})));
        (first, second)
    };

    let resp = app_with(db)
        .oneshot(empty_request("GET", &format!("/api/channels/{first}/items")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items = body_json(resp).await;
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["channelId"], json!(first));
    assert_ne!(items[0]["channelId"], json!(second));
    assert_eq!(items[0]["title"], "a1");
}

#[tokio::test]
async fn list_items_of_unknown_channel_is_404() {
    let db = Db::default();
    let id = db.write().await.insert_channel(object(json!({"name": "A"})));

    let resp = app_with(db.clone())
        .oneshot(empty_request("GET", &format!("/api/channels/{id}/items")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));

    let resp = app_with(db)
        .oneshot(empty_request("GET", &format!("/api/channels/{}/items", id + 1)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_channel_drops_its_items() {
    let db = Db::default();
    let id = {
        let mut store = db.write().await;
        let id = store.insert_channel(object(json!({"name": "A"})));
        store.seed_item(id, object(json!({"title": "a1"})));
        id
    };

    let resp = app_with(db.clone())
        .oneshot(empty_request("DELETE", &format!("/api/channels/{id}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
    assert_eq!(db.read().await.item_count(), 0);
}

#[tokio::test]
async fn remove_item_requires_matching_channel() {
    let db = Db::default();
    let (channel, item) = {
        let mut store = db.write().await;
        let channel = store.insert_channel(object(json!({"name": "A"})));
        let item = store.seed_item(channel, object(json!({"title": "a1"})));
        (channel, item)
    };

    let resp = app_with(db.clone())
        .oneshot(empty_request("DELETE", &format!("/api/channels/{}/items/{item}", channel + 100)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app_with(db.clone())
        .oneshot(empty_request("DELETE", &format!("/api/channels/{channel}/items/{item}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(db.read().await.item_count(), 0);
}

#[tokio::test]
async fn patch_item_merges_fields() {
    let db = Db::default();
    let (channel, item) = {
        let mut store = db.write().await;
        let channel = store.insert_channel(object(json!({"name": "A"})));
        let item = store.seed_item(channel, object(json!({"title": "a1", "read": false})));
        (channel, item)
    };

    let resp = app_with(db.clone())
        .oneshot(json_request("PATCH", &format!("/api/items/{item}"), r#"{"read":true}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app_with(db)
        .oneshot(empty_request("GET", &format!("/api/channels/{channel}/items")))
        .await
        .unwrap();
    assert_eq!(
        body_json(resp).await,
        json!([{"id": item, "channelId": channel, "title": "a1", "read": true}])
    );
}

#[tokio::test]
async fn delete_unknown_item_is_404() {
    let resp = app().oneshot(empty_request("DELETE", "/api/items/7")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn channel_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/channels", r#"{"title":"Rust Blog"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["id"].as_i64().unwrap();

    // list — contains the new channel
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/channels"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([created]));

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/channels/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // delete again — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/channels/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/channels"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await, json!([]));
}
