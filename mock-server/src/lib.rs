//! In-memory stand-in for the feeds backend's `/api` surface.
//!
//! Ids are integers handed out in creation order. Channel and item bodies are
//! free-form JSON objects; the server only owns `id` (and `channelId` on
//! items). Mutations answer `204 No Content`, creating a channel answers
//! `201 Created` with the stored channel.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

type Fields = Map<String, Value>;

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    channels: BTreeMap<i64, Fields>,
    items: BTreeMap<i64, (i64, Fields)>,
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn insert_channel(&mut self, mut fields: Fields) -> i64 {
        let id = self.allocate_id();
        fields.remove("id");
        self.channels.insert(id, fields);
        id
    }

    /// Items are produced by feed collection, not through the API, so tests
    /// seed them directly.
    pub fn seed_item(&mut self, channel_id: i64, mut fields: Fields) -> i64 {
        let id = self.allocate_id();
        fields.remove("id");
        fields.remove("channelId");
        self.items.insert(id, (channel_id, fields));
        id
    }

    pub fn channel_json(&self, id: i64) -> Option<Value> {
        self.channels.get(&id).map(|fields| channel_json(id, fields))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

fn channel_json(id: i64, fields: &Fields) -> Value {
    let mut out = Fields::new();
    out.insert("id".to_string(), Value::from(id));
    out.extend(fields.clone());
    Value::Object(out)
}

fn item_json(id: i64, channel_id: i64, fields: &Fields) -> Value {
    let mut out = Fields::new();
    out.insert("id".to_string(), Value::from(id));
    out.insert("channelId".to_string(), Value::from(channel_id));
    out.extend(fields.clone());
    Value::Object(out)
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    let api = Router::new()
        .route("/channels", get(list_channels).post(add_channel))
        .route("/channels/{id}", put(update_channel).delete(delete_channel))
        .route("/channels/{id}/items", get(list_items))
        .route(
            "/channels/{channel_id}/items/{item_id}",
            delete(remove_item_from_channel),
        )
        .route("/items/{id}", delete(delete_item).patch(update_item));
    Router::new().nest("/api", api).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Db::default()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn list_channels(State(db): State<Db>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(
        store
            .channels
            .iter()
            .map(|(id, fields)| channel_json(*id, fields))
            .collect(),
    )
}

async fn add_channel(
    State(db): State<Db>,
    Json(input): Json<Fields>,
) -> (StatusCode, Json<Value>) {
    let mut store = db.write().await;
    let id = store.insert_channel(input);
    debug!(id, "channel created");
    let created = channel_json(id, &store.channels[&id]);
    (StatusCode::CREATED, Json(created))
}

async fn update_channel(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(mut input): Json<Fields>,
) -> StatusCode {
    let mut store = db.write().await;
    match store.channels.get_mut(&id) {
        Some(fields) => {
            input.remove("id");
            *fields = input;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_channel(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    if store.channels.remove(&id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    store.items.retain(|_, (channel_id, _)| *channel_id != id);
    debug!(id, "channel deleted");
    StatusCode::NO_CONTENT
}

async fn list_items(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let store = db.read().await;
    if !store.channels.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(
        store
            .items
            .iter()
            .filter(|(_, (channel_id, _))| *channel_id == id)
            .map(|(item_id, (channel_id, fields))| item_json(*item_id, *channel_id, fields))
            .collect(),
    ))
}

async fn remove_item_from_channel(
    State(db): State<Db>,
    Path((channel_id, item_id)): Path<(i64, i64)>,
) -> StatusCode {
    let mut store = db.write().await;
    let owned = matches!(store.items.get(&item_id), Some((owner, _)) if *owner == channel_id);
    if !owned {
        return StatusCode::NOT_FOUND;
    }
    store.items.remove(&item_id);
    StatusCode::NO_CONTENT
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<Fields>,
) -> StatusCode {
    let mut store = db.write().await;
    let Some((_, fields)) = store.items.get_mut(&id) else {
        return StatusCode::NOT_FOUND;
    };
    for (key, value) in input {
        if key != "id" && key != "channelId" {
            fields.insert(key, value);
        }
    }
    StatusCode::NO_CONTENT
}

async fn delete_item(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    match store.items.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
