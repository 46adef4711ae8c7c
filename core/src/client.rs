//! Stateless HTTP request builder and response parser for the feeds API.
//!
//! # Design
//! `FeedsClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; `Api` glues the two together around a
//! `Transport`.
//!
//! Every parser applies the same status policy: anything outside 200-299 is
//! `ApiError::Network`, with the status and body thrown away.

use std::fmt::Display;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Channel, Item};

/// Characters escaped inside a single path segment (RFC 3986 `pchar`
/// complement).
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Synchronous, stateless client for the feeds API.
#[derive(Debug, Clone)]
pub struct FeedsClient {
    base_url: String,
}

impl FeedsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_fetch_channels(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/channels".to_string())
    }

    pub fn build_fetch_channel_items(&self, channel_id: impl Display) -> HttpRequest {
        let path = format!("/api/channels/{}/items", segment(channel_id));
        self.request(HttpMethod::Get, path)
    }

    pub fn build_add_channel<P: Serialize + ?Sized>(
        &self,
        channel: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/api/channels".to_string(), channel)
    }

    pub fn build_delete_channel(&self, channel_id: impl Display) -> HttpRequest {
        let path = format!("/api/channels/{}", segment(channel_id));
        self.request(HttpMethod::Delete, path)
    }

    pub fn build_delete_item(&self, item_id: impl Display) -> HttpRequest {
        let path = format!("/api/items/{}", segment(item_id));
        self.request(HttpMethod::Delete, path)
    }

    pub fn build_update_channel<P: Serialize + ?Sized>(
        &self,
        channel_id: impl Display,
        channel: &P,
    ) -> Result<HttpRequest, ApiError> {
        let path = format!("/api/channels/{}", segment(channel_id));
        self.json_request(HttpMethod::Put, path, channel)
    }

    pub fn build_update_item<P: Serialize + ?Sized>(
        &self,
        item_id: impl Display,
        item: &P,
    ) -> Result<HttpRequest, ApiError> {
        let path = format!("/api/items/{}", segment(item_id));
        self.json_request(HttpMethod::Patch, path, item)
    }

    pub fn build_remove_item_from_channel(
        &self,
        channel_id: impl Display,
        item_id: impl Display,
    ) -> HttpRequest {
        let path = format!(
            "/api/channels/{}/items/{}",
            segment(channel_id),
            segment(item_id)
        );
        self.request(HttpMethod::Delete, path)
    }

    pub fn parse_fetch_channels(&self, response: HttpResponse) -> Result<Vec<Channel>, ApiError> {
        parse_json(response)
    }

    pub fn parse_fetch_channel_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        parse_json(response)
    }

    pub fn parse_add_channel(&self, response: HttpResponse) -> Result<Channel, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_channel(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_update_channel(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_remove_item_from_channel(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<P: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: String,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(ApiError::Encode)?;
        let mut request = self.request(method, path);
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }
}

fn segment(id: impl Display) -> String {
    utf8_percent_encode(&id.to_string(), PATH_SEGMENT).to_string()
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "feeds api returned non-success status");
    Err(ApiError::Network)
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(ApiError::Decode)
}
