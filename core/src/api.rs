//! One-call-per-operation facade over `FeedsClient` and a `Transport`.
//!
//! Each method builds the request, executes exactly one round-trip and parses
//! the response. There is no retry, timeout or fallback: every failure goes
//! straight back to the caller.

use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use crate::client::FeedsClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{Channel, Item};

#[derive(Debug, Clone)]
pub struct Api<T = UreqTransport> {
    client: FeedsClient,
    transport: T,
}

impl Api<UreqTransport> {
    /// Api talking to `base_url` over a fresh blocking ureq agent.
    pub fn connect(base_url: &str) -> Self {
        Self::new(FeedsClient::new(base_url), UreqTransport::new())
    }
}

impl<T: Transport> Api<T> {
    pub fn new(client: FeedsClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &FeedsClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn fetch_channels(&self) -> Result<Vec<Channel>, ApiError> {
        let response = self.send(self.client.build_fetch_channels())?;
        self.client.parse_fetch_channels(response)
    }

    pub fn fetch_channel_items(&self, channel_id: impl Display) -> Result<Vec<Item>, ApiError> {
        let response = self.send(self.client.build_fetch_channel_items(channel_id))?;
        self.client.parse_fetch_channel_items(response)
    }

    pub fn add_channel<P: Serialize + ?Sized>(&self, channel: &P) -> Result<Channel, ApiError> {
        let response = self.send(self.client.build_add_channel(channel)?)?;
        self.client.parse_add_channel(response)
    }

    pub fn delete_channel(&self, channel_id: impl Display) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_channel(channel_id))?;
        self.client.parse_delete_channel(response)
    }

    pub fn delete_item(&self, item_id: impl Display) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_item(item_id))?;
        self.client.parse_delete_item(response)
    }

    pub fn update_channel<P: Serialize + ?Sized>(
        &self,
        channel_id: impl Display,
        channel: &P,
    ) -> Result<(), ApiError> {
        let response = self.send(self.client.build_update_channel(channel_id, channel)?)?;
        self.client.parse_update_channel(response)
    }

    pub fn update_item<P: Serialize + ?Sized>(
        &self,
        item_id: impl Display,
        item: &P,
    ) -> Result<(), ApiError> {
        let response = self.send(self.client.build_update_item(item_id, item)?)?;
        self.client.parse_update_item(response)
    }

    pub fn remove_item_from_channel(
        &self,
        channel_id: impl Display,
        item_id: impl Display,
    ) -> Result<(), ApiError> {
        let request = self.client.build_remove_item_from_channel(channel_id, item_id);
        let response = self.send(request)?;
        self.client.parse_remove_item_from_channel(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "feeds api request");
        self.transport.execute(request)
    }
}
