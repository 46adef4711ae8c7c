//! Data-access layer and UI state for the feeds reader.
//!
//! # Overview
//! - [`FeedsClient`] builds `HttpRequest` values and parses `HttpResponse`
//!   values for each backend operation without touching the network.
//! - [`Api`] runs one build/execute/parse cycle per call over a
//!   [`Transport`]; [`UreqTransport`] is the blocking default.
//! - [`Writable`] is an observable value; [`AppState`] holds the four UI
//!   slots (channels, selected channel, items, selected item).
//! - [`Config`] reads the API origin and dev server settings from the
//!   environment.
//!
//! # Design
//! - Errors are uniform: non-2xx is [`ApiError::Network`], transport and
//!   JSON decoder errors pass through unchanged.
//! - Channel and item payloads are opaque JSON objects, kept exactly as received.
//! - State is owned by an explicitly constructed [`AppContext`], never by
//!   globals. Stores are single-threaded and every API call blocks for its
//!   single round-trip, so responses are applied in the order requests were
//!   issued.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod state;
pub mod store;
pub mod types;

pub use api::Api;
pub use client::FeedsClient;
pub use config::{ApiConfig, Config, DevServerConfig};
pub use error::{ApiError, ConfigError, NETWORK_ERROR_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use state::{AppContext, AppState};
pub use store::{Subscription, Writable};
pub use types::{Channel, Id, Item};
