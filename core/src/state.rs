//! UI state slots and the startup context that owns them.
//!
//! Nothing here is global: the embedding application builds one `AppContext`
//! at startup and hands references to whatever needs them. Tests build a
//! fresh `AppState` per case.
//!
//! The slots are independent. A selection is not required to be a member of
//! the matching list; keeping the two consistent is the caller's job.

use crate::api::Api;
use crate::config::Config;
use crate::error::ConfigError;
use crate::http::UreqTransport;
use crate::store::Writable;
use crate::types::{Channel, Item};

/// The four UI state slots, starting as `[]`, `None`, `[]`, `None`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub channels: Writable<Vec<Channel>>,
    pub selected_channel: Writable<Option<Channel>>,
    pub items: Writable<Vec<Item>>,
    pub selected_item: Writable<Option<Item>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything a UI session needs, built once.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub api: Api<UreqTransport>,
    pub state: AppState,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let api = Api::connect(&config.api.base_url());
        Self {
            config,
            api,
            state: AppState::new(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_env()?))
    }
}
