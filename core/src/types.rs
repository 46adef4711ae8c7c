//! Domain DTOs for the feeds API.
//!
//! # Design
//! The backend's payload shape is not part of the client contract. Channels
//! and items are JSON objects kept whole: every field, `id` and `channelId`
//! included, is written back exactly as received, so the client neither
//! requires nor drops fields it does not know about. `id()` and
//! `channel_id()` read the well-known fields when they are present.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a channel or an item.
///
/// The backend hands out integers, but the client does not depend on that:
/// strings are accepted as well and both render to their plain text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl Id {
    /// `None` for anything that is neither an integer nor a string.
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Id::Int),
            Value::String(s) => Some(Id::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{n}"),
            Id::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Int(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Str(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::Str(s)
    }
}

/// A subscribed feed source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Channel(Map<String, Value>);

impl Channel {
    /// The `id` field, if the server sent one that is an integer or a string.
    pub fn id(&self) -> Option<Id> {
        self.0.get("id").and_then(Id::from_json)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Channel {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// A single entry belonging to one channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    pub fn id(&self) -> Option<Id> {
        self.0.get("id").and_then(Id::from_json)
    }

    /// Parent channel named by `channelId`. A `null` or missing
    /// `channelId` both read as `None`; the raw field is still kept.
    pub fn channel_id(&self) -> Option<Id> {
        self.0.get("channelId").and_then(Id::from_json)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
