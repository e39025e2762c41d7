use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Classification an interaction matched when it was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Category {
    Interaction,
    Conversion,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Interaction => "interaction",
            Category::Conversion => "conversion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer coordinates. Zero for events without pointer data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One captured interaction. Never mutated once it is in the buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub category: Category,
    pub event_name: String,
    pub target_tag: String,
    pub target_classes: String,
    pub target_id: String,
    pub text_content: String,
    pub selector: String,
    pub client_position: Point,
    pub screen_position: Point,
    pub timestamp: DateTime<Utc>,
}

/// Window metrics at one point of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSnapshot {
    /// User agent application version string.
    pub name: String,
    pub inner_width: u32,
    pub inner_height: u32,
    pub outer_width: u32,
    pub outer_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub language: String,
    pub platform: String,
    pub client_start: ClientSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_end: Option<ClientSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInfo {
    /// Path component of the page URL.
    pub location: String,
    pub href: String,
    pub origin: String,
    pub port: String,
    pub title: String,
}

/// The per-page session summary delivered to the endpoint.
///
/// `end_time`, `environment.client_end` and `interactions` stay unset until the
/// session is closed; `storage_snapshot` is only ever set at close and only
/// when storage capture is enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptor {
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub environment: Environment,
    pub page: PageInfo,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<InteractionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_snapshot: Option<BTreeMap<String, String>>,
}

impl SessionDescriptor {
    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }
}
