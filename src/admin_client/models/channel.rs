use serde::{Deserialize, Serialize};

use super::super::helpers::{default_active, deserialize_flexible_id};

/// A monitored channel. Identity key: `channel_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(deserialize_with = "deserialize_flexible_id")]
    pub channel_id: String,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub channel_username: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub added_at: Option<String>,
}
