use serde::{Deserialize, Serialize};

use super::super::helpers::{default_active, deserialize_user_id};

/// A bot administrator. Identity key: `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(deserialize_with = "deserialize_user_id")]
    pub user_id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub added_at: Option<String>,
}
