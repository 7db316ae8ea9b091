use serde::{Deserialize, Serialize};

use super::super::helpers::default_active;

/// A filtered keyword. The keyword text is its own identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    #[serde(default)]
    pub detection_count: Option<u64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub added_at: Option<String>,
}
