use serde::{Deserialize, Serialize};

/// Aggregate counters reported by `/api/stats`.
///
/// Replaced wholesale on every poll; never merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_admins: u64,
    #[serde(default)]
    pub total_channels: u64,
    #[serde(default)]
    pub total_keywords: u64,
    #[serde(default)]
    pub total_members: u64,
    #[serde(default)]
    pub avg_members_per_channel: f64,
}
