use serde::{Deserialize, Serialize};

/// Result of running the service's copyright detection against sample text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub would_filter: bool,
}

impl DetectionReport {
    /// One-line summary suitable for a notification.
    pub fn summary(&self) -> String {
        let verdict = if self.would_filter {
            "would be filtered"
        } else {
            "would pass"
        };
        if self.keywords.is_empty() {
            format!("Message {verdict} (score {:.2})", self.score)
        } else {
            format!(
                "Message {verdict} (score {:.2}, keywords: {})",
                self.score,
                self.keywords.join(", ")
            )
        }
    }
}
