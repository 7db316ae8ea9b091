use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::Command;
use crate::types::PanelError;
use crate::view::Section;

use super::models::{Admin, Channel, DetectionReport, Keyword, StatsSnapshot};

/// Transport seam between the console and the remote admin service.
///
/// Every method is one independent request; callers decide how failures
/// affect the view.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /api/stats`
    async fn stats(&self) -> Result<StatsSnapshot, PanelError>;

    /// `GET /api/channels`
    async fn channels(&self) -> Result<Vec<Channel>, PanelError>;

    /// `GET /api/admins`
    async fn admins(&self) -> Result<Vec<Admin>, PanelError>;

    /// `GET /api/keywords`
    async fn keywords(&self) -> Result<Vec<Keyword>, PanelError>;

    /// `POST /api/{action}` for a mutating command.
    async fn execute(&self, command: &Command) -> Result<ActionReceipt, PanelError>;

    /// `GET /health`; any 2xx is healthy.
    async fn health(&self) -> Result<(), PanelError>;

    /// `POST /api/test-ai`
    async fn test_detection(&self, text: &str) -> Result<DetectionReport, PanelError>;

    /// `POST /api/test-bot`; checks the bot itself is reachable.
    async fn test_bot(&self) -> Result<ActionReceipt, PanelError>;

    /// `GET /api/export/{section}`. Only the three tables can be exported.
    async fn export(&self, section: Section) -> Result<Value, PanelError>;

    /// `GET /api/health/export`
    async fn export_health(&self) -> Result<Value, PanelError>;
}

/// Body returned by a successful mutating request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub(super) struct DetectionRequest<'a> {
    pub text: &'a str,
}
