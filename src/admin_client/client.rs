use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::actions::Command;
use crate::config::Config;
use crate::types::PanelError;
use crate::view::Section;

use super::api::{ActionReceipt, AdminApi, DetectionRequest};
use super::helpers::{extract_error_message, join_url};
use super::models::{Admin, Channel, DetectionReport, Keyword, StatsSnapshot};

/// HTTP client for the admin service's JSON API.
#[derive(Clone)]
pub struct AdminClient {
    http: Client,
    base_url: String,
}

impl AdminClient {
    /// Prepare an HTTP client pointed at the configured service.
    pub fn new(config: &Config) -> Result<Self, PanelError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(PanelError::Http)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, PanelError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(join_url(&self.base_url, path))
            .send()
            .await
            .map_err(PanelError::Http)?;

        let response = ensure_success(path, response).await?;
        response.json::<T>().await.map_err(PanelError::Http)
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> Result<Response, PanelError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(join_url(&self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(PanelError::Http)?;

        ensure_success(path, response).await
    }
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn stats(&self) -> Result<StatsSnapshot, PanelError> {
        self.get_json("/api/stats").await
    }

    async fn channels(&self) -> Result<Vec<Channel>, PanelError> {
        self.get_json("/api/channels").await
    }

    async fn admins(&self) -> Result<Vec<Admin>, PanelError> {
        self.get_json("/api/admins").await
    }

    async fn keywords(&self) -> Result<Vec<Keyword>, PanelError> {
        self.get_json("/api/keywords").await
    }

    async fn execute(&self, command: &Command) -> Result<ActionReceipt, PanelError> {
        let path = command.path();
        let response = self.post_json(&path, &command.body()).await?;
        read_receipt(response).await
    }

    async fn health(&self) -> Result<(), PanelError> {
        let response = self
            .http
            .get(join_url(&self.base_url, "/health"))
            .send()
            .await
            .map_err(PanelError::Http)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(PanelError::Api {
                path: "/health".to_string(),
                status: status.as_u16(),
                message: None,
            })
        }
    }

    async fn test_detection(&self, text: &str) -> Result<DetectionReport, PanelError> {
        let response = self
            .post_json("/api/test-ai", &DetectionRequest { text })
            .await?;
        response.json().await.map_err(PanelError::Http)
    }

    async fn test_bot(&self) -> Result<ActionReceipt, PanelError> {
        let response = self.post_json("/api/test-bot", &json!({})).await?;
        read_receipt(response).await
    }

    async fn export(&self, section: Section) -> Result<Value, PanelError> {
        if section == Section::Stats {
            return Err(PanelError::InvalidCommand(
                "stats cannot be exported".to_string(),
            ));
        }
        self.get_json(&format!("/api/export/{section}")).await
    }

    async fn export_health(&self) -> Result<Value, PanelError> {
        self.get_json("/api/health/export").await
    }
}

async fn read_receipt(response: Response) -> Result<ActionReceipt, PanelError> {
    let text = response.text().await.map_err(PanelError::Http)?;
    // Success bodies are informational; tolerate anything the service sends.
    Ok(serde_json::from_str(&text).unwrap_or_default())
}

async fn ensure_success(path: &str, response: Response) -> Result<Response, PanelError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(path, status = status.as_u16(), "Request rejected by service");
    Err(PanelError::Api {
        path: path.to_string(),
        status: status.as_u16(),
        message: extract_error_message(&body),
    })
}
