use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, info, warn};

use crate::admin_client::{ActionReceipt, DetectionReport};
use crate::sync::{CycleReport, DataSyncController};
use crate::types::PanelError;
use crate::view::ActionControl;

use super::command::{ActionTag, AdminId, ChannelId, Command};
use super::export::{write_export, ExportTarget};

/// Blocking yes/no prompt shown before a destructive command is sent.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Builds a typed command from the raw identifier carried by a control.
pub type CommandBuilder = fn(&str) -> Result<Command, PanelError>;

/// Explicit mapping from action tags to the commands they produce.
pub struct CommandRegistry {
    handlers: HashMap<ActionTag, CommandBuilder>,
}

impl CommandRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, tag: ActionTag, builder: CommandBuilder) -> &mut Self {
        self.handlers.insert(tag, builder);
        self
    }

    pub fn resolve(&self, control: &ActionControl) -> Result<Command, PanelError> {
        let builder = self.handlers.get(&control.tag).ok_or_else(|| {
            PanelError::InvalidCommand(format!("no handler registered for `{}`", control.tag))
        })?;
        builder(&control.id)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(ActionTag::RemoveChannel, remove_channel)
            .register(ActionTag::RemoveAdmin, remove_admin)
            .register(ActionTag::RemoveKeyword, remove_keyword);
        registry
    }
}

fn remove_channel(id: &str) -> Result<Command, PanelError> {
    Ok(Command::RemoveChannel(ChannelId(id.to_string())))
}

fn remove_admin(id: &str) -> Result<Command, PanelError> {
    Ok(Command::RemoveAdmin(id.parse::<AdminId>()?))
}

fn remove_keyword(id: &str) -> Result<Command, PanelError> {
    Ok(Command::RemoveKeyword(id.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The user declined the confirmation prompt; nothing was sent.
    Declined,
    /// The service accepted the command and the view was resynced.
    Completed(CycleReport),
    Failed(String),
}

/// Confirmation-gated pipeline for mutating commands.
pub struct ActionDispatcher {
    controller: DataSyncController,
    registry: CommandRegistry,
    confirm: Arc<dyn Confirm>,
    export_dir: PathBuf,
}

impl ActionDispatcher {
    pub fn new(controller: DataSyncController, confirm: Arc<dyn Confirm>) -> Self {
        Self::with_registry(controller, confirm, CommandRegistry::default())
    }

    pub fn with_registry(
        controller: DataSyncController,
        confirm: Arc<dyn Confirm>,
        registry: CommandRegistry,
    ) -> Self {
        Self {
            controller,
            registry,
            confirm,
            export_dir: PathBuf::from("."),
        }
    }

    /// Directory exports are saved into; defaults to the working directory.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Handle a click on a row's action control.
    pub async fn dispatch(&self, control: &ActionControl) -> DispatchOutcome {
        match self.registry.resolve(control) {
            Ok(command) => self.submit(command).await,
            Err(err) => self.fail(&control.tag.to_string(), err),
        }
    }

    /// Send a command, asking for confirmation first when it is destructive.
    pub async fn submit(&self, command: Command) -> DispatchOutcome {
        if let Some(tag) = command.tag() {
            let prompt = format!("Are you sure you want to {}?", tag.describe());
            if !self.confirm.confirm(&prompt).await {
                debug!(action = %tag, "Action declined");
                return DispatchOutcome::Declined;
            }
        }

        match self.controller.api().execute(&command).await {
            Ok(receipt) => {
                info!(action = command.endpoint(), "Action accepted");
                let report = self.controller.load_all().await;
                let message = receipt
                    .message
                    .unwrap_or_else(|| "Action completed successfully".to_string());
                self.controller.notifications().success(message);
                DispatchOutcome::Completed(report)
            }
            Err(err) => self.fail(command.endpoint(), err),
        }
    }

    /// Run the service's detection against `text` and report the verdict.
    pub async fn test_detection(&self, text: &str) -> Result<DetectionReport, PanelError> {
        let text = text.trim();
        if text.is_empty() {
            let err = PanelError::InvalidCommand("Text required for testing".to_string());
            self.controller.notifications().error(format!("Error: {err}"));
            return Err(err);
        }

        match self.controller.api().test_detection(text).await {
            Ok(report) => {
                self.controller.notifications().info(report.summary());
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "Detection test failed");
                self.controller.notifications().error(format!("Error: {err}"));
                Err(err)
            }
        }
    }

    /// Ask the service whether the bot itself is reachable.
    pub async fn test_bot(&self) -> Result<ActionReceipt, PanelError> {
        match self.controller.api().test_bot().await {
            Ok(receipt) => {
                let message = receipt
                    .message
                    .clone()
                    .unwrap_or_else(|| "Bot connection test passed".to_string());
                self.controller.notifications().success(message);
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "Bot test failed");
                self.controller.notifications().error(format!("Error: {err}"));
                Err(err)
            }
        }
    }

    /// Download an export and save it under the export directory.
    pub async fn export(&self, target: ExportTarget) -> Result<PathBuf, PanelError> {
        let api = self.controller.api();
        let payload = match target {
            ExportTarget::Table(section) => api.export(section).await,
            ExportTarget::Health => api.export_health().await,
        };
        let saved = match payload {
            Ok(payload) => {
                let file_name = target.file_name(Local::now());
                write_export(&self.export_dir, &file_name, &payload).await
            }
            Err(err) => Err(err),
        };

        match saved {
            Ok(path) => {
                info!(%target, path = %path.display(), "Export saved");
                self.controller
                    .notifications()
                    .success(format!("Exported {target} to {}", path.display()));
                Ok(path)
            }
            Err(err) => {
                warn!(%target, error = %err, "Export failed");
                self.controller.notifications().error(format!("Error: {err}"));
                Err(err)
            }
        }
    }

    fn fail(&self, action: &str, err: PanelError) -> DispatchOutcome {
        warn!(action, error = %err, "Action failed");
        let message = err.to_string();
        self.controller
            .notifications()
            .error(format!("Error: {message}"));
        DispatchOutcome::Failed(message)
    }
}
