#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use guardbot_console::actions::{ActionTag, Command, Confirm};
use guardbot_console::admin_client::{
    ActionReceipt, Admin, AdminApi, Channel, DetectionReport, Keyword, StatsSnapshot,
};
use guardbot_console::view::{ActionControl, Section};
use guardbot_console::{DataSyncController, NotificationCenter, PanelError, SharedView, ViewState};

pub const REFRESH: Duration = Duration::from_millis(30_000);
pub const LIFETIME: Duration = Duration::from_millis(5_000);

/// One scripted reply: an optional delay, then data or an HTTP status.
#[derive(Clone)]
pub struct Step<T> {
    pub delay: Duration,
    pub result: Result<T, u16>,
}

impl<T> Step<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(value),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(code),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Queue of replies; the fallback answers once the queue runs dry.
pub struct Script<T> {
    queue: Mutex<VecDeque<Step<T>>>,
    fallback: Mutex<Step<T>>,
    calls: Mutex<usize>,
}

impl<T: Clone> Script<T> {
    fn new(fallback: Step<T>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(fallback),
            calls: Mutex::new(0),
        }
    }

    pub fn push(&self, step: Step<T>) {
        self.queue.lock().unwrap().push_back(step);
    }

    pub fn set(&self, step: Step<T>) {
        *self.fallback.lock().unwrap() = step;
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    async fn reply(&self, path: &str) -> Result<T, PanelError> {
        *self.calls.lock().unwrap() += 1;
        let step = {
            let next = self.queue.lock().unwrap().pop_front();
            next.unwrap_or_else(|| self.fallback.lock().unwrap().clone())
        };
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        step.result.map_err(|status| PanelError::Api {
            path: path.to_string(),
            status,
            message: None,
        })
    }
}

pub struct ScriptedApi {
    pub stats: Script<StatsSnapshot>,
    pub channels: Script<Vec<Channel>>,
    pub admins: Script<Vec<Admin>>,
    pub keywords: Script<Vec<Keyword>>,
    pub health: Script<()>,
    pub detection: Script<DetectionReport>,
    pub bot: Script<ActionReceipt>,
    pub exports: Script<Value>,
    pub health_export: Script<Value>,
    pub exported: Mutex<Vec<Section>>,
    pub executed: Mutex<Vec<Command>>,
    pub execute_results: Mutex<VecDeque<Result<ActionReceipt, (u16, Option<String>)>>>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            stats: Script::new(Step::ok(StatsSnapshot::default())),
            channels: Script::new(Step::ok(Vec::new())),
            admins: Script::new(Step::ok(Vec::new())),
            keywords: Script::new(Step::ok(Vec::new())),
            health: Script::new(Step::ok(())),
            detection: Script::new(Step::ok(DetectionReport::default())),
            bot: Script::new(Step::ok(ActionReceipt::default())),
            exports: Script::new(Step::ok(Value::Array(Vec::new()))),
            health_export: Script::new(Step::ok(Value::Null)),
            exported: Mutex::new(Vec::new()),
            executed: Mutex::new(Vec::new()),
            execute_results: Mutex::new(VecDeque::new()),
        }
    }
}

impl ScriptedApi {
    pub fn executed(&self) -> Vec<Command> {
        self.executed.lock().unwrap().clone()
    }

    pub fn reject_next_action(&self, status: u16, message: Option<&str>) {
        self.execute_results
            .lock()
            .unwrap()
            .push_back(Err((status, message.map(str::to_string))));
    }
}

#[async_trait]
impl AdminApi for ScriptedApi {
    async fn stats(&self) -> Result<StatsSnapshot, PanelError> {
        self.stats.reply("/api/stats").await
    }

    async fn channels(&self) -> Result<Vec<Channel>, PanelError> {
        self.channels.reply("/api/channels").await
    }

    async fn admins(&self) -> Result<Vec<Admin>, PanelError> {
        self.admins.reply("/api/admins").await
    }

    async fn keywords(&self) -> Result<Vec<Keyword>, PanelError> {
        self.keywords.reply("/api/keywords").await
    }

    async fn execute(&self, command: &Command) -> Result<ActionReceipt, PanelError> {
        self.executed.lock().unwrap().push(command.clone());
        let next = self.execute_results.lock().unwrap().pop_front();
        match next {
            None => Ok(ActionReceipt::default()),
            Some(Ok(receipt)) => Ok(receipt),
            Some(Err((status, message))) => Err(PanelError::Api {
                path: command.path(),
                status,
                message,
            }),
        }
    }

    async fn health(&self) -> Result<(), PanelError> {
        self.health.reply("/health").await
    }

    async fn test_detection(&self, _text: &str) -> Result<DetectionReport, PanelError> {
        self.detection.reply("/api/test-ai").await
    }

    async fn test_bot(&self) -> Result<ActionReceipt, PanelError> {
        self.bot.reply("/api/test-bot").await
    }

    async fn export(&self, section: Section) -> Result<Value, PanelError> {
        self.exported.lock().unwrap().push(section);
        self.exports.reply(&format!("/api/export/{section}")).await
    }

    async fn export_health(&self) -> Result<Value, PanelError> {
        self.health_export.reply("/api/health/export").await
    }
}

/// Answers every prompt the same way and remembers what was asked.
pub struct FixedConfirm {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl FixedConfirm {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for FixedConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

pub struct Harness {
    pub api: Arc<ScriptedApi>,
    pub view: SharedView,
    pub controller: DataSyncController,
}

pub fn harness(api: ScriptedApi) -> Harness {
    let api = Arc::new(api);
    let view = SharedView::new(ViewState::with_refresh_control());
    let notifications = NotificationCenter::new(view.clone(), LIFETIME);
    let controller = DataSyncController::new(api.clone(), view.clone(), notifications, REFRESH);
    Harness {
        api,
        view,
        controller,
    }
}

pub fn channel(id: &str, name: &str, active: bool) -> Channel {
    Channel {
        channel_id: id.to_string(),
        channel_name: Some(name.to_string()),
        channel_username: None,
        member_count: Some(100),
        is_active: active,
        added_at: Some("2024-01-15T10:30:00".to_string()),
    }
}

pub fn admin(id: i64, name: &str) -> Admin {
    Admin {
        user_id: id,
        first_name: Some(name.to_string()),
        username: None,
        is_active: true,
        added_at: None,
    }
}

pub fn keyword(word: &str) -> Keyword {
    Keyword {
        keyword: word.to_string(),
        detection_count: Some(0),
        is_active: true,
        added_at: None,
    }
}

pub fn control(tag: ActionTag, id: &str) -> ActionControl {
    ActionControl {
        tag,
        id: id.to_string(),
    }
}

pub fn notification_messages(view: &SharedView) -> Vec<String> {
    view.read(|view| view.notifications.iter().map(|n| n.message.clone()).collect())
}
