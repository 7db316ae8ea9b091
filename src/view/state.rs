use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::actions::ActionTag;
use crate::health::HealthState;

use super::format::{format_count, format_percent, unescape_html};

/// Numeric stat slots bound by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatSlot {
    Admins,
    Channels,
    Keywords,
    Members,
    AvgMembers,
}

impl StatSlot {
    pub const ALL: [StatSlot; 5] = [
        StatSlot::Admins,
        StatSlot::Channels,
        StatSlot::Keywords,
        StatSlot::Members,
        StatSlot::AvgMembers,
    ];

    /// Display form of `value` in this slot, shared by renders and count-up frames.
    pub fn format(self, value: u64) -> String {
        match self {
            StatSlot::Members => format_count(value),
            _ => value.to_string(),
        }
    }
}

/// Independently refreshed sections of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Stats,
    Channels,
    Admins,
    Keywords,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Stats => "stats",
            Section::Channels => "channels",
            Section::Admins => "admins",
            Section::Keywords => "keywords",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Secondary,
}

/// One rendered table cell. `content` is already escaped markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<BadgeTone>,
}

impl Cell {
    pub fn text(content: String) -> Self {
        Self {
            content,
            badge: None,
        }
    }

    pub fn badge(content: String, tone: BadgeTone) -> Self {
        Self {
            content,
            badge: Some(tone),
        }
    }
}

/// Action control embedded in a row, carrying the entity's identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionControl {
    pub tag: ActionTag,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionControl>,
    pub visible: bool,
}

impl Row {
    pub fn new(cells: Vec<Cell>, action: ActionControl) -> Self {
        Self {
            cells,
            action: Some(action),
            visible: true,
        }
    }

    /// Full visible text of the row, as a reader would see it.
    pub fn text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| unescape_html(&cell.content))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn badge_text(&self) -> Option<String> {
        self.cells
            .iter()
            .find(|cell| cell.badge.is_some())
            .map(|cell| unescape_html(&cell.content))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressBar {
    pub percent: f64,
}

impl ProgressBar {
    pub fn width(&self) -> String {
        format_percent(self.percent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient message stacked at the top of the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthBadge {
    pub state: HealthState,
    pub icon: &'static str,
    pub message: &'static str,
}

impl HealthBadge {
    pub fn for_state(state: HealthState) -> Self {
        match state {
            HealthState::Healthy => Self {
                state,
                icon: "check-circle",
                message: "Bot is running",
            },
            HealthState::Unhealthy => Self {
                state,
                icon: "exclamation-triangle",
                message: "Bot is not responding",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub disabled: bool,
}

/// Complete rendering surface of the admin dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    pub stats: BTreeMap<StatSlot, String>,
    pub channel_progress: Option<ProgressBar>,
    pub keyword_progress: Option<ProgressBar>,
    pub channels: Vec<Row>,
    pub admins: Vec<Row>,
    pub keywords: Vec<Row>,
    /// Newest first.
    pub notifications: Vec<Notification>,
    /// `None` until the first health check completes.
    pub health: Option<HealthBadge>,
    pub refresh_control: Option<ControlState>,
    pub auto_refresh: bool,
    pub search_term: String,
    #[serde(skip)]
    rendered: HashMap<Section, u64>,
}

impl ViewState {
    /// A surface that includes a refresh control.
    pub fn with_refresh_control() -> Self {
        Self {
            refresh_control: Some(ControlState::default()),
            ..Self::default()
        }
    }

    pub fn stat(&self, slot: StatSlot) -> Option<&str> {
        self.stats.get(&slot).map(String::as_str)
    }

    pub fn tables_mut(&mut self) -> [&mut Vec<Row>; 3] {
        [&mut self.channels, &mut self.admins, &mut self.keywords]
    }

    /// Generation that last rendered `section`, zero if never rendered.
    pub fn rendered_generation(&self, section: Section) -> u64 {
        self.rendered.get(&section).copied().unwrap_or(0)
    }

    /// Claim `section` for `generation`; refuses results older than the
    /// generation already on screen.
    pub fn claim(&mut self, section: Section, generation: u64) -> bool {
        if generation < self.rendered_generation(section) {
            return false;
        }
        self.rendered.insert(section, generation);
        true
    }

    pub fn refresh_disabled(&self) -> bool {
        self.refresh_control.map(|c| c.disabled).unwrap_or(false)
    }

    pub fn set_refresh_disabled(&mut self, disabled: bool) {
        if let Some(control) = self.refresh_control.as_mut() {
            control.disabled = disabled;
        }
    }
}

/// Shared handle to the rendering surface.
///
/// Every mutation is a short synchronous critical section; the lock is never
/// held across an `.await`.
#[derive(Clone, Default)]
pub struct SharedView {
    inner: Arc<Mutex<ViewState>>,
}

impl SharedView {
    pub fn new(state: ViewState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn snapshot(&self) -> ViewState {
        self.read(ViewState::clone)
    }
}
