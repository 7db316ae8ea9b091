use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::admin_client::{Admin, AdminApi, Channel, Keyword, StatsSnapshot};
use crate::types::PanelError;
use crate::view::format::{progress_percent, round_average};
use crate::view::table::{admin_rows, channel_rows, keyword_rows};
use crate::view::{NotificationCenter, ProgressBar, Section, SharedView, StatSlot, ViewState};

use super::counter::CounterAnimation;
use super::search;

pub const CHANNEL_PROGRESS_MAX: u64 = 100;
pub const KEYWORD_PROGRESS_MAX: u64 = 50;

/// What happened to each section during one poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub generation: u64,
    pub rendered: Vec<Section>,
    pub failed: Vec<Section>,
    /// Fetched successfully but superseded by a newer cycle.
    pub discarded: Vec<Section>,
}

impl CycleReport {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn all_failed(&self) -> bool {
        self.rendered.is_empty() && self.discarded.is_empty() && !self.failed.is_empty()
    }

    fn record(&mut self, section: Section, outcome: SectionOutcome) {
        match outcome {
            SectionOutcome::Rendered => self.rendered.push(section),
            SectionOutcome::Discarded => self.discarded.push(section),
            SectionOutcome::Failed => self.failed.push(section),
        }
    }
}

enum SectionOutcome {
    Rendered,
    Discarded,
    Failed,
}

/// Owns the polling cadence and feeds every fetched collection into the view.
///
/// Cheap to clone; clones share timers, generation counter and view.
#[derive(Clone)]
pub struct DataSyncController {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn AdminApi>,
    view: SharedView,
    notifications: NotificationCenter,
    refresh_interval: Duration,
    generation: AtomicU64,
    auto_refresh: Mutex<Option<JoinHandle<()>>>,
    animation: Mutex<Option<JoinHandle<()>>>,
}

impl DataSyncController {
    pub fn new(
        api: Arc<dyn AdminApi>,
        view: SharedView,
        notifications: NotificationCenter,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                view,
                notifications,
                refresh_interval,
                generation: AtomicU64::new(0),
                auto_refresh: Mutex::new(None),
                animation: Mutex::new(None),
            }),
        }
    }

    pub fn api(&self) -> &Arc<dyn AdminApi> {
        &self.inner.api
    }

    pub fn view(&self) -> &SharedView {
        &self.inner.view
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    /// Initial load, counter animation, then the auto-refresh timer.
    pub async fn start(&self) -> CycleReport {
        let report = self.load_all().await;
        self.animate_counters();
        self.start_auto_refresh();
        report
    }

    /// Fetch all four collections in sequence. A failing fetch leaves its
    /// section untouched and never stops the remaining ones.
    pub async fn load_all(&self) -> CycleReport {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut report = CycleReport::new(generation);

        report.record(Section::Stats, self.fetch_stats(generation).await);
        report.record(Section::Channels, self.fetch_channels(generation).await);
        report.record(Section::Admins, self.fetch_admins(generation).await);
        report.record(Section::Keywords, self.fetch_keywords(generation).await);

        debug!(
            generation,
            rendered = report.rendered.len(),
            failed = report.failed.len(),
            discarded = report.discarded.len(),
            "Poll cycle finished"
        );
        report
    }

    /// [`load_all`](Self::load_all) with the refresh control disabled for the
    /// duration and a notification on completion.
    pub async fn refresh(&self) -> CycleReport {
        let _control = RefreshControlGuard::engage(&self.inner.view);
        let report = self.load_all().await;

        if report.all_failed() {
            self.inner.notifications.error("Failed to refresh data");
        } else {
            self.inner.notifications.success("Data refreshed successfully");
        }
        report
    }

    /// Start the recurring refresh, replacing any timer already running.
    pub fn start_auto_refresh(&self) {
        let weak = Arc::downgrade(&self.inner);
        let period = self.inner.refresh_interval;
        let handle = tokio::spawn(auto_refresh_loop(weak, period));

        let previous = lock(&self.inner.auto_refresh).replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        self.inner.view.update(|view| view.auto_refresh = true);
        info!(interval_ms = period.as_millis() as u64, "Auto-refresh started");
    }

    /// Safe to call when no timer is active.
    pub fn stop_auto_refresh(&self) {
        if let Some(handle) = lock(&self.inner.auto_refresh).take() {
            handle.abort();
            info!("Auto-refresh stopped");
        }
        self.inner.view.update(|view| view.auto_refresh = false);
    }

    /// Flip the auto-refresh timer; returns whether it is now running.
    pub fn toggle_auto_refresh(&self) -> bool {
        if self.is_auto_refreshing() {
            self.stop_auto_refresh();
            false
        } else {
            self.start_auto_refresh();
            true
        }
    }

    pub fn is_auto_refreshing(&self) -> bool {
        lock(&self.inner.auto_refresh)
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Filter every rendered row by `term`.
    pub fn search(&self, term: &str) {
        self.inner.view.update(|view| search::apply(view, term));
    }

    /// Start the one-shot counter animation. Returns `false` while a previous
    /// animation is still running or there is nothing to animate.
    pub fn animate_counters(&self) -> bool {
        let mut slot = lock(&self.inner.animation);
        if slot.as_ref().map(|handle| !handle.is_finished()).unwrap_or(false) {
            return false;
        }
        let Some(animation) = self.inner.view.update(CounterAnimation::begin) else {
            return false;
        };
        *slot = Some(tokio::spawn(animation.run(self.inner.view.clone())));
        true
    }

    /// Cancel every timer owned by the controller.
    pub fn stop(&self) {
        self.stop_auto_refresh();
        if let Some(handle) = lock(&self.inner.animation).take() {
            handle.abort();
        }
    }

    async fn fetch_stats(&self, generation: u64) -> SectionOutcome {
        let result = self.inner.api.stats().await;
        self.apply(Section::Stats, generation, result, render_stats)
    }

    async fn fetch_channels(&self, generation: u64) -> SectionOutcome {
        let result = self.inner.api.channels().await;
        self.apply(Section::Channels, generation, result, render_channels)
    }

    async fn fetch_admins(&self, generation: u64) -> SectionOutcome {
        let result = self.inner.api.admins().await;
        self.apply(Section::Admins, generation, result, render_admins)
    }

    async fn fetch_keywords(&self, generation: u64) -> SectionOutcome {
        let result = self.inner.api.keywords().await;
        self.apply(Section::Keywords, generation, result, render_keywords)
    }

    fn apply<T>(
        &self,
        section: Section,
        generation: u64,
        result: Result<T, PanelError>,
        render: fn(&mut ViewState, T),
    ) -> SectionOutcome {
        let data = match result {
            Ok(data) => data,
            Err(err) => {
                warn!(%section, generation, error = %err, "Failed to fetch section, keeping previous view");
                return SectionOutcome::Failed;
            }
        };

        let applied = self.inner.view.update(|view| {
            if !view.claim(section, generation) {
                return false;
            }
            render(view, data);
            true
        });

        if applied {
            SectionOutcome::Rendered
        } else {
            debug!(%section, generation, "Discarding result from superseded cycle");
            SectionOutcome::Discarded
        }
    }
}

async fn auto_refresh_loop(weak: Weak<Inner>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let controller = DataSyncController { inner };
        // Each tick runs on its own task; slow cycles may overlap and are
        // ordered by generation when they render.
        tokio::spawn(async move {
            controller.refresh().await;
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Disables the refresh control until dropped, on every exit path.
struct RefreshControlGuard {
    view: SharedView,
}

impl RefreshControlGuard {
    fn engage(view: &SharedView) -> Self {
        view.update(|view| view.set_refresh_disabled(true));
        Self { view: view.clone() }
    }
}

impl Drop for RefreshControlGuard {
    fn drop(&mut self) {
        self.view.update(|view| view.set_refresh_disabled(false));
    }
}

fn render_stats(view: &mut ViewState, stats: StatsSnapshot) {
    let values = [
        (StatSlot::Admins, stats.total_admins),
        (StatSlot::Channels, stats.total_channels),
        (StatSlot::Keywords, stats.total_keywords),
        (StatSlot::Members, stats.total_members),
        (StatSlot::AvgMembers, round_average(stats.avg_members_per_channel)),
    ];
    for (slot, value) in values {
        view.stats.insert(slot, slot.format(value));
    }
    view.channel_progress = Some(ProgressBar {
        percent: progress_percent(stats.total_channels, CHANNEL_PROGRESS_MAX),
    });
    view.keyword_progress = Some(ProgressBar {
        percent: progress_percent(stats.total_keywords, KEYWORD_PROGRESS_MAX),
    });
}

fn render_channels(view: &mut ViewState, channels: Vec<Channel>) {
    view.channels = channel_rows(&channels);
    search::filter_rows(&mut view.channels, &view.search_term);
}

fn render_admins(view: &mut ViewState, admins: Vec<Admin>) {
    view.admins = admin_rows(&admins);
    search::filter_rows(&mut view.admins, &view.search_term);
}

fn render_keywords(view: &mut ViewState, keywords: Vec<Keyword>) {
    view.keywords = keyword_rows(&keywords);
    search::filter_rows(&mut view.keywords, &view.search_term);
}
