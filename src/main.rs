use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use guardbot_console::console::{self, LineConfirm};
use guardbot_console::{
    ActionDispatcher, AdminApi, AdminClient, Config, DataSyncController, HealthMonitor,
    NotificationCenter, PanelError, SharedView, ViewState,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), PanelError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().await;
    let api: Arc<dyn AdminApi> = Arc::new(AdminClient::new(&config)?);

    let view = SharedView::new(ViewState::with_refresh_control());
    let notifications = NotificationCenter::new(view.clone(), config.notification_lifetime());
    let controller = DataSyncController::new(
        Arc::clone(&api),
        view.clone(),
        notifications,
        config.refresh_interval(),
    );
    let health = HealthMonitor::new(api, view, config.health_interval());

    let lines = console::stdin_lines();
    let dispatcher = ActionDispatcher::new(
        controller.clone(),
        Arc::new(LineConfirm::new(Arc::clone(&lines))),
    )
    .with_export_dir(config.export_dir.clone());

    health.start();
    let initial = controller.start().await;
    info!(
        rendered = initial.rendered.len(),
        failed = initial.failed.len(),
        "Initial load complete"
    );

    tokio::select! {
        result = console::run(lines, controller.clone(), dispatcher) => {
            if let Err(err) = result {
                error!(error = %err, "Console stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    controller.stop();
    health.stop();
    Ok(())
}
