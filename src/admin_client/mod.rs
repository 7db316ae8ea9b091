mod api;
mod client;
mod helpers;
mod models;

pub use api::{ActionReceipt, AdminApi};
pub use client::AdminClient;
pub use models::{Admin, Channel, DetectionReport, Keyword, StatsSnapshot};
