mod controller;
pub mod counter;
pub mod search;

pub use controller::{CycleReport, DataSyncController, CHANNEL_PROGRESS_MAX, KEYWORD_PROGRESS_MAX};
