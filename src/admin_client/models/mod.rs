mod admin;
mod channel;
mod detection;
mod keyword;
mod stats;

pub use admin::Admin;
pub use channel::Channel;
pub use detection::DetectionReport;
pub use keyword::Keyword;
pub use stats::StatsSnapshot;
