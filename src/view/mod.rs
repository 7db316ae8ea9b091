pub mod format;
mod notifications;
mod state;
pub mod table;

pub use notifications::NotificationCenter;
pub use state::{
    ActionControl, BadgeTone, Cell, ControlState, HealthBadge, Notification, ProgressBar, Row,
    Section, Severity, SharedView, StatSlot, ViewState,
};
