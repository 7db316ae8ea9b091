mod command;
mod dispatcher;
mod export;

pub use command::{ActionTag, AdminId, ChannelId, Command};
pub use dispatcher::{ActionDispatcher, CommandBuilder, CommandRegistry, Confirm, DispatchOutcome};
pub use export::{write_export, ExportTarget};
