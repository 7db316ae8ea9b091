//! Line-oriented driver used by the binary.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

use crate::actions::{
    ActionDispatcher, ActionTag, AdminId, Command, Confirm, DispatchOutcome, ExportTarget,
};
use crate::sync::DataSyncController;
use crate::types::PanelError;
use crate::view::ActionControl;

pub type SharedLines<R> = Arc<Mutex<Lines<R>>>;

pub fn stdin_lines() -> SharedLines<BufReader<Stdin>> {
    Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
}

/// Confirmation prompt answered on the next input line.
pub struct LineConfirm<R> {
    lines: SharedLines<R>,
}

impl<R> LineConfirm<R> {
    pub fn new(lines: SharedLines<R>) -> Self {
        Self { lines }
    }
}

#[async_trait]
impl<R> Confirm for LineConfirm<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        match self.lines.lock().await.next_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "Failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Refresh,
    ToggleAutoRefresh,
    Search(String),
    Show,
    Action(ActionControl),
    Submit(Command),
    TestDetection(String),
    TestBot,
    Export(ExportTarget),
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, PanelError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "refresh" => ConsoleCommand::Refresh,
        "toggle" => ConsoleCommand::ToggleAutoRefresh,
        // The raw remainder, so a search can be cleared with a bare `search`.
        "search" => ConsoleCommand::Search(rest.to_string()),
        "show" => ConsoleCommand::Show,
        "help" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        "test" => ConsoleCommand::TestDetection(rest.to_string()),
        "test-bot" => ConsoleCommand::TestBot,
        "export" => ConsoleCommand::Export(rest.parse()?),
        "add-channel" => ConsoleCommand::Submit(Command::add_channel(rest)?),
        "add-admin" => ConsoleCommand::Submit(Command::add_admin(rest.parse::<AdminId>()?)?),
        "add-keyword" => ConsoleCommand::Submit(Command::add_keyword(rest)?),
        other => {
            let tag = other.parse::<ActionTag>()?;
            if rest.is_empty() {
                return Err(PanelError::InvalidCommand(format!("`{tag}` needs an id")));
            }
            ConsoleCommand::Action(ActionControl {
                tag,
                id: rest.to_string(),
            })
        }
    };
    Ok(Some(command))
}

const HELP: &str = "\
commands:
  refresh                 reload every section now
  toggle                  start or stop auto-refresh
  search <term>           filter table rows
  show                    print the current view as JSON
  remove-channel <id>     remove-admin <id>     remove-keyword <keyword>
  add-channel <input>     add-admin <id>        add-keyword <keyword>
  test <text>             run copyright detection on sample text
  test-bot                check the bot is reachable
  export <what>           save channels, admins, keywords or health as JSON
  quit";

/// Read and execute commands until `quit` or end of input.
pub async fn run<R>(
    lines: SharedLines<R>,
    controller: DataSyncController,
    dispatcher: ActionDispatcher,
) -> Result<(), PanelError>
where
    R: AsyncBufRead + Unpin + Send,
{
    loop {
        let next = lines.lock().await.next_line().await?;
        let Some(line) = next else {
            return Ok(());
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            ConsoleCommand::Refresh => {
                let report = controller.refresh().await;
                println!(
                    "cycle {}: {} rendered, {} failed",
                    report.generation,
                    report.rendered.len(),
                    report.failed.len()
                );
            }
            ConsoleCommand::ToggleAutoRefresh => {
                let running = controller.toggle_auto_refresh();
                println!("auto-refresh {}", if running { "on" } else { "off" });
            }
            ConsoleCommand::Search(term) => controller.search(&term),
            ConsoleCommand::Show => {
                let snapshot = controller.view().snapshot();
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            ConsoleCommand::Action(control) => report(dispatcher.dispatch(&control).await),
            ConsoleCommand::Submit(command) => report(dispatcher.submit(command).await),
            ConsoleCommand::TestDetection(text) => {
                if let Ok(result) = dispatcher.test_detection(&text).await {
                    println!("{}", result.summary());
                }
            }
            ConsoleCommand::TestBot => {
                if let Ok(receipt) = dispatcher.test_bot().await {
                    println!("{}", receipt.message.unwrap_or_else(|| "bot ok".to_string()));
                }
            }
            ConsoleCommand::Export(target) => {
                if let Ok(path) = dispatcher.export(target).await {
                    println!("saved {}", path.display());
                }
            }
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => return Ok(()),
        }
    }
}

fn report(outcome: DispatchOutcome) {
    match outcome {
        DispatchOutcome::Declined => println!("cancelled"),
        DispatchOutcome::Completed(_) => println!("done"),
        DispatchOutcome::Failed(message) => eprintln!("error: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ChannelId;
    use crate::view::Section;

    #[test]
    fn parses_action_commands() {
        assert_eq!(
            parse_line("remove-admin 42").unwrap(),
            Some(ConsoleCommand::Action(ActionControl {
                tag: ActionTag::RemoveAdmin,
                id: "42".to_string(),
            }))
        );
        assert_eq!(
            parse_line("remove-keyword cam rip").unwrap(),
            Some(ConsoleCommand::Action(ActionControl {
                tag: ActionTag::RemoveKeyword,
                id: "cam rip".to_string(),
            }))
        );
        assert!(parse_line("remove-channel").is_err());
        assert!(parse_line("drop everything").is_err());
    }

    #[test]
    fn parses_add_commands_with_validation() {
        assert_eq!(
            parse_line("add-keyword  Leak ").unwrap(),
            Some(ConsoleCommand::Submit(Command::AddKeyword("leak".to_string())))
        );
        assert!(parse_line("add-keyword x").is_err());
        assert!(parse_line("add-admin nobody").is_err());
        assert_eq!(
            parse_line("add-channel @movies").unwrap(),
            Some(ConsoleCommand::Submit(Command::AddChannel("@movies".to_string())))
        );
        assert_ne!(
            Command::AddChannel("@movies".to_string()),
            Command::RemoveChannel(ChannelId("@movies".to_string()))
        );
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("refresh").unwrap(), Some(ConsoleCommand::Refresh));
        assert_eq!(
            parse_line("search News Daily").unwrap(),
            Some(ConsoleCommand::Search("News Daily".to_string()))
        );
        assert_eq!(
            parse_line("search").unwrap(),
            Some(ConsoleCommand::Search(String::new()))
        );
        assert_eq!(parse_line("exit").unwrap(), Some(ConsoleCommand::Quit));
        assert_eq!(parse_line("test-bot").unwrap(), Some(ConsoleCommand::TestBot));
    }

    #[test]
    fn parses_export_targets() {
        assert_eq!(
            parse_line("export admins").unwrap(),
            Some(ConsoleCommand::Export(ExportTarget::Table(Section::Admins)))
        );
        assert_eq!(
            parse_line("export health").unwrap(),
            Some(ConsoleCommand::Export(ExportTarget::Health))
        );
        assert!(parse_line("export stats").is_err());
        assert!(parse_line("export").is_err());
    }

    #[test]
    fn confirmation_accepts_yes_variants() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("no"));
        assert!(!is_yes(""));
    }

    #[tokio::test]
    async fn line_confirm_reads_the_next_line() {
        let input: &[u8] = b"yes\nn\n";
        let lines = Arc::new(Mutex::new(BufReader::new(input).lines()));
        let confirm = LineConfirm::new(lines);
        assert!(confirm.confirm("Are you sure you want to remove admin?").await);
        assert!(!confirm.confirm("Are you sure you want to remove admin?").await);
        assert!(!confirm.confirm("Are you sure you want to remove admin?").await);
    }
}
