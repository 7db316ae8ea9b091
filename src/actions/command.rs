use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::PanelError;

/// Tag carried by a rendered row's action control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionTag {
    RemoveChannel,
    RemoveAdmin,
    RemoveKeyword,
}

impl ActionTag {
    pub const ALL: [ActionTag; 3] = [
        ActionTag::RemoveChannel,
        ActionTag::RemoveAdmin,
        ActionTag::RemoveKeyword,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionTag::RemoveChannel => "remove-channel",
            ActionTag::RemoveAdmin => "remove-admin",
            ActionTag::RemoveKeyword => "remove-keyword",
        }
    }

    /// Human-readable form used in confirmation prompts.
    pub fn describe(self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionTag {
    type Err = PanelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ActionTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == value)
            .ok_or_else(|| PanelError::InvalidCommand(format!("unknown action `{value}`")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AdminId(pub i64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AdminId {
    type Err = PanelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i64>()
            .map(AdminId)
            .map_err(|_| PanelError::InvalidCommand(format!("`{value}` is not a numeric user id")))
    }
}

/// A mutating request against the admin service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RemoveChannel(ChannelId),
    RemoveAdmin(AdminId),
    RemoveKeyword(String),
    AddChannel(String),
    AddAdmin(AdminId),
    AddKeyword(String),
}

impl Command {
    /// Validate and normalise a channel reference (`@handle`, link or name).
    pub fn add_channel(input: &str) -> Result<Self, PanelError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PanelError::InvalidCommand(
                "Channel input required".to_string(),
            ));
        }
        Ok(Command::AddChannel(trimmed.to_string()))
    }

    pub fn add_admin(user_id: AdminId) -> Result<Self, PanelError> {
        if user_id.0 == 0 {
            return Err(PanelError::InvalidCommand("User ID required".to_string()));
        }
        Ok(Command::AddAdmin(user_id))
    }

    /// Keywords are stored trimmed and lower-cased, at least two characters long.
    pub fn add_keyword(input: &str) -> Result<Self, PanelError> {
        let keyword = input.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(PanelError::InvalidCommand("Keyword required".to_string()));
        }
        if keyword.chars().count() < 2 {
            return Err(PanelError::InvalidCommand(
                "Keyword must be at least 2 characters".to_string(),
            ));
        }
        Ok(Command::AddKeyword(keyword))
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Command::RemoveChannel(_) => ActionTag::RemoveChannel.as_str(),
            Command::RemoveAdmin(_) => ActionTag::RemoveAdmin.as_str(),
            Command::RemoveKeyword(_) => ActionTag::RemoveKeyword.as_str(),
            Command::AddChannel(_) => "add-channel",
            Command::AddAdmin(_) => "add-admin",
            Command::AddKeyword(_) => "add-keyword",
        }
    }

    pub fn path(&self) -> String {
        format!("/api/{}", self.endpoint())
    }

    pub fn body(&self) -> Value {
        match self {
            Command::RemoveChannel(id) => json!({ "id": id }),
            Command::RemoveAdmin(id) => json!({ "id": id }),
            Command::RemoveKeyword(keyword) => json!({ "id": keyword }),
            Command::AddChannel(channel) => json!({ "channel": channel }),
            Command::AddAdmin(user_id) => json!({ "user_id": user_id }),
            Command::AddKeyword(keyword) => json!({ "keyword": keyword }),
        }
    }

    /// Action tag of a destructive command; `None` for commands sent without confirmation.
    pub fn tag(&self) -> Option<ActionTag> {
        match self {
            Command::RemoveChannel(_) => Some(ActionTag::RemoveChannel),
            Command::RemoveAdmin(_) => Some(ActionTag::RemoveAdmin),
            Command::RemoveKeyword(_) => Some(ActionTag::RemoveKeyword),
            Command::AddChannel(_) | Command::AddAdmin(_) | Command::AddKeyword(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_their_wire_names() {
        for tag in ActionTag::ALL {
            assert_eq!(tag.as_str().parse::<ActionTag>().unwrap(), tag);
        }
        assert!("drop-table".parse::<ActionTag>().is_err());
        assert_eq!(ActionTag::RemoveKeyword.describe(), "remove keyword");
    }

    #[test]
    fn remove_commands_post_id_bodies() {
        let command = Command::RemoveAdmin(AdminId(42));
        assert_eq!(command.path(), "/api/remove-admin");
        assert_eq!(command.body(), json!({ "id": 42 }));

        let command = Command::RemoveChannel(ChannelId("c1".to_string()));
        assert_eq!(command.path(), "/api/remove-channel");
        assert_eq!(command.body(), json!({ "id": "c1" }));
        assert_eq!(command.tag(), Some(ActionTag::RemoveChannel));
    }

    #[test]
    fn add_keyword_normalises_and_validates() {
        assert_eq!(
            Command::add_keyword("  Pirated ").unwrap(),
            Command::AddKeyword("pirated".to_string())
        );
        assert!(Command::add_keyword("x").is_err());
        assert!(Command::add_keyword("   ").is_err());
        assert_eq!(
            Command::add_keyword("leak").unwrap().body(),
            json!({ "keyword": "leak" })
        );
    }

    #[test]
    fn add_commands_reject_empty_input() {
        assert!(Command::add_channel(" ").is_err());
        assert!(Command::add_admin(AdminId(0)).is_err());
        assert_eq!(Command::add_admin(AdminId(7)).unwrap().tag(), None);
        assert!("abc".parse::<AdminId>().is_err());
    }
}
