//! Turns entity collections into table rows, preserving service order.

use crate::actions::ActionTag;
use crate::admin_client::{Admin, Channel, Keyword};

use super::format::{escape_html, format_count, format_date, MISSING_TEXT, UNKNOWN_NAME};
use super::state::{ActionControl, BadgeTone, Cell, Row};

pub fn channel_rows(channels: &[Channel]) -> Vec<Row> {
    channels
        .iter()
        .map(|channel| {
            Row::new(
                vec![
                    Cell::text(name_or_unknown(channel.channel_name.as_deref())),
                    Cell::text(handle_or_missing(channel.channel_username.as_deref())),
                    Cell::text(format_count(channel.member_count.unwrap_or(0))),
                    status_cell(channel.is_active),
                    Cell::text(format_date(channel.added_at.as_deref())),
                ],
                ActionControl {
                    tag: ActionTag::RemoveChannel,
                    id: channel.channel_id.clone(),
                },
            )
        })
        .collect()
}

pub fn admin_rows(admins: &[Admin]) -> Vec<Row> {
    admins
        .iter()
        .map(|admin| {
            Row::new(
                vec![
                    Cell::text(admin.user_id.to_string()),
                    Cell::text(name_or_unknown(admin.first_name.as_deref())),
                    Cell::text(handle_or_missing(admin.username.as_deref())),
                    status_cell(admin.is_active),
                    Cell::text(format_date(admin.added_at.as_deref())),
                ],
                ActionControl {
                    tag: ActionTag::RemoveAdmin,
                    id: admin.user_id.to_string(),
                },
            )
        })
        .collect()
}

pub fn keyword_rows(keywords: &[Keyword]) -> Vec<Row> {
    keywords
        .iter()
        .map(|keyword| {
            Row::new(
                vec![
                    Cell::text(escape_html(&keyword.keyword)),
                    Cell::text(format_count(keyword.detection_count.unwrap_or(0))),
                    status_cell(keyword.is_active),
                    Cell::text(format_date(keyword.added_at.as_deref())),
                ],
                ActionControl {
                    tag: ActionTag::RemoveKeyword,
                    id: keyword.keyword.clone(),
                },
            )
        })
        .collect()
}

fn name_or_unknown(name: Option<&str>) -> String {
    match name.filter(|value| !value.trim().is_empty()) {
        Some(value) => escape_html(value),
        None => UNKNOWN_NAME.to_string(),
    }
}

fn handle_or_missing(handle: Option<&str>) -> String {
    match handle.filter(|value| !value.trim().is_empty()) {
        Some(value) => format!("@{}", escape_html(value.trim_start_matches('@'))),
        None => MISSING_TEXT.to_string(),
    }
}

fn status_cell(active: bool) -> Cell {
    if active {
        Cell::badge("Active".to_string(), BadgeTone::Success)
    } else {
        Cell::badge("Inactive".to_string(), BadgeTone::Secondary)
    }
}
