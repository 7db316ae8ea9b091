//! Saving service exports as local JSON files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde_json::Value;
use tokio::fs;

use crate::types::PanelError;
use crate::view::Section;

/// What the service can export: one of the tables, or the health report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Table(Section),
    Health,
}

impl ExportTarget {
    /// Dated file name the export is saved under.
    pub fn file_name(self, now: DateTime<Local>) -> String {
        match self {
            ExportTarget::Table(section) => {
                format!("{section}-export-{}.json", now.format("%Y%m%d"))
            }
            ExportTarget::Health => {
                format!("health-report-{}.json", now.format("%Y%m%d-%H%M%S"))
            }
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportTarget::Table(section) => write!(f, "{section}"),
            ExportTarget::Health => f.write_str("health report"),
        }
    }
}

impl FromStr for ExportTarget {
    type Err = PanelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "channels" => Ok(ExportTarget::Table(Section::Channels)),
            "admins" => Ok(ExportTarget::Table(Section::Admins)),
            "keywords" => Ok(ExportTarget::Table(Section::Keywords)),
            "health" => Ok(ExportTarget::Health),
            other => Err(PanelError::InvalidCommand(format!(
                "cannot export `{other}`; expected channels, admins, keywords or health"
            ))),
        }
    }
}

/// Pretty-print `payload` into `dir/file_name`, creating `dir` if needed.
pub async fn write_export(dir: &Path, file_name: &str, payload: &Value) -> Result<PathBuf, PanelError> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    fs::write(&path, serde_json::to_vec_pretty(payload)?).await?;
    Ok(path)
}
