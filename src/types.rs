use thiserror::Error;

/// Errors surfaced by the admin console.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{}", api_error_text(.path, .status, .message.as_deref()))]
    Api {
        path: String,
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

fn api_error_text(path: &str, status: &u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("{} returned {}", path, status),
    }
}
