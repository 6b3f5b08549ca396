//! Remote call failures and server error-body extraction.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure of one remote graph store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Request never produced a response (connect, timeout, TLS, ...).
    Transport(String),
    /// Non-success status, with the server message if one was sent.
    Status { status: u16, message: Option<String> },
    /// Field-level validation messages, in server order.
    Validation(Vec<String>),
    /// Response body could not be decoded.
    Decode(String),
}

impl RemoteError {
    /// Most specific server-provided message: the first validation message,
    /// else the status message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Validation(messages) => messages.first().map(String::as_str),
            Self::Status { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Stable name for log events.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Validation(_) => "validation",
            Self::Decode(_) => "decode",
        }
    }

    /// Classifies a failed response from its status and raw body.
    ///
    /// `{"errors":[{"msg":..}]}` becomes `Validation`; `{"message":..}` or
    /// `{"error":..}` becomes the `Status` message; anything else leaves the
    /// message empty.
    pub fn from_response(status: u16, body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return Self::Status {
                status,
                message: None,
            };
        };

        let messages = validation_messages(&value);
        if !messages.is_empty() {
            return Self::Validation(messages);
        }

        Self::Status {
            status,
            message: server_message(&value),
        }
    }
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(details) => write!(f, "request failed: {details}"),
            Self::Status {
                status,
                message: Some(message),
            } => write!(f, "server returned {status}: {message}"),
            Self::Status {
                status,
                message: None,
            } => write!(f, "server returned {status}"),
            Self::Validation(messages) => {
                write!(f, "validation failed: {}", messages.join("; "))
            }
            Self::Decode(details) => write!(f, "invalid response body: {details}"),
        }
    }
}

impl Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

fn validation_messages(value: &Value) -> Vec<String> {
    let Some(errors) = value.get("errors").and_then(Value::as_array) else {
        return Vec::new();
    };
    errors
        .iter()
        .filter_map(|entry| {
            entry
                .get("msg")
                .or_else(|| entry.get("message"))
                .and_then(Value::as_str)
                .or_else(|| entry.as_str())
        })
        .map(str::to_string)
        .collect()
}

fn server_message(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}
