//! # Error Taxonomy
//!
//! Every fallible operation in this crate returns [`RedfishError`]. Each variant
//! carries the URI that was in flight so that a failure can be correlated with
//! the service-side logs.
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | [`ErrorKind::Decode`] | The payload is not JSON or does not match the expected shape |
//! | [`ErrorKind::Transport`] | Connection failure, or a non-2xx status other than 404/412 |
//! | [`ErrorKind::NotFound`] | The service answered 404 |
//! | [`ErrorKind::PreconditionFailed`] | The service answered 412 (ETag mismatch) |
//! | [`ErrorKind::UpdateUnsupported`] | The resource has no allow-list or no retained original |
//! | [`ErrorKind::ActionUnsupported`] | The action has no target URI |
//! | [`ErrorKind::ActionParameterInvalid`] | A parameter is outside the published allowable values |
//! | [`ErrorKind::PaginationCycle`] | A `Members@odata.nextLink` revisits a page |
//! | [`ErrorKind::Cancelled`] | The cancellation token fired |
//! | [`ErrorKind::PartialFailure`] | A batch was converted to a `Result` with failures |
//!
//! Batch operations never surface a single member's error directly; see
//! [`FailureReport`](crate::FailureReport).

use crate::failure::FailureReport;
use crate::transport::Response;
use serde::{Deserialize, Serialize};

/// Error type returned by [`Transport`](crate::Transport) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience alias used across the crate.
pub type Result<T, E = RedfishError> = std::result::Result<T, E>;

/// One entry of a `@Message.ExtendedInfo` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExtendedInfo {
    pub message_id: String,
    pub message: String,
    pub message_args: Vec<String>,
    pub severity: String,
    pub resolution: String,
}

/// Errors raised while talking to a Redfish service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RedfishError {
    #[error("Decode error at {uri} (line {line}, column {column}): {message}")]
    Decode {
        uri: String,
        offset: usize,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("Transport error at {uri}: {message}")]
    Transport {
        uri: String,
        status: Option<u16>,
        message: String,
        extended_info: Vec<ExtendedInfo>,
    },
    #[error("Not found: {uri}")]
    NotFound { uri: String },
    #[error("Precondition failed at {uri}")]
    PreconditionFailed {
        uri: String,
        extended_info: Vec<ExtendedInfo>,
    },
    #[error("Update unsupported for {uri}: {reason}")]
    UpdateUnsupported { uri: String, reason: &'static str },
    #[error("Action {action} is not supported by {uri}")]
    ActionUnsupported { uri: String, action: String },
    #[error("Invalid value {value:?} for {action}/{parameter}, allowed: {allowed:?}")]
    ActionParameterInvalid {
        uri: String,
        action: String,
        parameter: String,
        value: String,
        allowed: Vec<String>,
    },
    #[error("Pagination cycle at {uri}")]
    PaginationCycle { uri: String },
    #[error("Cancelled while fetching {uri}")]
    Cancelled { uri: String },
    #[error("Batch finished with {} failure(s)", .0.len())]
    PartialFailure(FailureReport),
    #[error("Resource has no self URI")]
    MissingSelfUri,
    #[error("Resource {uri} is not attached to a client")]
    Detached { uri: String },
}

/// Flat discriminant of [`RedfishError`], convenient for branching and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Decode,
    Transport,
    NotFound,
    PreconditionFailed,
    UpdateUnsupported,
    ActionUnsupported,
    ActionParameterInvalid,
    PaginationCycle,
    Cancelled,
    PartialFailure,
    MissingSelfUri,
    Detached,
}

impl RedfishError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PreconditionFailed { .. } => ErrorKind::PreconditionFailed,
            Self::UpdateUnsupported { .. } => ErrorKind::UpdateUnsupported,
            Self::ActionUnsupported { .. } => ErrorKind::ActionUnsupported,
            Self::ActionParameterInvalid { .. } => ErrorKind::ActionParameterInvalid,
            Self::PaginationCycle { .. } => ErrorKind::PaginationCycle,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::PartialFailure(_) => ErrorKind::PartialFailure,
            Self::MissingSelfUri => ErrorKind::MissingSelfUri,
            Self::Detached { .. } => ErrorKind::Detached,
        }
    }

    /// The URI that was in flight, if the error is tied to one.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Decode { uri, .. }
            | Self::Transport { uri, .. }
            | Self::NotFound { uri }
            | Self::PreconditionFailed { uri, .. }
            | Self::UpdateUnsupported { uri, .. }
            | Self::ActionUnsupported { uri, .. }
            | Self::ActionParameterInvalid { uri, .. }
            | Self::PaginationCycle { uri }
            | Self::Cancelled { uri }
            | Self::Detached { uri } => Some(uri),
            Self::PartialFailure(_) | Self::MissingSelfUri => None,
        }
    }

    /// HTTP status reported by the service, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::NotFound { .. } => Some(404),
            Self::PreconditionFailed { .. } => Some(412),
            _ => None,
        }
    }

    /// Builds a `Decode` error, translating serde_json's line/column into a byte offset.
    pub fn decode(uri: &str, error: &serde_json::Error, input: &[u8]) -> Self {
        let (line, column) = (error.line(), error.column());
        Self::Decode {
            uri: uri.to_string(),
            offset: byte_offset(input, line, column),
            line,
            column,
            message: error.to_string(),
        }
    }

    pub(crate) fn connection(uri: &str, error: BoxError) -> Self {
        Self::Transport {
            uri: uri.to_string(),
            status: None,
            message: error.to_string(),
            extended_info: Vec::new(),
        }
    }

    /// Maps a non-2xx response onto the taxonomy.
    pub fn from_response(uri: &str, response: &Response) -> Self {
        let document = serde_json::from_slice::<ErrorDocument>(&response.body).ok();
        let extended_info = document
            .as_ref()
            .map(|d| d.error.extended_info.clone())
            .unwrap_or_default();
        match response.status {
            404 => Self::NotFound {
                uri: uri.to_string(),
            },
            412 => Self::PreconditionFailed {
                uri: uri.to_string(),
                extended_info,
            },
            status => {
                let message = document
                    .map(|d| d.error.message)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| {
                        let text = String::from_utf8_lossy(&response.body).trim().to_string();
                        if text.is_empty() {
                            format!("HTTP status {status}")
                        } else {
                            text
                        }
                    });
                Self::Transport {
                    uri: uri.to_string(),
                    status: Some(status),
                    message,
                    extended_info,
                }
            }
        }
    }
}

/// `{"error": {"code", "message", "@Message.ExtendedInfo"}}`
#[derive(Deserialize)]
struct ErrorDocument {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    extended_info: Vec<ExtendedInfo>,
}

fn byte_offset(input: &[u8], line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = input
        .split(|b| *b == b'\n')
        .take(line - 1)
        .map(|l| l.len() + 1)
        .sum();
    (line_start + column.saturating_sub(1)).min(input.len())
}
