use std::fmt;
use std::time::Duration;

use crate::config::ConfigError;

/// Boxed error produced by a [`Transport`](crate::transport::Transport)
/// implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A single field-level message from a validation error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Option<String>,
    pub msg: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "  [{field}] {}", self.msg),
            None => write!(f, "  {}", self.msg),
        }
    }
}

/// Errors returned by the Metafold client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[source] BoxError),

    /// The server rejected the request parameters.
    #[error("Bad request:\n{}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// The server returned a non-2xx status with a single reason.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The poll deadline elapsed before a terminal status was observed.
    #[error("Job timed out")]
    PollTimeout { elapsed: Duration },

    /// The poll's cancellation token fired before a terminal status was
    /// observed.
    #[error("Job polling cancelled")]
    PollCancelled,

    /// A job did not reach a terminal state within its bound.
    #[error("Job '{job}' failed to complete within {} ms", .timeout.as_millis())]
    Timeout {
        job: String,
        timeout: Duration,
        #[source]
        source: Box<ClientError>,
    },

    /// Polling was stopped by the caller's cancellation token.
    #[error("Job '{job}' was cancelled")]
    Cancelled { job: String },

    /// The job itself reached the `failure` state.
    #[error("Job '{job}' failed")]
    JobFailed {
        job: String,
        /// Diagnostic metadata reported by the server, if any.
        meta: Option<serde_json::Value>,
    },

    /// The job submission was accepted but carried no status link.
    #[error("Job submission response did not include a status link")]
    MissingLink,

    /// Client configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A response body did not match the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Convenience alias for client return values.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Wrap any transport-level failure.
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Transport(err.into())
    }

    /// Caller-initiated cancellation, raw or wrapped.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::PollCancelled | Self::Cancelled { .. })
    }

    /// Deadline expiry, either raw from the poller or wrapped by `run`.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::PollTimeout { .. } | Self::Timeout { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status of a server-reported error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Validation(_) => Some(400),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
