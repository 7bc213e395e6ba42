//! Job records and submissions.
//!
//! A [`JobSubmission`] is built by the caller and sent once. The server
//! answers with [`Job`] snapshots; the client never constructs a `Job`
//! itself other than by decoding a payload.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::asset::Asset;
use crate::params::{construct_params, Params};
use crate::types::{ResourceId, Timestamp};

/// Server-side lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Started,
    Success,
    Failure,
}

impl JobState {
    /// `success` and `failure` end the job; polling stops on either.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Started => "started",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized job resource.
///
/// Timestamps, including those of nested assets, are decoded into
/// [`Timestamp`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub job_type: String,
    /// Opaque parameters, echoed back by the server.
    #[serde(default)]
    pub parameters: Value,
    #[serde(with = "crate::timestamp")]
    pub created: Timestamp,
    pub state: JobState,
    /// Generated assets. Empty until the job succeeds.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Additional metadata generated by the job.
    #[serde(default)]
    pub meta: Option<Value>,
}

impl Job {
    /// Map a raw job payload into the caller-facing record.
    ///
    /// Malformed payloads fail with the underlying decode error; no other
    /// validation is applied.
    pub fn from_json(raw: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(raw)
    }

    /// The label used in diagnostics: the job name, or its type when
    /// unnamed.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.job_type)
    }
}

/// A request to run a job of a given type.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSubmission {
    pub job_type: String,
    pub parameters: Value,
    pub name: Option<String>,
}

impl JobSubmission {
    pub fn new(job_type: impl Into<String>, parameters: Value) -> Self {
        Self {
            job_type: job_type.into(),
            parameters,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name if set, otherwise the job type.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.job_type)
    }

    /// Request body for `POST /projects/{id}/jobs`. Absent optional fields
    /// are omitted rather than sent as `null`.
    pub fn to_body(&self) -> Params {
        construct_params([
            ("type", json!(self.job_type)),
            ("parameters", self.parameters.clone()),
            ("name", json!(self.name)),
        ])
    }
}
