//! Jobs endpoint.
//!
//! Dispatching a job is a two-phase protocol: [`Jobs::run_status`] submits
//! the job and returns its status link, [`Jobs::poll`] waits on that link.
//! [`Jobs::run`] composes both and normalizes the terminal payload into a
//! [`Job`].
//!
//! Submission is never retried here. The API gives no idempotency
//! guarantee for `POST /jobs`, so a resubmit could run the job twice.

use std::time::Duration;

use futures::future::join_all;
use metafold_core::job::{Job, JobState, JobSubmission};
use metafold_core::params::construct_params;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::MetafoldClient;
use crate::error::{ClientError, ClientResult};
use crate::poller::{self, PollOptions};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Optional `sort` / `q` parameters for list endpoints.
///
/// `sort` uses `field:direction` (e.g. `id:1`), `q` uses `field:value`
/// (e.g. `name:foo`). Supported job sort fields are `id`, `name` and
/// `created`; searchable fields are `id`, `name`, `type` and `state`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub sort: Option<String>,
    pub q: Option<String>,
}

impl ListParams {
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub(crate) fn to_query(&self) -> metafold_core::params::Params {
        construct_params([("sort", json!(self.sort)), ("q", json!(self.q))])
    }
}

/// Acknowledgement returned by `POST /projects/{id}/jobs`.
#[derive(Debug, Deserialize)]
struct Accepted {
    #[serde(default)]
    link: Option<String>,
}

/// Jobs endpoint, borrowed from a [`MetafoldClient`].
pub struct Jobs<'a, T> {
    client: &'a MetafoldClient<T>,
}

impl<'a, T: Transport> Jobs<'a, T> {
    pub(crate) fn new(client: &'a MetafoldClient<T>) -> Self {
        Self { client }
    }

    fn path(&self) -> String {
        self.client.project_path("jobs")
    }

    /// List jobs in the project.
    pub async fn list(&self, params: &ListParams) -> ClientResult<Vec<Job>> {
        let response = self.client.get(&self.path(), params.to_query()).await?;
        response.json()
    }

    /// Get a single job.
    pub async fn get(&self, id: &str) -> ClientResult<Job> {
        let path = format!("{}/{id}", self.path());
        let response = self.client.get(&path, Default::default()).await?;
        response.json()
    }

    /// Rename a job. `None` leaves the existing name unchanged.
    pub async fn update(&self, id: &str, name: Option<&str>) -> ClientResult<Job> {
        let path = format!("{}/{id}", self.path());
        let body = construct_params([("name", json!(name))]);
        let response = self.client.patch(&path, Value::Object(body)).await?;
        response.json()
    }

    /// Dispatch a job and return its status link without waiting.
    pub async fn run_status(&self, submission: &JobSubmission) -> ClientResult<String> {
        let request = ApiRequest::post(self.path()).json(Value::Object(submission.to_body()));
        let response = self.client.execute(request).await?;
        let accepted: Accepted = response.json()?;
        let link = accepted.link.ok_or(ClientError::MissingLink)?;

        tracing::info!(
            job_type = %submission.job_type,
            job = submission.label(),
            status_url = %link,
            "Job dispatched",
        );

        Ok(link)
    }

    /// Poll a status link every second until the job finishes or `timeout`
    /// elapses.
    pub async fn poll(&self, url: &str, timeout: Duration) -> ClientResult<ApiResponse> {
        let options = PollOptions::from_config(self.client.config()).timeout(timeout);
        poller::poll(self.client, url, &options).await
    }

    /// Poll a status link with explicit options.
    pub async fn poll_with(&self, url: &str, options: &PollOptions) -> ClientResult<ApiResponse> {
        poller::poll(self.client, url, options).await
    }

    /// Dispatch a job and wait for the result using the configured
    /// timeout.
    pub async fn run(&self, submission: &JobSubmission) -> ClientResult<Job> {
        let options = PollOptions::from_config(self.client.config());
        self.run_with(submission, &options).await
    }

    /// Dispatch a job and wait for the result.
    ///
    /// A deadline or cancellation during polling is reported against the
    /// job's name (or type); every other failure is passed through. A job
    /// whose terminal snapshot is `failure` yields [`ClientError::JobFailed`].
    pub async fn run_with(
        &self,
        submission: &JobSubmission,
        options: &PollOptions,
    ) -> ClientResult<Job> {
        let url = self.run_status(submission).await?;

        let response = match poller::poll(self.client, &url, options).await {
            Ok(response) => response,
            Err(err @ ClientError::PollTimeout { .. }) => {
                return Err(ClientError::Timeout {
                    job: submission.label().to_string(),
                    timeout: options.timeout,
                    source: Box::new(err),
                });
            }
            Err(ClientError::PollCancelled) => {
                return Err(ClientError::Cancelled {
                    job: submission.label().to_string(),
                });
            }
            Err(err) => return Err(err),
        };

        let job = Job::from_json(response.json()?)?;
        if job.state == JobState::Failure {
            tracing::warn!(job_id = %job.id, job = job.label(), "Job failed");
            return Err(ClientError::JobFailed {
                job: job.label().to_string(),
                meta: job.meta,
            });
        }

        tracing::info!(
            job_id = %job.id,
            job = job.label(),
            state = %job.state,
            assets = job.assets.len(),
            "Job completed",
        );

        Ok(job)
    }

    /// Run several jobs concurrently and wait for all of them to settle.
    ///
    /// Results are in submission order. Each job is dispatched and polled
    /// independently; a failure does not affect the others.
    pub async fn run_all(&self, submissions: &[JobSubmission]) -> Vec<ClientResult<Job>> {
        join_all(submissions.iter().map(|s| self.run(s))).await
    }
}
