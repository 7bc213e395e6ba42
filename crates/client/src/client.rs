//! Top-level API client.
//!
//! [`MetafoldClient`] owns the transport and configuration and hands out
//! borrowed resource endpoints ([`Jobs`], [`Assets`], [`User`]). All
//! requests go through [`MetafoldClient::execute`], which runs the
//! response interceptor.

use metafold_core::params::Params;
use serde_json::Value;

use crate::assets::Assets;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::interceptor::intercept;
use crate::jobs::Jobs;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
use crate::user::User;

/// Metafold REST API client.
///
/// Cheap to share by reference across concurrent tasks: the transport and
/// configuration are read-only after construction.
pub struct MetafoldClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl MetafoldClient<HttpTransport> {
    /// Create a client using the reqwest transport.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }

    /// Create a client from `METAFOLD_*` environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> MetafoldClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Endpoint for managing job resources.
    pub fn jobs(&self) -> Jobs<'_, T> {
        Jobs::new(self)
    }

    /// Endpoint for managing asset resources.
    pub fn assets(&self) -> Assets<'_, T> {
        Assets::new(self)
    }

    /// Endpoint for querying user information.
    pub fn user(&self) -> User<'_, T> {
        User::new(self)
    }

    /// Send a request and run the response through the interceptor.
    pub async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let response = self.transport.send(request).await?;
        intercept(response)
    }

    pub async fn get(&self, path: &str, query: Params) -> ClientResult<ApiResponse> {
        self.execute(ApiRequest::get(path).query(query)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> ClientResult<ApiResponse> {
        self.execute(ApiRequest::post(path).json(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> ClientResult<ApiResponse> {
        self.execute(ApiRequest::new(Method::Put, path).json(body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> ClientResult<ApiResponse> {
        self.execute(ApiRequest::patch(path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<ApiResponse> {
        self.execute(ApiRequest::delete(path)).await
    }

    /// Path of a project-scoped collection, e.g. `/projects/1/jobs`.
    pub(crate) fn project_path(&self, collection: &str) -> String {
        format!("/projects/{}/{collection}", self.config.project_id)
    }
}
