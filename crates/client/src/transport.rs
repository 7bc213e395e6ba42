//! HTTP boundary.
//!
//! The client core only needs "send this request, give me the status and
//! body". [`Transport`] captures that capability so the job protocol can be
//! driven by the reqwest-backed [`HttpTransport`] in production and by
//! scripted transports in tests.

use std::future::Future;

use metafold_core::params::Params;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Sent as `application/json`.
    Json(Value),
    /// Sent as `multipart/form-data` with a single `file` part.
    File {
        data: Vec<u8>,
        filename: Option<String>,
    },
}

/// A request against the API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, or an absolute URL.
    pub url: String,
    pub query: Params,
    pub body: RequestBody,
    /// Attach the bearer token. Disabled for pre-signed download links.
    pub authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Params::new(),
            body: RequestBody::Empty,
            authenticated: true,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.body = RequestBody::Json(body.into());
        self
    }

    pub fn file(mut self, data: Vec<u8>, filename: Option<String>) -> Self {
        self.body = RequestBody::File { data, filename };
        self
    }

    pub fn unauthenticated(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn is_absolute(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

/// A raw HTTP response, before error interception.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Build a response with a JSON body.
    pub fn json_body(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// The HTTP request capability consumed by the client.
///
/// Implementations return every response the server produces, whatever
/// its status; only failures to obtain a response are errors.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = ClientResult<ApiResponse>> + Send;
}

/// [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HttpTransport {
    /// Build the underlying HTTP client from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing [`reqwest::Client`] (shares its connection pool).
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, request: &ApiRequest) -> String {
        if request.is_absolute() {
            request.url.clone()
        } else {
            format!("{}{}", self.base_url, request.url)
        }
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.resolve(&request);
        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .header(reqwest::header::ACCEPT, "application/json");

        if request.authenticated {
            builder = builder.bearer_auth(&self.access_token);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let logged_url = log_url(&request, &url);
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::File { data, filename } => {
                let mut part = reqwest::multipart::Part::bytes(data);
                if let Some(filename) = filename {
                    part = part.file_name(filename);
                }
                builder.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };

        tracing::debug!(
            method = request.method.as_str(),
            url = logged_url,
            "Sending API request",
        );

        let response = builder.send().await.map_err(ClientError::from)?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(ApiResponse { status, body })
    }
}

/// URL as it may appear in logs. Pre-signed links carry their credentials
/// in the query string, so it is dropped for unauthenticated requests.
fn log_url<'a>(request: &ApiRequest, url: &'a str) -> &'a str {
    if request.authenticated {
        url
    } else {
        url.split_once('?').map_or(url, |(path, _)| path)
    }
}
