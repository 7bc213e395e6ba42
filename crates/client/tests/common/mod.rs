#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use metafold_client::error::{ClientError, ClientResult};
use metafold_client::transport::{ApiRequest, ApiResponse, Method, Transport};
use metafold_client::{ClientConfig, MetafoldClient};
use serde_json::{json, Value};

pub const BASE_URL: &str = "https://api.metafold3d.com";
pub const STATUS_URL: &str = "https://api.metafold3d.com/projects/1/jobs/1/status";
pub const DEFAULT_DATE: &str = "Mon, 01 Jan 2024 00:00:00 GMT";

/// What the scripted transport does for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond(ApiResponse),
    /// Fail as if the connection dropped.
    Fail(String),
    /// Never answer.
    Hang,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self::Respond(ApiResponse::json_body(status, &body))
    }
}

/// In-memory [`Transport`] with per-route scripted replies.
///
/// Replies for a route are consumed in order; the last one repeats for
/// any further requests. Every request is recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, url: &str, replies: Vec<Reply>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, url.to_string()), replies.into());
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made to `url` with `method`.
    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }

    fn next_reply(&self, request: &ApiRequest) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&(request.method, request.url.clone()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let reply = self.next_reply(&request);
        self.requests.lock().unwrap().push(request.clone());

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(reason)) => Err(ClientError::transport(reason)),
            Some(Reply::Hang) => std::future::pending().await,
            None => Ok(ApiResponse::json_body(
                404,
                &json!({"msg": format!("No route for {} {}", request.method.as_str(), request.url)}),
            )),
        }
    }
}

pub fn test_client(transport: ScriptedTransport) -> MetafoldClient<ScriptedTransport> {
    init_tracing();
    MetafoldClient::with_transport(transport, ClientConfig::new("testtoken", "1"))
}

/// Route test logs through the libtest capture.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metafold_client=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn asset_json() -> Value {
    json!({
        "id": "1",
        "filename": "f763df409e79eb1c.bin",
        "size": 16777216,
        "checksum": "sha256:6310a5951d58eb3e0fdd8c8767c606615552899e65019cb1582508a7c7bfec39",
        "created": DEFAULT_DATE,
        "modified": DEFAULT_DATE,
    })
}

pub fn job_json(id: &str, name: Option<&str>, state: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "test_job",
        "parameters": {"foo": 1, "bar": "a", "baz": [2, "b"]},
        "created": DEFAULT_DATE,
        "state": state,
        "assets": [],
        "meta": null,
    })
}

/// Submission acknowledgement carrying `link`.
pub fn accepted(link: &str) -> Reply {
    let mut body = job_json("1", Some("My Job"), "pending");
    body["link"] = json!(link);
    Reply::json(202, body)
}

pub fn in_progress() -> Reply {
    Reply::json(202, job_json("1", Some("My Job"), "started"))
}

pub fn succeeded() -> Reply {
    let mut body = job_json("1", Some("My Job"), "success");
    body["assets"] = json!([asset_json()]);
    Reply::json(201, body)
}
