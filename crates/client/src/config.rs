use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.metafold3d.com";

/// Per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cadence of job status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// How long `run` waits for a job to reach a terminal state (2 minutes).
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_millis(120_000);

/// Client configuration.
///
/// Fixed at client construction and shared read-only by every request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API secret key, sent as a bearer token.
    pub access_token: String,
    /// Project that job and asset calls are scoped to.
    pub project_id: String,
    /// API base URL (default: [`DEFAULT_BASE_URL`]).
    pub base_url: String,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub run_timeout: Duration,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the credentials.
    pub fn new(access_token: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            project_id: project_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            run_timeout: DEFAULT_RUN_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load configuration from environment variables, reading a `.env`
    /// file first if one is present.
    ///
    /// | Env Var                         | Default                      |
    /// |---------------------------------|------------------------------|
    /// | `METAFOLD_ACCESS_TOKEN`         | required                     |
    /// | `METAFOLD_PROJECT_ID`           | required                     |
    /// | `METAFOLD_BASE_URL`             | `https://api.metafold3d.com` |
    /// | `METAFOLD_REQUEST_TIMEOUT_SECS` | `30`                         |
    /// | `METAFOLD_POLL_INTERVAL_MS`     | `1000`                       |
    /// | `METAFOLD_RUN_TIMEOUT_MS`       | `120000`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let number = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key,
                    value: raw.clone(),
                }),
                None => Ok(default),
            }
        };

        let access_token = required("METAFOLD_ACCESS_TOKEN")?;
        let project_id = required("METAFOLD_PROJECT_ID")?;
        let base_url = lookup("METAFOLD_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let request_timeout = Duration::from_secs(number(
            "METAFOLD_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
        )?);
        let poll_interval = Duration::from_millis(number(
            "METAFOLD_POLL_INTERVAL_MS",
            DEFAULT_POLL_INTERVAL.as_millis() as u64,
        )?);
        let run_timeout = Duration::from_millis(number(
            "METAFOLD_RUN_TIMEOUT_MS",
            DEFAULT_RUN_TIMEOUT.as_millis() as u64,
        )?);

        if poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                key: "METAFOLD_POLL_INTERVAL_MS",
                value: "0".into(),
            });
        }

        Ok(Self {
            access_token,
            project_id,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout,
            poll_interval,
            run_timeout,
        })
    }
}

/// Errors from loading [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}
