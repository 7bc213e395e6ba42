//! Async client for the Metafold compute API.
//!
//! Submits declarative jobs to the server, polls their status links until
//! they finish, and returns normalized job records with their generated
//! assets. Also wraps the asset and user account endpoints.
//!
//! ```no_run
//! # async fn example() -> metafold_client::ClientResult<()> {
//! use metafold_client::{ClientConfig, JobSubmission, MetafoldClient};
//! use serde_json::json;
//!
//! let client = MetafoldClient::new(ClientConfig::new("token", "project-id"))?;
//! let job = client
//!     .jobs()
//!     .run(&JobSubmission::new("sample_triangle_mesh", json!({"max_resolution": 256})))
//!     .await?;
//! println!("{} produced {} assets", job.id, job.assets.len());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod client;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod jobs;
pub mod poller;
pub mod transport;
pub mod user;

pub use client::MetafoldClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use jobs::ListParams;
pub use metafold_core::asset::Asset;
pub use metafold_core::job::{Job, JobState, JobSubmission};
pub use poller::PollOptions;
