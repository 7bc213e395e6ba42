//! Asset records: stored file artifacts uploaded by users or produced by
//! jobs.

use serde::{Deserialize, Serialize};

use crate::types::{ResourceId, Timestamp};

/// A stored file artifact, addressable by id and checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: ResourceId,
    pub filename: String,
    /// File size in bytes.
    pub size: u64,
    /// Content checksum, e.g. `sha256:<hex>`.
    pub checksum: String,
    #[serde(with = "crate::timestamp")]
    pub created: Timestamp,
    #[serde(with = "crate::timestamp")]
    pub modified: Timestamp,
}
