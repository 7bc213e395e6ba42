//! User account metadata: license, remaining quota and lifetime usage.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// License information for the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(with = "crate::timestamp")]
    pub issued: Timestamp,
    #[serde(with = "crate::timestamp")]
    pub expires: Timestamp,
    pub expired: bool,
    /// Name of the license tier.
    pub product: String,
}

/// Remaining usage counts. Negative values are passed through as the
/// server sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    pub project: i64,
    pub import: i64,
    pub export: i64,
    pub simulation: i64,
}

/// Lifetime usage counts. Same shape as [`Quota`].
pub type Usage = Quota;
