//! Domain types for the Metafold compute API.
//!
//! Pure data definitions and mapping helpers shared by the HTTP client:
//! job and asset records, user account metadata, timestamp normalization
//! and optional-parameter construction. Nothing in this crate performs I/O.

pub mod asset;
pub mod job;
pub mod params;
pub mod timestamp;
pub mod types;
pub mod user;
