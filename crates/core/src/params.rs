//! Optional parameter construction.
//!
//! Query strings and request bodies throughout the client are built from
//! a list of named values where some are absent. Absent means JSON `null`
//! (which is what `Option::None` serializes to); falsy values such as `0`,
//! `false` and `""` are kept.

use serde_json::{Map, Value};

/// A map of present, named parameter values.
pub type Params = Map<String, Value>;

/// Keep only the entries whose value is not `null`.
///
/// Insertion order is preserved.
pub fn construct_params<K, I>(args: I) -> Params
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    args.into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.into(), value))
        .collect()
}
