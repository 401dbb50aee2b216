//! Deserialisation helpers for provider payloads.

use serde::{Deserialize, Deserializer};

/// Deserialise a string that providers sometimes send as `null`.
pub(crate) fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
