//! Data models
//!
//! Records of the remote fleet-management API, with the wire's camelCase
//! field names. Optional fields the server may omit or send as `null`
//! deserialize to empty values so nothing downstream sees a missing field.

pub mod add_in_data;
pub mod zone;
pub mod zone_type;

// Re-exports
pub use add_in_data::*;
pub use zone::*;
pub use zone_type::*;

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
