//! Serde helpers shared by the resource types.

use serde::{Deserialize, Deserializer};

/// Deserialize an explicit `null` as the type's default.
///
/// The API returns `null` for some list, map and flag fields that are
/// otherwise always present.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
