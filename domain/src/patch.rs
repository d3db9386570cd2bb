//! Serde support for partial updates.
use serde::{Deserialize, Deserializer};

/// Deserializer for `Option<Option<T>>` patch fields, used together with
/// `#[serde(default)]`: an absent key stays `None`, an explicit JSON `null`
/// becomes `Some(None)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
