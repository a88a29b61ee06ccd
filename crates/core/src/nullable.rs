//! Serde helpers for fields where an explicit `null` differs from absence.
//!
//! Use with `#[serde(default, deserialize_with = "...")]` on an
//! `Option<Option<T>>` field:
//!
//! - absent: `None` (leave the column alone)
//! - `null`: `Some(None)` (store NULL)
//! - value: `Some(Some(v))`

use serde::{Deserialize, Deserializer};

use crate::types::LooseText;

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Like [`deserialize`], but any JSON scalar is accepted as text.
pub fn loose_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LooseText>::deserialize(deserializer).map(|v| Some(v.map(LooseText::into_inner)))
}
