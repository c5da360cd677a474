//! Item domain model and factory.
//!
//! # Responsibility
//! - Define the canonical task record persisted under the `todos` key.
//! - Generate compact, collision-resistant item identifiers.
//!
//! # Invariants
//! - `id` and `created_at` are set once in `create_item` and never change.
//! - `created_at` carries millisecond precision so the textual form
//!   round-trips exactly.
//! - The factory never validates titles; callers go through
//!   `model::title::validate_title` first.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one task item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = String;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
/// Fixed width of the random suffix; 36^13 exceeds `u64::MAX`.
const RANDOM_SUFFIX_WIDTH: usize = 13;

/// Canonical task record.
///
/// Serialized with camelCase keys (`createdAt`) to match the stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Sole lookup key for toggle/delete.
    pub id: ItemId,
    /// Display text. Not re-validated by the core.
    pub title: String,
    /// Missing values in stored data decode as `false`.
    #[serde(default)]
    pub completed: bool,
    /// Creation instant, stored as ISO-8601 UTC with milliseconds.
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Returns a copy with `completed` inverted and every other field kept.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Builds a new incomplete item with a generated ID.
///
/// The title is trimmed but otherwise accepted as-is.
pub fn create_item(title: &str) -> Item {
    Item {
        id: generate_item_id(),
        title: title.trim().to_string(),
        completed: false,
        created_at: Utc::now().trunc_subsecs(3),
    }
}

/// Generates a compact item ID: base-36 epoch millis followed by a
/// fixed-width base-36 random suffix.
pub fn generate_item_id() -> ItemId {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let bits = Uuid::new_v4().as_u128();
    let random = ((bits >> 64) as u64) ^ (bits as u64);

    let mut id = to_base36(millis);
    let suffix = to_base36(random);
    for _ in suffix.len()..RANDOM_SUFFIX_WIDTH {
        id.push('0');
    }
    id.push_str(&suffix);
    id
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // Digits are drawn from an ASCII table.
    String::from_utf8(digits).unwrap_or_default()
}

/// Serde adapter rendering timestamps like `2024-01-01T00:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|err| serde::de::Error::custom(format!("invalid createdAt `{raw}`: {err}")))
    }
}
