use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use stockroom_core::RecordId;

use crate::group::group_key;

/// One inventory row as supplied by the data source (a single batch).
///
/// Deserialization is lenient: a record missing `name` or `category` still loads
/// (with empty strings), and an unparsable `updatedAt` loads as absent. Fields
/// the pipeline does not model are kept in `extra` so they remain sortable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<f64>,
    #[serde(default, with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl InventoryRecord {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            quantity,
            unit: String::new(),
            cost_per_unit: 0.0,
            reorder_level: None,
            updated_at: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_cost_per_unit(mut self, cost_per_unit: f64) -> Self {
        self.cost_per_unit = cost_per_unit;
        self
    }

    pub fn with_reorder_level(mut self, reorder_level: f64) -> Self {
        self.reorder_level = Some(reorder_level);
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn with_extra(mut self, field: impl Into<String>, value: JsonValue) -> Self {
        self.extra.insert(field.into(), value);
        self
    }

    /// Grouping key for this record (see [`group_key`]).
    pub fn group_key(&self) -> String {
        group_key(&self.name, &self.category)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `updatedAt` accepts RFC 3339 strings, bare dates, or epoch milliseconds.
/// Anything else degrades to `None` with a warning instead of rejecting the row.
mod lenient_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value as JsonValue;

    use stockroom_core::parse_timestamp;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<JsonValue>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => match parse_timestamp(&s) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unparsable updatedAt");
                    None
                }
            },
            Some(JsonValue::Number(n)) => {
                let ts = n.as_i64().and_then(DateTime::from_timestamp_millis);
                if ts.is_none() {
                    tracing::warn!(value = %n, "ignoring non-integer or out-of-range epoch updatedAt");
                }
                ts
            }
            Some(other) => {
                tracing::warn!(value = %other, "ignoring non-timestamp updatedAt");
                None
            }
        })
    }
}
