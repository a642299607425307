use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockroom_core::RecordId;

use crate::record::InventoryRecord;

/// Grouping key: `lowercase(name) + "_" + lowercase(category)`.
///
/// Records missing both fields share the key `"_"` and therefore land in one
/// catch-all group.
pub fn group_key(name: &str, category: &str) -> String {
    format!("{}_{}", name.to_lowercase(), category.to_lowercase())
}

/// All batches of one product, merged by case-insensitive name + category.
///
/// Display fields (`name`, `category`, `unit`, `cost_per_unit`, `reorder_level`,
/// `extra`) come from the first record seen for the key; later records only
/// move the aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedItem {
    pub key: String,
    pub ids: Vec<RecordId>,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub cost_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<f64>,
    pub total_quantity: f64,
    /// Latest `updatedAt` among the batches; `None` only if no batch has one.
    pub latest_update: Option<DateTime<Utc>>,
    pub batch_count: usize,
    pub original_items: Vec<InventoryRecord>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, JsonValue>,
}

impl GroupedItem {
    fn seed(key: String, record: &InventoryRecord) -> Self {
        Self {
            key,
            ids: vec![record.id.clone()],
            name: record.name.clone(),
            category: record.category.clone(),
            unit: record.unit.clone(),
            cost_per_unit: record.cost_per_unit,
            reorder_level: record.reorder_level,
            total_quantity: record.quantity,
            latest_update: record.updated_at,
            batch_count: 1,
            original_items: vec![record.clone()],
            extra: record.extra.clone(),
        }
    }

    fn absorb(&mut self, record: &InventoryRecord) {
        self.ids.push(record.id.clone());
        self.total_quantity += record.quantity;
        self.batch_count += 1;
        self.original_items.push(record.clone());

        // `None < Some(_)`: an absent timestamp never displaces a present one.
        if record.updated_at > self.latest_update {
            self.latest_update = record.updated_at;
        }
    }
}

/// Group records by [`group_key`], preserving first-encounter order of keys.
///
/// Every record lands in exactly one group. Groups are rebuilt from scratch on
/// each call; nothing is cached between calls.
pub fn group_records(records: &[InventoryRecord]) -> Vec<GroupedItem> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut groups: Vec<GroupedItem> = Vec::new();

    for record in records {
        match index.entry(record.group_key()) {
            Entry::Occupied(slot) => groups[*slot.get()].absorb(record),
            Entry::Vacant(slot) => {
                let key = slot.key().clone();
                slot.insert(groups.len());
                groups.push(GroupedItem::seed(key, record));
            }
        }
    }

    groups
}
