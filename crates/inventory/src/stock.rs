//! Stock-level predicates and aggregate statistics over grouped rows.

use serde::{Deserialize, Serialize};

use crate::group::GroupedItem;

/// Reorder threshold used when a group carries no `reorder_level` of its own.
pub const DEFAULT_REORDER_LEVEL: f64 = 5.0;

/// Low-stock rules shared by filtering and statistics.
///
/// Every low-stock decision in the crate goes through this type so the filter
/// and the counters can never disagree on the fallback threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPolicy {
    default_reorder_level: f64,
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self {
            default_reorder_level: DEFAULT_REORDER_LEVEL,
        }
    }
}

impl StockPolicy {
    pub fn new(default_reorder_level: f64) -> Self {
        Self {
            default_reorder_level,
        }
    }

    pub fn default_reorder_level(&self) -> f64 {
        self.default_reorder_level
    }

    /// The group's own reorder level, or the policy fallback.
    pub fn reorder_level(&self, group: &GroupedItem) -> f64 {
        group.reorder_level.unwrap_or(self.default_reorder_level)
    }

    /// `0 < total <= reorder level`.
    pub fn is_low_stock(&self, group: &GroupedItem) -> bool {
        group.total_quantity > 0.0 && group.total_quantity <= self.reorder_level(group)
    }

    pub fn is_out_of_stock(&self, group: &GroupedItem) -> bool {
        group.total_quantity <= 0.0
    }

    /// Predicate behind the "low stock only" filter: low stock, or exactly empty.
    pub fn needs_restock(&self, group: &GroupedItem) -> bool {
        self.is_low_stock(group) || group.total_quantity == 0.0
    }

    pub fn low_stock_count(&self, groups: &[GroupedItem]) -> usize {
        groups.iter().filter(|g| self.is_low_stock(g)).count()
    }

    pub fn out_of_stock_count(&self, groups: &[GroupedItem]) -> usize {
        groups.iter().filter(|g| self.is_out_of_stock(g)).count()
    }
}

/// [`StockPolicy::is_low_stock`] under the default policy.
pub fn is_low_stock(group: &GroupedItem) -> bool {
    StockPolicy::default().is_low_stock(group)
}

/// [`StockPolicy::is_out_of_stock`] under the default policy.
pub fn is_out_of_stock(group: &GroupedItem) -> bool {
    StockPolicy::default().is_out_of_stock(group)
}

/// Sum of `total_quantity * cost_per_unit`. Non-finite inputs propagate.
pub fn total_value(groups: &[GroupedItem]) -> f64 {
    groups
        .iter()
        .fold(0.0, |acc, g| acc + g.total_quantity * g.cost_per_unit)
}

/// Summary counters for the stats panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub group_count: usize,
    pub batch_count: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub total_value: f64,
}

impl InventoryStats {
    pub fn compute(groups: &[GroupedItem], policy: &StockPolicy) -> Self {
        Self {
            group_count: groups.len(),
            batch_count: groups.iter().map(|g| g.batch_count).sum(),
            low_stock_count: policy.low_stock_count(groups),
            out_of_stock_count: policy.out_of_stock_count(groups),
            total_value: total_value(groups),
        }
    }
}
