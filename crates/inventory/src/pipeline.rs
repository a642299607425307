use serde::Serialize;

use stockroom_core::DomainResult;

use crate::config::InventorySettings;
use crate::filter::{filter_groups, FilterSpec};
use crate::group::{group_records, GroupedItem};
use crate::record::InventoryRecord;
use crate::sort::{sort_groups, SortSpec};
use crate::source::InventorySource;
use crate::stock::{InventoryStats, StockPolicy};

/// Grouping → filtering → sorting, with one stock policy for every stage.
///
/// Stateless apart from the policy: each call derives fresh groups, so the
/// same records always produce equal output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InventoryPipeline {
    policy: StockPolicy,
}

/// Rows for the table/card views plus counters for the stats panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    /// Filtered and sorted groups.
    pub groups: Vec<GroupedItem>,
    /// Computed over every group, before filtering.
    pub stats: InventoryStats,
}

impl InventoryPipeline {
    pub fn new(policy: StockPolicy) -> Self {
        Self { policy }
    }

    pub fn from_settings(settings: &InventorySettings) -> Self {
        Self::new(settings.stock_policy())
    }

    pub fn policy(&self) -> &StockPolicy {
        &self.policy
    }

    /// `sort(filter(group(records)))`.
    pub fn run(&self, records: &[InventoryRecord], filter: &FilterSpec, sort: &SortSpec) -> Vec<GroupedItem> {
        let grouped = group_records(records);
        self.refine(records.len(), grouped, filter, sort)
    }

    pub fn view(&self, records: &[InventoryRecord], filter: &FilterSpec, sort: &SortSpec) -> InventoryView {
        let grouped = group_records(records);
        let stats = InventoryStats::compute(&grouped, &self.policy);
        let groups = self.refine(records.len(), grouped, filter, sort);
        InventoryView { groups, stats }
    }

    /// Pull records from `source`, then build the view.
    pub fn view_from(
        &self,
        source: &dyn InventorySource,
        filter: &FilterSpec,
        sort: &SortSpec,
    ) -> DomainResult<InventoryView> {
        let records = source.records()?;
        Ok(self.view(&records, filter, sort))
    }

    fn refine(
        &self,
        record_count: usize,
        grouped: Vec<GroupedItem>,
        filter: &FilterSpec,
        sort: &SortSpec,
    ) -> Vec<GroupedItem> {
        let group_count = grouped.len();
        let filtered = filter_groups(grouped, filter, &self.policy);
        let visible = filtered.len();
        let sorted = sort_groups(filtered, sort);

        tracing::debug!(
            records = record_count,
            groups = group_count,
            visible,
            sort_field = sort.field.as_str(),
            sort_direction = ?sort.direction,
            "derived inventory rows"
        );

        sorted
    }
}
