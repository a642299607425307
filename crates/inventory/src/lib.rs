//! Inventory derivation pipeline.
//!
//! This crate turns the flat record list supplied by a data source into the
//! grouped, filtered and sorted rows shown by the back-office views, implemented
//! purely as deterministic domain logic (no IO beyond the optional file source,
//! no HTTP, no storage).
//!
//! Stages run in a fixed order: [`group_records`] → [`filter_groups`] →
//! [`sort_groups`]. [`InventoryPipeline`] wires them together with a
//! [`StockPolicy`].

pub mod config;
pub mod filter;
pub mod group;
pub mod pipeline;
pub mod record;
pub mod sort;
pub mod source;
pub mod stock;
pub mod target;

pub use config::InventorySettings;
pub use filter::{filter_groups, CategoryFilter, FilterSpec};
pub use group::{group_key, group_records, GroupedItem};
pub use pipeline::{InventoryPipeline, InventoryView};
pub use record::InventoryRecord;
pub use sort::{
    compare_values, sort_groups, CompareMode, SortDirection, SortField, SortSpec, SortValue,
    ValueComparator,
};
pub use source::{records_from_json, InMemorySource, InventorySource, JsonFileSource};
pub use stock::{
    is_low_stock, is_out_of_stock, total_value, InventoryStats, StockPolicy, DEFAULT_REORDER_LEVEL,
};
pub use target::{delete_target, edit_target};
