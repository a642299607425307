use serde::{Deserialize, Serialize};

use crate::group::GroupedItem;
use crate::stock::StockPolicy;

/// Category selector; `"all"` disables the category criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive match on the stored category.
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => CategoryFilter::ALL.to_string(),
            CategoryFilter::Only(c) => c,
        }
    }
}

/// Filter criteria for the inventory table. All active criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against name or category.
    pub search_query: String,
    pub category: CategoryFilter,
    /// Keep only low-stock or empty groups.
    pub low_stock_only: bool,
}

impl FilterSpec {
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn in_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn low_stock_only(mut self, enabled: bool) -> Self {
        self.low_stock_only = enabled;
        self
    }

    /// Returns true if no filter criteria are active.
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty() && self.category == CategoryFilter::All && !self.low_stock_only
    }

    pub fn matches_search(&self, group: &GroupedItem) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let q = self.search_query.to_lowercase();
        group.name.to_lowercase().contains(&q) || group.category.to_lowercase().contains(&q)
    }

    pub fn matches_category(&self, group: &GroupedItem) -> bool {
        self.category.matches(&group.category)
    }

    pub fn matches_stock(&self, group: &GroupedItem, policy: &StockPolicy) -> bool {
        !self.low_stock_only || policy.needs_restock(group)
    }

    /// Returns true if the group satisfies all active filter criteria.
    pub fn matches(&self, group: &GroupedItem, policy: &StockPolicy) -> bool {
        self.matches_search(group) && self.matches_category(group) && self.matches_stock(group, policy)
    }

    /// Apply this filter to borrowed groups, cloning the survivors in order.
    pub fn apply(&self, groups: &[GroupedItem], policy: &StockPolicy) -> Vec<GroupedItem> {
        groups
            .iter()
            .filter(|g| self.matches(g, policy))
            .cloned()
            .collect()
    }
}

/// Keep the groups matching `spec`, preserving their relative order.
pub fn filter_groups(
    mut groups: Vec<GroupedItem>,
    spec: &FilterSpec,
    policy: &StockPolicy,
) -> Vec<GroupedItem> {
    if !spec.is_empty() {
        groups.retain(|g| spec.matches(g, policy));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_records;
    use crate::record::InventoryRecord;
    use proptest::prelude::*;

    fn groups(rows: &[(&str, &str, f64)]) -> Vec<GroupedItem> {
        let records: Vec<InventoryRecord> = rows
            .iter()
            .enumerate()
            .map(|(i, (n, c, q))| InventoryRecord::new(i.to_string(), *n, *c, *q))
            .collect();
        group_records(&records)
    }

    fn names(groups: &[GroupedItem]) -> Vec<&str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn empty_spec_keeps_everything() {
        let input = groups(&[("Leeks", "Produce", 1.0), ("Rice", "Dry Goods", 40.0)]);
        let out = filter_groups(input.clone(), &FilterSpec::default(), &StockPolicy::default());
        assert_eq!(out, input);
    }

    #[test]
    fn search_matches_name_or_category_case_insensitively() {
        let input = groups(&[
            ("Tomato Sauce", "Sauces", 10.0),
            ("Potato", "Produce", 10.0),
            ("Lime", "PRODUCE", 10.0),
        ]);
        let policy = StockPolicy::default();

        let out = filter_groups(input.clone(), &FilterSpec::default().search("toma"), &policy);
        assert_eq!(names(&out), vec!["Tomato Sauce"]);

        let out = filter_groups(input, &FilterSpec::default().search("produce"), &policy);
        assert_eq!(names(&out), vec!["Potato", "Lime"]);
    }

    #[test]
    fn category_match_is_exact_and_case_sensitive() {
        let input = groups(&[("Potato", "Produce", 10.0), ("Lime", "PRODUCE", 10.0)]);
        let out = filter_groups(
            input,
            &FilterSpec::default().in_category("Produce"),
            &StockPolicy::default(),
        );
        assert_eq!(names(&out), vec!["Potato"]);
    }

    #[test]
    fn low_stock_keeps_low_and_empty_groups() {
        let input = groups(&[
            ("Cumin", "Spices", 0.0),
            ("Paprika", "Spices", 3.0),
            ("Pepper", "Spices", 20.0),
        ]);
        let out = filter_groups(
            input,
            &FilterSpec::default().low_stock_only(true),
            &StockPolicy::default(),
        );
        assert_eq!(names(&out), vec!["Cumin", "Paprika"]);
    }

    #[test]
    fn category_filter_round_trips_all_sentinel() {
        let spec: FilterSpec = serde_json::from_str(
            r#"{"searchQuery":"","category":"all","lowStockOnly":true}"#,
        )
        .unwrap();
        assert_eq!(spec.category, CategoryFilter::All);
        assert!(spec.low_stock_only);

        let only: CategoryFilter = serde_json::from_str("\"Dairy\"").unwrap();
        assert_eq!(only, CategoryFilter::Only("Dairy".to_string()));
        assert_eq!(serde_json::to_string(&CategoryFilter::All).unwrap(), "\"all\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a group survives iff it passes each criterion on its own,
        /// and survivors keep their input order.
        #[test]
        fn filter_is_order_preserving_conjunction(
            rows in prop::collection::vec(
                (
                    prop::sample::select(vec!["Tomato", "Potato", "Basil", "Salt"]),
                    prop::sample::select(vec!["Produce", "Herbs", "Dry Goods"]),
                    0u32..12,
                ),
                0..30,
            ),
            query in prop::sample::select(vec!["", "to", "BAS", "herb", "zzz"]),
            category in prop::sample::select(vec!["all", "Produce", "Herbs"]),
            low in any::<bool>(),
        ) {
            let rows: Vec<(&str, &str, f64)> =
                rows.iter().map(|(n, c, q)| (*n, *c, f64::from(*q))).collect();
            let input = groups(&rows);
            let spec = FilterSpec::default().search(query).in_category(category).low_stock_only(low);
            let policy = StockPolicy::default();

            let out = filter_groups(input.clone(), &spec, &policy);

            let expected: Vec<GroupedItem> = input
                .iter()
                .filter(|g| {
                    let search = FilterSpec::default().search(query).matches(g, &policy);
                    let cat = FilterSpec::default().in_category(category).matches(g, &policy);
                    let stock = FilterSpec::default().low_stock_only(low).matches(g, &policy);
                    search && cat && stock
                })
                .cloned()
                .collect();
            prop_assert_eq!(&out, &expected);
            prop_assert_eq!(spec.apply(&input, &policy), expected);
        }
    }
}
