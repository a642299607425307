use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use feruca::{Collator, Locale, Tailoring};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockroom_core::DomainError;

use crate::group::GroupedItem;

/// Column a group list can be sorted by.
///
/// Parsed from the field names the table header sends. Names that match no
/// modeled column become [`SortField::Other`] and read from the group's extra
/// fields; they never fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortField {
    #[default]
    Name,
    Category,
    Unit,
    CostPerUnit,
    ReorderLevel,
    TotalQuantity,
    BatchCount,
    LatestUpdate,
    /// First constituent id.
    Id,
    Other(String),
}

impl SortField {
    pub fn as_str(&self) -> &str {
        match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::Unit => "unit",
            SortField::CostPerUnit => "costPerUnit",
            SortField::ReorderLevel => "reorderLevel",
            SortField::TotalQuantity => "totalQuantity",
            SortField::BatchCount => "batchCount",
            SortField::LatestUpdate => "latestUpdate",
            SortField::Id => "id",
            SortField::Other(name) => name,
        }
    }

    /// Extract this field's value from a group.
    pub fn value_of(&self, group: &GroupedItem) -> SortValue {
        match self {
            SortField::Name => SortValue::Text(group.name.clone()),
            SortField::Category => SortValue::Text(group.category.clone()),
            SortField::Unit => SortValue::Text(group.unit.clone()),
            SortField::CostPerUnit => SortValue::Number(group.cost_per_unit),
            SortField::ReorderLevel => group
                .reorder_level
                .map_or(SortValue::Missing, SortValue::Number),
            SortField::TotalQuantity => SortValue::Number(group.total_quantity),
            SortField::BatchCount => SortValue::Number(group.batch_count as f64),
            SortField::LatestUpdate => group.latest_update.map_or(SortValue::Missing, SortValue::Time),
            SortField::Id => group
                .ids
                .first()
                .map_or(SortValue::Missing, |id| SortValue::Text(id.as_str().to_string())),
            SortField::Other(name) => group
                .extra
                .get(name)
                .map_or(SortValue::Missing, SortValue::from_json),
        }
    }
}

impl From<&str> for SortField {
    fn from(value: &str) -> Self {
        match value {
            "name" => SortField::Name,
            "category" => SortField::Category,
            "unit" => SortField::Unit,
            "costPerUnit" => SortField::CostPerUnit,
            "reorderLevel" => SortField::ReorderLevel,
            "totalQuantity" | "quantity" => SortField::TotalQuantity,
            "batchCount" => SortField::BatchCount,
            "latestUpdate" | "updatedAt" => SortField::LatestUpdate,
            "id" => SortField::Id,
            other => SortField::Other(other.to_string()),
        }
    }
}

impl From<String> for SortField {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<SortField> for String {
    fn from(value: SortField) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(DomainError::validation(format!(
                "sort direction must be asc or desc, got {s:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<SortField>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<SortField>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<SortField>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// A sortable field value.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Missing,
    Text(String),
    Number(f64),
    Time(DateTime<Utc>),
    /// Anything else (booleans, nested JSON); compared by its string form.
    Other(String),
}

impl SortValue {
    fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => SortValue::Missing,
            JsonValue::String(s) => SortValue::Text(s.clone()),
            JsonValue::Number(n) => n
                .as_f64()
                .map_or_else(|| SortValue::Other(n.to_string()), SortValue::Number),
            other => SortValue::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortValue::Missing => Ok(()),
            SortValue::Text(s) | SortValue::Other(s) => f.write_str(s),
            SortValue::Number(n) => write!(f, "{n}"),
            SortValue::Time(t) => f.write_str(&t.to_rfc3339()),
        }
    }
}

/// How the values of one sorted column are compared.
///
/// Chosen once per column: when every present value has the same kind they
/// compare natively, otherwise every pair compares by string form. Either way
/// the comparator is a total order over the column.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompareMode {
    Native,
    StringForm,
}

impl CompareMode {
    pub fn for_column<'a>(values: impl IntoIterator<Item = &'a SortValue>) -> Self {
        let mut kinds = values.into_iter().filter_map(SortValue::kind);
        match kinds.next() {
            None => CompareMode::Native,
            Some(ValueKind::Other) => CompareMode::StringForm,
            Some(first) if kinds.all(|k| k == first) => CompareMode::Native,
            Some(_) => CompareMode::StringForm,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ValueKind {
    Text,
    Number,
    Time,
    Other,
}

impl SortValue {
    fn kind(&self) -> Option<ValueKind> {
        match self {
            SortValue::Missing => None,
            SortValue::Text(_) => Some(ValueKind::Text),
            SortValue::Number(_) => Some(ValueKind::Number),
            SortValue::Time(_) => Some(ValueKind::Time),
            SortValue::Other(_) => Some(ValueKind::Other),
        }
    }
}

/// Compares field values for one sort pass.
///
/// Missing values sort first ascending (last descending). Text compares
/// case-insensitively with root-locale collation, numbers numerically with NaN
/// ranked right after missing values, timestamps by calendar time. String-form
/// comparison collates at full strength, so strings differing only in case put
/// lowercase first.
pub struct ValueComparator {
    collator: Collator,
    mode: CompareMode,
    direction: SortDirection,
}

impl ValueComparator {
    pub fn new(mode: CompareMode, direction: SortDirection) -> Self {
        Self {
            collator: Collator::new(Tailoring::Cldr(Locale::Root), false, false),
            mode,
            direction,
        }
    }

    pub fn for_column(values: &[SortValue], direction: SortDirection) -> Self {
        Self::new(CompareMode::for_column(values), direction)
    }

    pub fn mode(&self) -> CompareMode {
        self.mode
    }

    pub fn compare(&mut self, a: &SortValue, b: &SortValue) -> Ordering {
        let ordering = match (a, b) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => Ordering::Less,
            (_, SortValue::Missing) => Ordering::Greater,
            _ if self.mode == CompareMode::StringForm => self.collate(&a.to_string(), &b.to_string()),
            (SortValue::Text(x), SortValue::Text(y)) => {
                self.collate(&x.to_lowercase(), &y.to_lowercase())
            }
            (SortValue::Number(x), SortValue::Number(y)) => compare_numbers(*x, *y),
            (SortValue::Time(x), SortValue::Time(y)) => x.cmp(y),
            (x, y) => self.collate(&x.to_string(), &y.to_string()),
        };
        self.direction.apply(ordering)
    }

    fn collate(&mut self, a: &str, b: &str) -> Ordering {
        self.collator.collate(a, b)
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compare two values as if they were the whole column, then apply `direction`.
pub fn compare_values(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    ValueComparator::new(CompareMode::for_column([a, b]), direction).compare(a, b)
}

/// Stable sort of groups by `spec`. Ties keep their input order.
pub fn sort_groups(groups: Vec<GroupedItem>, spec: &SortSpec) -> Vec<GroupedItem> {
    let (values, groups): (Vec<SortValue>, Vec<GroupedItem>) = groups
        .into_iter()
        .map(|g| (spec.field.value_of(&g), g))
        .unzip();

    let mut comparator = ValueComparator::for_column(&values, spec.direction);
    let mut keyed: Vec<(SortValue, GroupedItem)> = values.into_iter().zip(groups).collect();

    keyed.sort_by(|(a, _), (b, _)| comparator.compare(a, b));

    keyed.into_iter().map(|(_, g)| g).collect()
}
