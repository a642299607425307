//! Which underlying record an action on a group touches.
//!
//! A group can hold several batches, so "edit this row" and "delete this row"
//! need a rule for picking one record:
//!
//! - edits go to the most recently updated batch (earliest-encountered on ties,
//!   including when no batch carries a timestamp);
//! - deletes go to the batch the caller names, or the first-encountered batch
//!   when none is named.

use stockroom_core::{DomainError, DomainResult, RecordId};

use crate::group::GroupedItem;
use crate::record::InventoryRecord;

/// The record an edit of `group` should modify.
pub fn edit_target(group: &GroupedItem) -> DomainResult<&InventoryRecord> {
    let mut items = group.original_items.iter();
    let first = items.next().ok_or_else(DomainError::not_found)?;

    Ok(items.fold(first, |best, candidate| {
        if candidate.updated_at > best.updated_at {
            candidate
        } else {
            best
        }
    }))
}

/// The record a delete of `group` should remove.
///
/// Naming a record that is not part of the group is `NotFound`.
pub fn delete_target<'a>(
    group: &'a GroupedItem,
    requested: Option<&RecordId>,
) -> DomainResult<&'a InventoryRecord> {
    match requested {
        Some(id) => group
            .original_items
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(DomainError::not_found),
        None => group.original_items.first().ok_or_else(DomainError::not_found),
    }
}
