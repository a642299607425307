//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory
//! pipeline and its collaborators (no IO, no logging setup).

pub mod error;
pub mod id;
pub mod time;

pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use time::parse_timestamp;
