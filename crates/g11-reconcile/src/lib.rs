//! g11-reconcile
//!
//! Sorted-sequence reconciliation for marker state.
//!
//! Given the previously rendered points and a freshly fetched batch, both
//! sorted under the same comparator, compute which items were added and which
//! were removed. Everything else (creating or destroying map overlays) belongs
//! to the caller.
//!
//! Identity is decided by the comparator alone. Two items comparing `Equal`
//! are the same item even when their other fields differ, so an attribute
//! change on an unchanged key is invisible to the diff.
//!
//! Deterministic, pure logic. No IO.

mod engine;
mod types;
mod validate;

pub use engine::{added_and_removed, reconcile, reconcile_by_key, reconcile_ord};
pub use types::*;
pub use validate::{reconcile_checked, validate_sorted_unique};
