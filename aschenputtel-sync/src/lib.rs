//! # aschenputtel-sync
//!
//! Suffix-normalized indexing, set reconciliation and plan execution.
//!
//! Call [`planner::plan`] with a validated [`SyncConfig`](aschenputtel_core::SyncConfig)
//! to compute a [`SyncPlan`], then [`executor::execute`] to apply it.

pub mod diff;
pub mod error;
pub mod executor;
pub mod index;
pub mod planner;

pub use diff::{missing_from_source, missing_from_target, CopyCandidate};
pub use error::SyncError;
pub use executor::{execute, execute_with, ActionResult};
pub use index::{gather, PathIndex};
pub use planner::{plan, plan_copy, plan_delete, SyncPlan};
