//! Planning module for firewall group updates.
//!
//! This module builds the desired group from the resolved addresses and
//! computes the member diff shown to the operator before applying.

mod diff;
mod plan;

pub use diff::{compare_members, sorted_members, DiffAction, DiffEngine, DiffReport, DiffRow};
pub use plan::{build_desired_group, SyncPlan};
