//! Sync plan construction.
//!
//! A plan pairs the group fetched from the controller with the group that
//! should replace it, plus the diff between the two.

use crate::controller::FirewallGroup;
use crate::resolver::HostIpMap;

use super::diff::{DiffEngine, DiffReport};

/// A complete sync plan.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    /// Group as fetched from the controller, untouched.
    pub current: FirewallGroup,
    /// Group to push: `current` with the resolved member list.
    pub desired: FirewallGroup,
    /// Member diff between `current` and `desired`.
    pub diff: DiffReport,
}

/// Builds the group to push from the fetched snapshot.
///
/// Members are the resolved addresses in ascending numeric order; every
/// other field is copied from `current`.
#[must_use]
pub fn build_desired_group(current: &FirewallGroup, hosts: &HostIpMap) -> FirewallGroup {
    current.with_members(hosts.members())
}

impl SyncPlan {
    /// Creates a plan from the fetched group and the resolved addresses.
    #[must_use]
    pub fn new(current: FirewallGroup, hosts: &HostIpMap) -> Self {
        let desired = build_desired_group(&current, hosts);
        let diff = DiffEngine::new().compute(&current, &desired, hosts);
        Self {
            current,
            desired,
            diff,
        }
    }

    /// Returns true if applying the plan would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.diff.has_changes()
    }

    /// Number of member additions and removals.
    #[must_use]
    pub const fn change_count(&self) -> usize {
        self.diff.changes
    }
}
