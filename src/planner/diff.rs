//! Diff engine for comparing the controller's member list with the
//! resolved one.
//!
//! The old list is sorted numerically and aligned against the new list,
//! producing one row per member. Both lists are sorted, so members common to
//! both act as anchors. Between two anchors every removal is listed before
//! every addition (`ndiff` can interleave them or put an addition first;
//! the rows and the change count are the same either way).

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use tracing::debug;

use crate::controller::FirewallGroup;
use crate::resolver::HostIpMap;

/// Engine for computing member list diffs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffEngine;

/// What happens to a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiffAction {
    /// Present before and after.
    Keep,
    /// Only in the new list.
    Add,
    /// Only in the old list.
    Remove,
}

/// A single member row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    /// Action taken for the member.
    pub action: DiffAction,
    /// Member address as stored on the controller.
    pub ip: String,
    /// Hostname that resolved to the address, if known.
    pub hostname: Option<String>,
}

/// Complete diff result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiffReport {
    /// Rows in alignment order.
    pub rows: Vec<DiffRow>,
    /// Number of `Add` and `Remove` rows.
    pub changes: usize,
}

/// Sort key for a member entry.
///
/// Plain addresses and CIDR networks order numerically; anything else
/// sorts after them, lexically.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum MemberKey<'a> {
    Network(Ipv4Addr, u8),
    Other(&'a str),
}

fn member_key(member: &str) -> MemberKey<'_> {
    let (addr, prefix) = match member.split_once('/') {
        Some((addr, prefix)) => (addr, prefix.parse::<u8>().ok()),
        None => (member, Some(32)),
    };

    match (addr.parse::<Ipv4Addr>(), prefix) {
        (Ok(ip), Some(prefix)) if prefix <= 32 => MemberKey::Network(ip, prefix),
        _ => MemberKey::Other(member),
    }
}

/// Orders two member entries numerically.
#[must_use]
pub fn compare_members(a: &str, b: &str) -> Ordering {
    member_key(a).cmp(&member_key(b))
}

/// Returns a numerically sorted copy of a member list.
#[must_use]
pub fn sorted_members(members: &[String]) -> Vec<String> {
    let mut sorted = members.to_vec();
    sorted.sort_by(|a, b| compare_members(a, b));
    sorted
}

impl DiffEngine {
    /// Creates a new diff engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the diff between the current and desired groups.
    ///
    /// Hostnames are attached to every row whose address the resolver saw.
    #[must_use]
    pub fn compute(
        &self,
        current: &FirewallGroup,
        desired: &FirewallGroup,
        hosts: &HostIpMap,
    ) -> DiffReport {
        let old = sorted_members(&current.group_members);
        let aligned = Self::align(&old, &desired.group_members);

        let rows: Vec<DiffRow> = aligned
            .into_iter()
            .map(|(action, ip)| DiffRow {
                action,
                ip: ip.to_string(),
                hostname: hosts.hostname(ip).map(String::from),
            })
            .collect();

        let changes = rows
            .iter()
            .filter(|row| row.action != DiffAction::Keep)
            .count();
        debug!("Member diff: {} rows, {} changes", rows.len(), changes);

        DiffReport { rows, changes }
    }

    /// Aligns two sorted sequences on their common members.
    ///
    /// An old entry is kept when it still appears at or after the current
    /// position in `new`; otherwise it is removed. New entries skipped on
    /// the way to the next kept entry are added after the removals. Runs in
    /// linear time and memory; for sorted, duplicate-free inputs the result
    /// is a longest common subsequence.
    fn align<'a>(old: &'a [String], new: &'a [String]) -> Vec<(DiffAction, &'a str)> {
        let positions: HashMap<&str, usize> = new
            .iter()
            .enumerate()
            .map(|(index, ip)| (ip.as_str(), index))
            .collect();

        let mut out = Vec::with_capacity(old.len() + new.len());
        let mut j = 0;
        for ip in old {
            match positions.get(ip.as_str()) {
                Some(&index) if index >= j => {
                    out.extend(new[j..index].iter().map(|ip| (DiffAction::Add, ip.as_str())));
                    out.push((DiffAction::Keep, ip.as_str()));
                    j = index + 1;
                }
                _ => out.push((DiffAction::Remove, ip.as_str())),
            }
        }
        out.extend(new[j..].iter().map(|ip| (DiffAction::Add, ip.as_str())));
        out
    }
}

impl DiffReport {
    /// Returns true if there are any changes.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.changes > 0
    }

    /// Number of rows with the given action.
    #[must_use]
    pub fn count(&self, action: DiffAction) -> usize {
        self.rows.iter().filter(|row| row.action == action).count()
    }
}

impl std::fmt::Display for DiffAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Keep => "Keep",
            Self::Add => "Add",
            Self::Remove => "Remove",
        };
        write!(f, "{s}")
    }
}
