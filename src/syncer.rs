//! Sync driver.
//!
//! Runs the pipeline `Resolve → Fetch → Diff → Confirm → Apply`. Every step
//! is awaited in order and the first error ends the run. Declining the
//! confirmation is a normal outcome, not an error.

use serde::Serialize;
use tracing::{debug, info};

use crate::controller::{apply_group, fetch_group, GroupStore};
use crate::error::Result;
use crate::planner::SyncPlan;
use crate::resolver::{resolve_hosts, HostIpMap, HostResolver};

/// Drives one sync run against a resolver and a group store.
pub struct Syncer<'a, R: ?Sized, S: ?Sized> {
    /// Hostname resolver.
    resolver: &'a R,
    /// Firewall group store.
    store: &'a S,
    /// Ask before applying.
    confirm: bool,
    /// Stop after computing the diff.
    dry_run: bool,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncOutcome {
    /// Controller already matches the host list.
    Unchanged,
    /// Changes were found but not applied because of `--dry-run`.
    DryRun {
        /// Number of member additions and removals.
        changes: usize,
    },
    /// The operator declined the update.
    Declined {
        /// Number of member additions and removals.
        changes: usize,
    },
    /// The updated group was pushed to the controller.
    Applied {
        /// Number of member additions and removals.
        changes: usize,
    },
}

impl<'a, R, S> Syncer<'a, R, S>
where
    R: HostResolver + ?Sized,
    S: GroupStore + ?Sized,
{
    /// Creates a new syncer that asks before applying.
    #[must_use]
    pub const fn new(resolver: &'a R, store: &'a S) -> Self {
        Self {
            resolver,
            store,
            confirm: true,
            dry_run: false,
        }
    }

    /// Sets whether to ask before applying.
    #[must_use]
    pub const fn with_confirm(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Resolves the hostnames into the desired address set.
    ///
    /// # Errors
    ///
    /// Returns the first lookup failure.
    pub async fn resolve(&self, hosts: &[String]) -> Result<HostIpMap> {
        let resolved = resolve_hosts(self.resolver, hosts).await?;
        debug!(
            "IPs from hostname list lookups:\n{}",
            serde_json::to_string_pretty(&resolved).unwrap_or_default()
        );
        Ok(resolved)
    }

    /// Fetches the group and computes the plan for the resolved addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the group cannot be fetched.
    pub async fn plan(&self, resolved: &HostIpMap, group_id: &str) -> Result<SyncPlan> {
        let current = fetch_group(self.store, group_id).await?;
        debug!(
            "Current firewall group on the controller:\n{}",
            serde_json::to_string_pretty(&current).unwrap_or_default()
        );

        let plan = SyncPlan::new(current, resolved);
        debug!(
            "New firewall group to push to the controller:\n{}",
            serde_json::to_string_pretty(&plan.desired).unwrap_or_default()
        );
        info!(
            "Found {} differences between old and new firewall groups",
            plan.change_count()
        );
        Ok(plan)
    }

    /// Applies the plan, asking `approve` first when confirmation is on.
    ///
    /// `approve` is only called when there is something to apply.
    ///
    /// # Errors
    ///
    /// Returns an error if `approve` fails or the update is rejected.
    pub async fn apply<F>(&self, plan: &SyncPlan, approve: F) -> Result<SyncOutcome>
    where
        F: FnOnce(&SyncPlan) -> Result<bool>,
    {
        let changes = plan.change_count();

        if plan.is_empty() {
            info!("No changes found, update skipped");
            return Ok(SyncOutcome::Unchanged);
        }

        if self.dry_run {
            info!("Dry run, {changes} changes not applied");
            return Ok(SyncOutcome::DryRun { changes });
        }

        if self.confirm && !approve(plan)? {
            info!("Update canceled by user");
            return Ok(SyncOutcome::Declined { changes });
        }

        apply_group(self.store, &plan.desired).await?;
        info!("Controller update complete");
        Ok(SyncOutcome::Applied { changes })
    }

    /// Runs the whole pipeline for a host list.
    ///
    /// # Errors
    ///
    /// Returns the first error from any stage.
    pub async fn run<F>(&self, hosts: &[String], group_id: &str, approve: F) -> Result<SyncOutcome>
    where
        F: FnOnce(&SyncPlan) -> Result<bool>,
    {
        let resolved = self.resolve(hosts).await?;
        let plan = self.plan(&resolved, group_id).await?;
        self.apply(&plan, approve).await
    }
}
