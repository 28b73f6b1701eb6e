//! UniFi Controller integration module.
//!
//! This module provides the REST client, the firewall group model and the
//! fetch/apply operations the sync pipeline runs against it.

mod client;
mod groups;
mod types;

pub use client::{parse_envelope, ControllerClient};
pub use groups::{apply_group, fetch_group, GroupStore};
pub use types::{ApiEnvelope, ApiMeta, FirewallGroup, LoginRequest, RC_OK};

#[cfg(test)]
pub(crate) use groups::MockGroupStore;
