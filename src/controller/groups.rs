//! Firewall group fetch and apply operations.

use async_trait::async_trait;
use std::fmt::Write;
use tracing::info;

use crate::error::{ControllerError, Result};

use super::types::FirewallGroup;

/// Remote storage of firewall groups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Lists every firewall group.
    async fn list_groups(&self) -> Result<Vec<FirewallGroup>>;

    /// Replaces the stored group that has the same id.
    async fn update_group(&self, group: &FirewallGroup) -> Result<()>;
}

/// Fetches the firewall group with the given id.
///
/// # Errors
///
/// Returns [`ControllerError::GroupNotFound`] listing the groups that exist
/// if no group has that id, or any error from the store.
pub async fn fetch_group<S>(store: &S, group_id: &str) -> Result<FirewallGroup>
where
    S: GroupStore + ?Sized,
{
    info!("Fetching firewall group {group_id}");
    let groups = store.list_groups().await?;

    let available = describe_groups(&groups);
    groups
        .into_iter()
        .find(|group| group.id == group_id)
        .ok_or_else(|| {
            ControllerError::GroupNotFound {
                group_id: group_id.to_string(),
                available,
            }
            .into()
        })
}

/// Pushes a group definition back to the store.
///
/// # Errors
///
/// Returns any error from the store.
pub async fn apply_group<S>(store: &S, group: &FirewallGroup) -> Result<()>
where
    S: GroupStore + ?Sized,
{
    info!(
        "Updating firewall group {} with {} members",
        group.id,
        group.group_members.len()
    );
    store.update_group(group).await
}

/// One line per group: id, name and member count.
fn describe_groups(groups: &[FirewallGroup]) -> String {
    if groups.is_empty() {
        return String::from("  (no firewall groups)");
    }

    let mut out = String::new();
    for group in groups {
        let _ = writeln!(
            out,
            "  {} {:?} ({} members)",
            group.id,
            group.name().unwrap_or(""),
            group.group_members.len()
        );
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use serde_json::json;

    fn group(id: &str, name: &str) -> FirewallGroup {
        serde_json::from_value(json!({
            "_id": id,
            "name": name,
            "group_members": ["192.0.2.1"]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_group_by_id() {
        let mut store = MockGroupStore::new();
        store
            .expect_list_groups()
            .returning(|| Ok(vec![group("a1", "office"), group("b2", "monitoring")]));

        let found = fetch_group(&store, "b2").await.unwrap();
        assert_eq!(found.name(), Some("monitoring"));
    }

    #[tokio::test]
    async fn test_fetch_missing_group_lists_available() {
        let mut store = MockGroupStore::new();
        store
            .expect_list_groups()
            .returning(|| Ok(vec![group("a1", "office")]));

        let err = fetch_group(&store, "zz").await.unwrap_err();
        match err {
            SyncError::Controller(ControllerError::GroupNotFound { group_id, available }) => {
                assert_eq!(group_id, "zz");
                assert_eq!(available, "  a1 \"office\" (1 members)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_describe_no_groups() {
        assert_eq!(describe_groups(&[]), "  (no firewall groups)");
    }
}
