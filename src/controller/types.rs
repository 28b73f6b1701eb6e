//! Controller API types.
//!
//! Only the fields the sync touches are modelled; everything else in a
//! firewall group is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value of `meta.rc` on a successful call.
pub const RC_OK: &str = "ok";

/// A firewall group as stored on the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallGroup {
    /// Controller-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Member addresses, in controller order.
    #[serde(default)]
    pub group_members: Vec<String>,
    /// All remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FirewallGroup {
    /// Returns the display name of the group, if the controller sent one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }

    /// Returns a copy of this group with its member list replaced.
    #[must_use]
    pub fn with_members(&self, members: Vec<String>) -> Self {
        Self {
            id: self.id.clone(),
            group_members: members,
            extra: self.extra.clone(),
        }
    }
}

/// Response wrapper used by every controller endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Call status.
    pub meta: ApiMeta,
    /// Payload; failure replies may leave it out.
    #[serde(default)]
    pub data: T,
}

/// Status block of an [`ApiEnvelope`].
#[derive(Debug, Deserialize)]
pub struct ApiMeta {
    /// Result code, `"ok"` on success.
    pub rc: String,
    /// Error message key on failure.
    #[serde(default)]
    pub msg: Option<String>,
}

/// Body of the login request.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Controller user.
    pub username: &'a str,
    /// Controller password.
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "_id": "5f1a2b3c4d5e6f7a8b9c0d1e",
            "name": "Synthetic Monitoring",
            "group_type": "address-group",
            "site_id": "5e0c8f2a1b2c3d4e5f6a7b8c",
            "group_members": ["10.0.0.9", "10.0.0.1"]
        })
    }

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let group: FirewallGroup = serde_json::from_value(sample()).unwrap();

        assert_eq!(group.id, "5f1a2b3c4d5e6f7a8b9c0d1e");
        assert_eq!(group.name(), Some("Synthetic Monitoring"));
        assert_eq!(group.group_members, vec!["10.0.0.9", "10.0.0.1"]);
        assert_eq!(group.extra["group_type"], "address-group");
        assert_eq!(group.extra.len(), 3);
    }

    #[test]
    fn test_with_members_replaces_only_members() {
        let group: FirewallGroup = serde_json::from_value(sample()).unwrap();
        let updated = group.with_members(vec![String::from("10.0.0.5")]);

        assert_eq!(group.group_members, vec!["10.0.0.9", "10.0.0.1"]);
        assert_eq!(updated.group_members, vec!["10.0.0.5"]);

        let mut expected = sample();
        expected["group_members"] = json!(["10.0.0.5"]);
        assert_eq!(serde_json::to_value(&updated).unwrap(), expected);
    }

    #[test]
    fn test_missing_members_defaults_to_empty() {
        let group: FirewallGroup =
            serde_json::from_value(json!({"_id": "abc", "name": "empty"})).unwrap();
        assert!(group.group_members.is_empty());
    }
}
