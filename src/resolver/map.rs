//! IP address to hostname mapping.

use serde::Serialize;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;

/// Addresses resolved from the host list, keyed by IP.
///
/// Iterates in ascending numeric address order. An address produced by
/// several hostnames is kept once, attributed to the last hostname inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HostIpMap {
    entries: BTreeMap<Ipv4Addr, String>,
}

impl HostIpMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Records that `host` resolved to `ip`.
    ///
    /// Returns the hostname previously attributed to `ip`, if any.
    pub fn insert(&mut self, ip: Ipv4Addr, host: impl Into<String>) -> Option<String> {
        self.entries.insert(ip, host.into())
    }

    /// Looks up the hostname for a member string as stored on the controller.
    #[must_use]
    pub fn hostname(&self, member: &str) -> Option<&str> {
        let ip: Ipv4Addr = member.parse().ok()?;
        self.entries.get(&ip).map(String::as_str)
    }

    /// Returns the addresses as group member strings, in numeric order.
    #[must_use]
    pub fn members(&self) -> Vec<String> {
        self.entries.keys().map(ToString::to_string).collect()
    }

    /// Iterates over `(ip, hostname)` pairs in numeric order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ipv4Addr, &str)> {
        self.entries.iter().map(|(ip, host)| (ip, host.as_str()))
    }

    /// Number of distinct addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no address has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Ipv4Addr, String)> for HostIpMap {
    fn from_iter<I: IntoIterator<Item = (Ipv4Addr, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (ip, host) in iter {
            map.insert(ip, host);
        }
        map
    }
}
