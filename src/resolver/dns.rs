//! DNS lookups for the host list.

use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use tracing::{debug, info, warn};

use crate::error::{ResolveError, Result};

use super::map::HostIpMap;

/// Resolves a hostname to its IPv4 addresses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Returns every IPv4 address the hostname resolves to.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or yields no IPv4 address.
    async fn resolve_ipv4(&self, host: &str) -> Result<Vec<Ipv4Addr>>;
}

/// Resolver backed by the operating system's resolver configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    /// Creates a new system resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve_ipv4(&self, host: &str) -> Result<Vec<Ipv4Addr>> {
        let resolved = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| ResolveError::lookup(host, e.to_string()))?;

        let mut addresses = Vec::new();
        for addr in resolved {
            if let IpAddr::V4(ip) = addr.ip()
                && !addresses.contains(&ip)
            {
                addresses.push(ip);
            }
        }

        if addresses.is_empty() {
            return Err(ResolveError::NoIpv4Address {
                host: host.to_string(),
            }
            .into());
        }

        Ok(addresses)
    }
}

/// Resolves every hostname, one at a time, into a [`HostIpMap`].
///
/// The first failing lookup aborts the whole resolution.
///
/// # Errors
///
/// Returns the first lookup error encountered.
pub async fn resolve_hosts<R>(resolver: &R, hosts: &[String]) -> Result<HostIpMap>
where
    R: HostResolver + ?Sized,
{
    info!("Resolving {} hostnames", hosts.len());
    let mut map = HostIpMap::new();

    for host in hosts {
        let addresses = resolver.resolve_ipv4(host).await?;
        debug!("{host} -> {addresses:?}");

        for ip in addresses {
            if let Some(previous) = map.insert(ip, host.as_str())
                && previous != *host
            {
                warn!("{ip} is returned by both {previous} and {host}, keeping {host}");
            }
        }
    }

    info!("Resolved {} unique IPv4 addresses", map.len());
    Ok(map)
}
