//! Hostname resolution module.
//!
//! This module turns the host list file into the set of IPv4 addresses the
//! firewall group should contain, remembering which hostname produced each
//! address.

mod dns;
mod hostfile;
mod map;

pub use dns::{resolve_hosts, HostResolver, SystemResolver};
pub use hostfile::{parse_host_list, read_host_file};
pub use map::HostIpMap;

#[cfg(test)]
pub(crate) use dns::MockHostResolver;
