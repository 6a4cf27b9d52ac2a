//! Ban mask generation.
//!
//! A ban mask never targets a nick or username: the result always starts
//! with `*!*@`. The host part is generalized according to
//! [`BanmaskConfig`]:
//!
//! | host | default result |
//! |------|----------------|
//! | `1.2.3.4` | `1.2.3.4` |
//! | `2001::` | `2001::*` |
//! | `2001:db8::1` | `2001:db8::1` |
//! | `host`, `host.tld` | unchanged |
//! | `sub.host.tld`, `a.b.host.tld` | `*.host.tld` |
//!
//! With [`IpPolicy::WildcardLast`] the last IPv4 octet or IPv6 group becomes
//! `*` (`1.2.3.*`, `2001:db8::*`).
//!
//! Whatever the configuration, the generated mask matches the hostmask it was
//! built from under [`hostmask_pattern_equal`](crate::hostmask_pattern_equal).

use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::debug;

use crate::error::HostmaskError;
use crate::hostmask::split_hostmask;

/// How literal IP hosts are generalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IpPolicy {
    /// Keep the address; IPv6 addresses ending in `::` get a trailing `*`.
    #[default]
    Literal,
    /// Replace the last IPv4 octet or IPv6 group with `*`.
    WildcardLast,
}

/// Ban mask generation settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BanmaskConfig {
    /// Treatment of IPv4 and IPv6 hosts.
    pub ip: IpPolicy,
    /// Number of trailing hostname labels kept; anything in front of them
    /// collapses into a single `*`. Zero bans every host.
    pub host_labels: usize,
}

impl Default for BanmaskConfig {
    fn default() -> Self {
        BanmaskConfig {
            ip: IpPolicy::Literal,
            host_labels: 2,
        }
    }
}

/// What a host string looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostKind {
    /// A dotted-quad IPv4 address.
    Ipv4,
    /// An IPv6 address in any textual form.
    Ipv6,
    /// Anything else: hostnames, cloaks, server-specific spoofs.
    Name,
}

/// Classify a host string.
pub fn classify_host(host: &str) -> HostKind {
    if host.parse::<Ipv4Addr>().is_ok() {
        HostKind::Ipv4
    } else if host.parse::<Ipv6Addr>().is_ok() {
        HostKind::Ipv6
    } else {
        HostKind::Name
    }
}

/// Build a ban mask for a hostmask using the default [`BanmaskConfig`].
///
/// ```
/// use slirc_utils::banmask;
///
/// assert_eq!(banmask("foobar!user@host").unwrap(), "*!*@host");
/// assert_eq!(banmask("foobar!user@host.tld").unwrap(), "*!*@host.tld");
/// assert_eq!(banmask("foobar!user@sub.host.tld").unwrap(), "*!*@*.host.tld");
/// assert_eq!(banmask("foo!bar@2001::").unwrap(), "*!*@2001::*");
/// ```
pub fn banmask(hostmask: &str) -> Result<String, HostmaskError> {
    banmask_with(hostmask, &BanmaskConfig::default())
}

/// Build a ban mask for a hostmask with explicit settings.
pub fn banmask_with(hostmask: &str, config: &BanmaskConfig) -> Result<String, HostmaskError> {
    let mask = split_hostmask(hostmask)?;
    let host = ban_host(mask.host, config);
    let banmask = format!("*!*@{}", host);
    debug!(hostmask, %banmask, "generated ban mask");
    Ok(banmask)
}

/// The host half of a ban mask.
pub fn ban_host(host: &str, config: &BanmaskConfig) -> String {
    let kind = classify_host(host);
    debug!(host, ?kind, "classified ban host");

    match kind {
        HostKind::Ipv4 => match config.ip {
            IpPolicy::Literal => host.to_string(),
            IpPolicy::WildcardLast => wildcard_last(host, '.'),
        },
        HostKind::Ipv6 if host.ends_with("::") => format!("{}*", host),
        HostKind::Ipv6 => match config.ip {
            IpPolicy::Literal => host.to_string(),
            IpPolicy::WildcardLast => wildcard_last(host, ':'),
        },
        HostKind::Name => collapse_labels(host, config.host_labels),
    }
}

fn wildcard_last(host: &str, sep: char) -> String {
    match host.rfind(sep) {
        Some(idx) => format!("{}*", &host[..=idx]),
        None => "*".to_string(),
    }
}

/// Keep the last `keep` dot-separated labels and replace the rest with `*`.
fn collapse_labels(host: &str, keep: usize) -> String {
    if keep == 0 {
        return "*".to_string();
    }
    match host.rmatch_indices('.').nth(keep - 1) {
        Some((idx, _)) => format!("*{}", &host[idx..]),
        None => host.to_string(),
    }
}
