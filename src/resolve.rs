use crate::PingError;
use std::net::{IpAddr, Ipv4Addr};

/// Resolves `host` to a single IPv4 address.
///
/// Literal addresses are returned without a lookup. Names are resolved with the system resolver
/// and the first IPv4 result wins.
///
/// # Errors
///
/// [`PingError::Resolution`] when the lookup fails or yields no IPv4 address.
pub fn lookup_host_v4(host: &str) -> Result<Ipv4Addr, PingError> {
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Ok(ip);
    }
    let ips: Vec<IpAddr> = dns_lookup::lookup_host(host).map_err(|e| PingError::Resolution {
        host: host.to_owned(),
        message: e.to_string(),
    })?;
    ips.into_iter()
        .find_map(|ip| match ip {
            IpAddr::V4(ipv4) => Some(ipv4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| PingError::Resolution {
            host: host.to_owned(),
            message: "no IPv4 address".to_owned(),
        })
}
