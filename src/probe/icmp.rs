//! ICMP echo probe.

use std::net::IpAddr;
use std::time::Duration;

use surge_ping::{Client, Config, PingIdentifier, PingSequence, ICMP};
use tokio::net::lookup_host;

use crate::config::ICMP_PAYLOAD;
use crate::models::{ProbeMethod, ProbeResult};

/// Prefers the first IPv4 address, falling back to the first address of any family.
pub(crate) fn pick_target(addrs: &[IpAddr]) -> Option<IpAddr> {
    addrs
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

/// Resolves `fqdn` with the system resolver and sends one echo request.
///
/// Opening the raw ICMP socket usually needs root or `CAP_NET_RAW`; when it
/// can't be opened the probe fails with that reason instead of aborting the run.
pub async fn probe_icmp(fqdn: &str, limit: Duration) -> ProbeResult {
    let result = ProbeResult::started(fqdn, ProbeMethod::Icmp);

    let addrs: Vec<IpAddr> = match lookup_host((fqdn, 0)).await {
        Ok(resolved) => resolved.map(|addr| addr.ip()).collect(),
        Err(e) => return result.fail(format!("DNS lookup failed: {e}")),
    };
    let Some(ip) = pick_target(&addrs) else {
        return result.fail("No IP addresses found");
    };

    let config = match ip {
        IpAddr::V4(_) => Config::default(),
        IpAddr::V6(_) => Config::builder().kind(ICMP::V6).build(),
    };
    let client = match Client::new(&config) {
        Ok(client) => client,
        Err(e) => return result.fail(format!("ICMP socket failed (need root?): {e}")),
    };

    let mut pinger = client.pinger(ip, PingIdentifier(rand::random())).await;
    pinger.timeout(limit);
    match pinger.ping(PingSequence(0), ICMP_PAYLOAD).await {
        Ok((_packet, rtt)) => result.succeed(ip.to_string(), rtt),
        Err(e) => result.fail(format!("ICMP echo failed: {e}")),
    }
}
