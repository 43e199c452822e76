//! TCP connect probe.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{timeout, Instant};

use crate::models::{ProbeMethod, ProbeResult};

/// Tries each port in order and succeeds on the first connect within `limit`.
///
/// The connection is closed as soon as it is established. `ip` on success is the
/// connected peer as `address:port`.
pub async fn probe_tcp(fqdn: &str, ports: &[u16], limit: Duration) -> ProbeResult {
    let result = ProbeResult::started(fqdn, ProbeMethod::Tcp);

    for &port in ports {
        let start = Instant::now();
        match timeout(limit, TcpStream::connect((fqdn, port))).await {
            Ok(Ok(stream)) => {
                let latency = start.elapsed();
                let peer = stream
                    .peer_addr()
                    .map(|addr| addr.to_string())
                    .unwrap_or_else(|_| format!("{fqdn}:{port}"));
                drop(stream);
                return result.succeed(peer, latency);
            }
            Ok(Err(e)) => log::trace!("{fqdn}:{port} connect failed: {e}"),
            Err(_) => log::trace!("{fqdn}:{port} connect timed out"),
        }
    }

    result.fail(format!("All TCP ports unreachable: {ports:?}"))
}
