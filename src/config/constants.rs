//! Configuration constants.
//!
//! This module defines the defaults and fixed operational parameters used throughout
//! the scanner, prober and collaborators.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Parent domain under which operators publish 3GPP service names
pub const DEFAULT_PARENT_DOMAIN: &str = "pub.3gppnetwork.org";

/// Subdomain labels scanned in `all` mode
pub const ALL_SUBDOMAINS: &[&str] = &["ims", "epdg.epc", "bsf", "gan", "xcap.ims"];

/// Resolver endpoints tried in order for every query: Google, Cloudflare, OpenDNS.
pub const DEFAULT_RESOLVERS: [SocketAddr; 3] = [
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53),
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)), 53),
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(208, 67, 222, 222)), 53),
];

// Network operation timeouts
/// Per-endpoint DNS query timeout in seconds
pub const DNS_QUERY_TIMEOUT_SECS: u64 = 5;
/// Timeout for downloading the MCC-MNC list
pub const HTTP_FETCH_TIMEOUT_SECS: u64 = 30;

// Scan defaults
/// Delay between queries across the whole pool, in milliseconds
pub const DEFAULT_QUERY_DELAY_MS: u64 = 500;
/// Number of concurrent DNS workers
pub const DEFAULT_CONCURRENCY: usize = 10;

// MCC-MNC reference list
pub const DEFAULT_MCC_MNC_URL: &str =
    "https://raw.githubusercontent.com/pbakondy/mcc-mnc-list/master/mcc-mnc-list.json";
/// File name of the cached list inside the cache directory
pub const MCC_MNC_CACHE_FILE: &str = "mcc-mnc-list.json";
/// The cached list is reused for a day before it is downloaded again
pub const MCC_MNC_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// Probe defaults
/// Ports tried in order by the TCP probe (HTTPS and IKE NAT-T, typical for ePDGs)
pub const DEFAULT_TCP_PORTS: &[u16] = &[443, 4500];
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 300;
pub const DEFAULT_PROBE_WORKERS: usize = 10;
/// Payload carried in ICMP echo requests
pub const ICMP_PAYLOAD: &[u8] = b"3gpp-scanner";

// Storage
pub const DEFAULT_DB_PATH: &str = "database.db";

/// Seconds between progress log lines during a scan or probe run
pub const LOGGING_INTERVAL: u64 = 5;
