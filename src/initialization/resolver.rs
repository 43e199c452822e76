//! DNS resolver initialization.
//!
//! This module builds one hickory resolver per configured endpoint, so the scan
//! layer can try endpoints in a fixed order instead of letting hickory rotate
//! between them.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::dns::{Endpoint, HickoryEndpoint};

/// Builds the resolver options shared by every endpoint.
///
/// One attempt per endpoint (fallback across endpoints replaces retries), no
/// search-domain expansion, and no caching so every job observes a live answer.
fn resolver_opts(timeout: Duration) -> ResolverOpts {
    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.ndots = 0;
    opts.cache_size = 0;
    opts
}

/// Initializes a single-endpoint resolver over UDP.
pub fn init_endpoint_resolver(addr: SocketAddr, timeout: Duration) -> TokioAsyncResolver {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig::new(addr, Protocol::Udp));
    TokioAsyncResolver::tokio(config, resolver_opts(timeout))
}

/// Initializes the ordered list of query endpoints for a scan.
///
/// # Arguments
///
/// * `addrs` - Endpoint addresses, in the order they should be tried
/// * `timeout` - Per-query timeout for a single endpoint
pub fn init_resolvers(addrs: &[SocketAddr], timeout: Duration) -> Vec<Arc<dyn Endpoint>> {
    addrs
        .iter()
        .map(|addr| {
            log::debug!("DNS endpoint {addr} (timeout {}s)", timeout.as_secs_f32());
            Arc::new(HickoryEndpoint::new(*addr, timeout)) as Arc<dyn Endpoint>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RESOLVERS;

    #[test]
    fn test_resolver_opts() {
        let opts = resolver_opts(Duration::from_secs(5));
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.attempts, 1);
        assert_eq!(opts.ndots, 0);
        assert_eq!(opts.cache_size, 0);
    }

    #[tokio::test]
    async fn test_init_resolvers_preserves_order() {
        let endpoints = init_resolvers(&DEFAULT_RESOLVERS, Duration::from_secs(5));
        let names: Vec<String> = endpoints.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["8.8.8.8:53", "1.1.1.1:53", "208.67.222.222:53"]);
    }

    #[tokio::test]
    async fn test_init_resolvers_empty() {
        assert!(init_resolvers(&[], Duration::from_secs(1)).is_empty());
    }
}
