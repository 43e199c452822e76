//! Multi-endpoint A-record resolution.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ScanConfig;
use crate::dns::Endpoint;
use crate::error_handling::EndpointError;
use crate::initialization::init_resolvers;

/// Resolves a name to its IPv4 addresses.
///
/// An empty vector means "not found": the scanner makes no distinction between
/// NXDOMAIN, an empty answer and every endpoint failing.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve_a(&self, fqdn: &str) -> Vec<Ipv4Addr>;
}

/// Tries each endpoint in order and returns the first non-empty answer.
///
/// A timeout or error on one endpoint only advances to the next one. The same
/// endpoint is never retried. The resolver holds no state between calls.
#[derive(Clone)]
pub struct FallbackResolver {
    endpoints: Vec<Arc<dyn Endpoint>>,
}

impl FallbackResolver {
    pub fn new(endpoints: Vec<Arc<dyn Endpoint>>) -> Self {
        Self { endpoints }
    }

    /// Builds hickory endpoints for the resolvers and timeout in `config`.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(init_resolvers(&config.resolvers, config.query_timeout))
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

#[async_trait]
impl Resolve for FallbackResolver {
    async fn resolve_a(&self, fqdn: &str) -> Vec<Ipv4Addr> {
        for endpoint in &self.endpoints {
            match endpoint.query_a(fqdn).await {
                Ok(ips) if !ips.is_empty() => return ips,
                Ok(_) | Err(EndpointError::NoRecords) => {
                    log::trace!("{fqdn}: no A records from {}", endpoint.name());
                }
                Err(e) => {
                    log::debug!("{fqdn}: query via {} failed: {e}", endpoint.name());
                }
            }
        }
        Vec::new()
    }
}
