//! Single resolver endpoint queries.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::EndpointError;
use crate::initialization::init_endpoint_resolver;

/// One DNS server that can answer A-record questions.
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Human-readable identity used in logs.
    fn name(&self) -> String;

    /// Issues a single A-record question for `fqdn`.
    ///
    /// No retries: a timeout or error is returned to the caller as-is.
    async fn query_a(&self, fqdn: &str) -> Result<Vec<Ipv4Addr>, EndpointError>;
}

/// An [`Endpoint`] backed by a hickory resolver pinned to one server address.
pub struct HickoryEndpoint {
    addr: SocketAddr,
    resolver: TokioAsyncResolver,
}

impl HickoryEndpoint {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            addr,
            resolver: init_endpoint_resolver(addr, timeout),
        }
    }
}

impl std::fmt::Debug for HickoryEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryEndpoint")
            .field("addr", &self.addr)
            .finish()
    }
}

#[async_trait]
impl Endpoint for HickoryEndpoint {
    fn name(&self) -> String {
        self.addr.to_string()
    }

    async fn query_a(&self, fqdn: &str) -> Result<Vec<Ipv4Addr>, EndpointError> {
        // Trailing dot marks the name as absolute so no search suffix is tried
        let name = if fqdn.ends_with('.') {
            fqdn.to_string()
        } else {
            format!("{fqdn}.")
        };

        match self.resolver.ipv4_lookup(name).await {
            Ok(lookup) => Ok(lookup.iter().map(|a| a.0).collect()),
            Err(e) => Err(match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => EndpointError::NoRecords,
                ResolveErrorKind::Timeout => EndpointError::Timeout,
                _ => EndpointError::Other(e.to_string()),
            }),
        }
    }
}
