//! DNS resolution for 3GPP service names.
//!
//! This module provides the resolver client used by the scanner:
//! - `Endpoint`: one A-record query against one resolver address
//! - `Resolve`: the resolver seam the scanner depends on
//! - `FallbackResolver`: tries endpoints in order until one yields addresses
//!
//! Only IPv4 (A) records are queried.

mod endpoint;
mod resolution;

// Re-export public API
pub use endpoint::{Endpoint, HickoryEndpoint};
pub use resolution::{FallbackResolver, Resolve};
