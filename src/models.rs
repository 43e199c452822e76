//! Core data records shared across scanning, probing, storage and export.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the MCC-MNC reference list.
///
/// Codes are kept as the decimal strings found in the source list (they may carry
/// leading zeros); use [`OperatorEntry::mcc_code`] and [`OperatorEntry::mnc_code`]
/// for the numeric values that go into FQDNs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatorEntry {
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    pub entry_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub country_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub country_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub mcc: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub mnc: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub brand: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub operator: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub bands: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl OperatorEntry {
    /// Convenience constructor for the fields the scanner actually needs.
    pub fn new(mcc: impl Into<String>, mnc: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            mcc: mcc.into(),
            mnc: mnc.into(),
            operator: operator.into(),
            ..Default::default()
        }
    }

    /// Numeric Mobile Country Code, or `None` if the source string isn't decimal.
    pub fn mcc_code(&self) -> Option<u32> {
        self.mcc.trim().parse().ok()
    }

    /// Numeric Mobile Network Code, or `None` if the source string isn't decimal.
    pub fn mnc_code(&self) -> Option<u32> {
        self.mnc.trim().parse().ok()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A DNS name that resolved to at least one IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub fqdn: String,
    /// Addresses in the order the answering resolver returned them
    pub ips: Vec<Ipv4Addr>,
    pub subdomain: String,
    pub mnc: u32,
    pub mcc: u32,
    pub operator: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness check method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    /// ICMP echo request (needs raw socket privilege)
    Icmp,
    /// TCP connect to a fixed set of ports
    Tcp,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMethod::Icmp => "icmp",
            ProbeMethod::Tcp => "tcp",
        }
    }
}

impl std::fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing one name. Failures are kept, with the reason in `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub fqdn: String,
    pub success: bool,
    #[serde(
        rename = "latency_ms",
        with = "latency_ms",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub latency: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ip: Option<String>,
    pub method: ProbeMethod,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ProbeResult {
    pub(crate) fn started(fqdn: &str, method: ProbeMethod) -> Self {
        Self {
            fqdn: fqdn.to_string(),
            success: false,
            latency: None,
            ip: None,
            method,
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub(crate) fn succeed(mut self, ip: String, latency: Duration) -> Self {
        self.success = true;
        self.ip = Some(ip);
        self.latency = Some(latency);
        self.error = None;
        self
    }

    pub(crate) fn fail(mut self, error: impl Into<String>) -> Self {
        self.success = false;
        self.error = Some(error.into());
        self
    }

    /// Latency in fractional milliseconds, 0.0 when unknown.
    pub fn latency_ms(&self) -> f64 {
        self.latency
            .map(|d| d.as_micros() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

mod latency_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_f64(d.as_micros() as f64 / 1000.0),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let ms = Option::<f64>::deserialize(d)?;
        Ok(ms
            .filter(|ms| ms.is_finite() && *ms >= 0.0)
            .map(|ms| Duration::from_micros((ms * 1000.0).round() as u64)))
    }
}

/// Summary of discovered names.
///
/// Maps are ordered so JSON output is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_fqdns: usize,
    pub mcc_distribution: BTreeMap<String, usize>,
    pub subdomain_counts: BTreeMap<String, usize>,
    pub unique_operators: usize,
    pub total_ips: usize,
}
