//! 3GPP public domain name construction.
//!
//! Operator infrastructure published under the 3GPP public domain follows a fixed
//! naming scheme: `<label>.mnc<MNC>.mcc<MCC>.<parent>`, where both codes are
//! zero-padded to three digits.
//!
//! Key functions:
//! - `build_fqdn()` - Builds the FQDN for a (label, MNC, MCC, parent) tuple
//! - `parse_fqdn()` - Recovers the label and codes from a built FQDN

/// Builds the fully-qualified domain name for an operator service label.
///
/// Both codes are zero-padded to at least three digits. Codes of 1000 or more
/// are not truncated, they simply produce a wider field. The label is used as
/// given (it may itself contain dots, e.g. `epdg.epc`), and this function never
/// fails.
///
/// # Examples
///
/// ```
/// use gpp_scanner::build_fqdn;
///
/// assert_eq!(
///     build_fqdn("epdg.epc", 5, 311, "pub.3gppnetwork.org"),
///     "epdg.epc.mnc005.mcc311.pub.3gppnetwork.org"
/// );
/// ```
pub fn build_fqdn(label: &str, mnc: u32, mcc: u32, parent_domain: &str) -> String {
    format!("{label}.mnc{mnc:03}.mcc{mcc:03}.{parent_domain}")
}

/// Components recovered from a 3GPP FQDN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FqdnParts {
    /// Service label, everything before the `mnc` group
    pub label: String,
    /// Mobile Network Code
    pub mnc: u32,
    /// Mobile Country Code
    pub mcc: u32,
    /// Everything after the `mcc` group
    pub parent_domain: String,
}

/// Splits an FQDN produced by [`build_fqdn`] back into its components.
///
/// Returns `None` if the name has no `.mnc<digits>.mcc<digits>.` group.
pub fn parse_fqdn(fqdn: &str) -> Option<FqdnParts> {
    let labels: Vec<&str> = fqdn.split('.').collect();

    // The code pair can't be first (label must be non-empty) and must be followed
    // by at least one parent label.
    for i in 1..labels.len().saturating_sub(2) {
        let (Some(mnc), Some(mcc)) = (
            code_from_label(labels[i], "mnc"),
            code_from_label(labels[i + 1], "mcc"),
        ) else {
            continue;
        };
        return Some(FqdnParts {
            label: labels[..i].join("."),
            mnc,
            mcc,
            parent_domain: labels[i + 2..].join("."),
        });
    }
    None
}

fn code_from_label(label: &str, prefix: &str) -> Option<u32> {
    let digits = label.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
