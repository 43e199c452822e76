use std::net::Ipv4Addr;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use super::*;
use crate::models::{ProbeMethod, ProbeResult, ResolutionResult};

fn sample_results() -> Vec<ResolutionResult> {
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
    vec![
        ResolutionResult {
            fqdn: "epdg.epc.mnc001.mcc310.pub.3gppnetwork.org".to_string(),
            ips: vec![Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2)],
            subdomain: "epdg.epc".to_string(),
            mnc: 1,
            mcc: 310,
            operator: "Acme, Inc.".to_string(),
            timestamp,
        },
        ResolutionResult {
            fqdn: "ims.mnc015.mcc234.pub.3gppnetwork.org".to_string(),
            ips: vec![Ipv4Addr::new(198, 51, 100, 9)],
            subdomain: "ims".to_string(),
            mnc: 15,
            mcc: 234,
            operator: "Beta".to_string(),
            timestamp,
        },
    ]
}

fn sample_probes() -> Vec<ProbeResult> {
    vec![
        ProbeResult::started("epdg.epc.mnc001.mcc310.pub.3gppnetwork.org", ProbeMethod::Tcp)
            .succeed("192.0.2.1:443".to_string(), Duration::from_micros(12_346)),
        ProbeResult::started("ims.mnc015.mcc234.pub.3gppnetwork.org", ProbeMethod::Tcp)
            .fail("All TCP ports unreachable: [443, 4500]"),
    ]
}

fn render<F>(write: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), crate::error_handling::ExportError>,
{
    let mut buf = Vec::new();
    write(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_results_csv() {
    let out = render(|w| write_results_csv(w, &sample_results()));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "FQDN,IPs,Subdomain,MNC,MCC,Operator,Timestamp");
    assert_eq!(
        lines[1],
        "epdg.epc.mnc001.mcc310.pub.3gppnetwork.org,192.0.2.1;192.0.2.2,epdg.epc,1,310,\"Acme, Inc.\",2024-03-01 12:30:05"
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_results_json() {
    let out = render(|w| write_results_json(w, &sample_results()));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let first = &value[0];
    assert_eq!(first["fqdn"], "epdg.epc.mnc001.mcc310.pub.3gppnetwork.org");
    assert_eq!(first["ips"][1], "192.0.2.2");
    assert_eq!(first["mcc"], 310);
    assert_eq!(first["timestamp"], "2024-03-01T12:30:05Z");
    // Pretty-printed
    assert!(out.contains("\n  {"));
}

#[test]
fn test_results_text() {
    let out = render(|w| write_results(w, &sample_results(), ExportFormat::Text));
    assert_eq!(
        out,
        "epdg.epc.mnc001.mcc310.pub.3gppnetwork.org\nims.mnc015.mcc234.pub.3gppnetwork.org\n"
    );
}

#[test]
fn test_results_report() {
    let out = render(|w| write_results_report(w, &sample_results()[..1]));
    assert_eq!(
        out,
        "Found A record for epdg.epc.mnc001.mcc310.pub.3gppnetwork.org\n  IP: 192.0.2.1\n  IP: 192.0.2.2\n"
    );
}

#[test]
fn test_empty_results() {
    assert_eq!(render(|w| write_results_json(w, &[])), "[]\n");
    assert_eq!(
        render(|w| write_results_csv(w, &[])),
        "FQDN,IPs,Subdomain,MNC,MCC,Operator,Timestamp\n"
    );
    assert_eq!(render(|w| write_results_text(w, &[])), "");
}

#[test]
fn test_fqdn_list_formats() {
    let fqdns = vec!["a.mnc001.mcc310.x".to_string(), "b.mnc001.mcc310.x".to_string()];
    assert_eq!(
        render(|w| write_fqdn_list(w, &fqdns, ExportFormat::Csv)),
        "FQDN\na.mnc001.mcc310.x\nb.mnc001.mcc310.x\n"
    );
    let json = render(|w| write_fqdn_list(w, &fqdns, ExportFormat::Json));
    let back: Vec<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, fqdns);
}

#[test]
fn test_probe_csv() {
    let out = render(|w| write_probe_csv(w, &sample_probes()));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "FQDN,Success,Latency_ms,IP,Method,Error,Timestamp");
    assert!(lines[1].starts_with(
        "epdg.epc.mnc001.mcc310.pub.3gppnetwork.org,true,12.35,192.0.2.1:443,tcp,,"
    ));
    // Unknown latency stays empty; the bracketed port list is quoted
    assert!(lines[2].starts_with(
        "ims.mnc015.mcc234.pub.3gppnetwork.org,false,,,tcp,\"All TCP ports unreachable: [443, 4500]\","
    ));
}

#[test]
fn test_probe_json_omits_absent_fields() {
    let out = render(|w| write_probe_json(w, &sample_probes()));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["latency_ms"], 12.346);
    assert!(value[0].get("error").is_none());
    assert!(value[1].get("ip").is_none());
    assert!(value[1].get("latency_ms").is_none());
}

#[test]
fn test_probe_report() {
    let out = render(|w| write_probe_report(w, &sample_probes()));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0],
        "Pinging epdg.epc.mnc001.mcc310.pub.3gppnetwork.org ... 192.0.2.1:443 (12.35 ms)"
    );
    assert_eq!(
        lines[1],
        "Pinging ims.mnc015.mcc234.pub.3gppnetwork.org ... FAILED: All TCP ports unreachable: [443, 4500]"
    );
}

#[test]
fn test_export_results_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let format = export_results(&path, &sample_results()).unwrap();
    assert_eq!(format, ExportFormat::Csv);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn test_export_unsupported_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.xml");
    assert!(export_results(&path, &sample_results()).is_err());
    assert!(!path.exists());

    let path = dir.path().join("ping.txt");
    assert!(export_probe_results(&path, &sample_probes()).is_err());
    assert!(!path.exists());
}

#[test]
fn test_export_probe_results_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ping.json");
    export_probe_results(&path, &sample_probes()).unwrap();
    let back: Vec<ProbeResult> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back.len(), 2);
    assert!(back[0].success);
}
