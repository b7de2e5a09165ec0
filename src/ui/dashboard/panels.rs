//! Per-family panel state and the pure renderers that update it.
//!
//! A renderer takes the previous panel and a snapshot and returns the next
//! panel. Keys missing from the snapshot keep the previous value; a key of
//! the wrong type fails the whole render so the caller can keep the previous
//! panel.

use serde_json::{Map, Value};

use crate::core::telemetry::Snapshot;
use crate::error::{Result, TechSuiteError};

const BYTES_TO_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const BYTES_TO_MB: f64 = 1024.0 * 1024.0;
const MAX_DNS_SERVERS: usize = 3;

fn number(map: &Map<String, Value>, key: &str) -> Result<Option<f64>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(TechSuiteError::render(format!(
            "'{}' should be a number, got {}",
            key, other
        ))),
    }
}

fn integer(map: &Map<String, Value>, key: &str) -> Result<Option<i64>> {
    Ok(number(map, key)?.map(|v| v as i64))
}

fn flag(map: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(TechSuiteError::render(format!(
            "'{}' should be a boolean, got {}",
            key, other
        ))),
    }
}

fn text<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(TechSuiteError::render(format!(
            "'{}' should be a string, got {}",
            key, other
        ))),
    }
}

fn list<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Option<&'a Vec<Value>>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(TechSuiteError::render(format!(
            "'{}' should be a list, got {}",
            key, other
        ))),
    }
}

fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| TechSuiteError::render(format!("{} entry should be an object", what)))
}

fn progress_from(percent: Option<f64>) -> u16 {
    percent
        .map(|p| p.trunc().clamp(0.0, 100.0) as u16)
        .unwrap_or(0)
}

// CPU

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuPanel {
    pub percent: Option<f64>,
    pub physical_cores: Option<i64>,
    pub logical_cores: Option<i64>,
    pub frequency_mhz: Option<f64>,
}

impl CpuPanel {
    pub fn usage_text(&self) -> String {
        match self.percent {
            Some(p) => format!("Usage: {:.1}%", p),
            None => "Usage: ---%".to_string(),
        }
    }

    pub fn cores_text(&self) -> String {
        match (self.physical_cores, self.logical_cores) {
            (None, None) => "Cores: ---".to_string(),
            (physical, logical) => format!(
                "Cores: {} physical, {} logical",
                physical.unwrap_or(0),
                logical.unwrap_or(0)
            ),
        }
    }

    pub fn frequency_text(&self) -> String {
        match self.frequency_mhz {
            Some(f) => format!("Frequency: {:.0} MHz", f),
            None => "Frequency: --- MHz".to_string(),
        }
    }

    pub fn progress(&self) -> u16 {
        progress_from(self.percent)
    }
}

pub fn render_cpu(prev: &CpuPanel, snapshot: &Snapshot) -> Result<CpuPanel> {
    let map = snapshot.as_map();
    let mut next = prev.clone();

    if let Some(p) = number(map, "percent")? {
        next.percent = Some(p);
    }
    if let Some(n) = integer(map, "physical_cores")? {
        next.physical_cores = Some(n);
    }
    if let Some(n) = integer(map, "logical_cores")? {
        next.logical_cores = Some(n);
    }
    match map.get("frequency") {
        None | Some(Value::Null) => {}
        Some(freq) => {
            if let Some(current) = number(object(freq, "frequency")?, "current")? {
                next.frequency_mhz = Some(current);
            }
        }
    }

    Ok(next)
}

// RAM

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RamPanel {
    pub percent: Option<f64>,
    pub used_bytes: Option<f64>,
    pub total_bytes: Option<f64>,
    pub available_bytes: Option<f64>,
}

impl RamPanel {
    pub fn usage_text(&self) -> String {
        match self.percent {
            Some(p) => format!("Usage: {:.1}%", p),
            None => "Usage: ---%".to_string(),
        }
    }

    pub fn details_text(&self) -> String {
        match (self.used_bytes, self.total_bytes) {
            (None, None) => "--- GB / --- GB".to_string(),
            (used, total) => format!(
                "{:.2} GB / {:.2} GB",
                used.unwrap_or(0.0) / BYTES_TO_GB,
                total.unwrap_or(0.0) / BYTES_TO_GB
            ),
        }
    }

    pub fn available_text(&self) -> String {
        match self.available_bytes {
            Some(a) => format!("Available: {:.2} GB", a / BYTES_TO_GB),
            None => "Available: --- GB".to_string(),
        }
    }

    pub fn progress(&self) -> u16 {
        progress_from(self.percent)
    }
}

pub fn render_ram(prev: &RamPanel, snapshot: &Snapshot) -> Result<RamPanel> {
    let map = snapshot.as_map();
    let mut next = prev.clone();

    if let Some(v) = number(map, "percent")? {
        next.percent = Some(v);
    }
    if let Some(v) = number(map, "used")? {
        next.used_bytes = Some(v);
    }
    if let Some(v) = number(map, "total")? {
        next.total_bytes = Some(v);
    }
    if let Some(v) = number(map, "available")? {
        next.available_bytes = Some(v);
    }

    Ok(next)
}

// Disk

#[derive(Debug, Clone, PartialEq)]
pub struct DiskPanel {
    pub text: String,
}

impl Default for DiskPanel {
    fn default() -> Self {
        Self {
            text: "Loading disk information...".to_string(),
        }
    }
}

pub fn render_disk(prev: &DiskPanel, snapshot: &Snapshot) -> Result<DiskPanel> {
    let Some(partitions) = list(snapshot.as_map(), "partitions")? else {
        return Ok(prev.clone());
    };

    let mut info = String::new();
    for entry in partitions {
        let part = object(entry, "partition")?;
        let device = text(part, "device")?.unwrap_or("Unknown");
        let mountpoint = text(part, "mountpoint")?.unwrap_or("");
        let fstype = text(part, "fstype")?.unwrap_or("");
        let total_gb = number(part, "total")?.unwrap_or(0.0) / BYTES_TO_GB;
        let used_gb = number(part, "used")?.unwrap_or(0.0) / BYTES_TO_GB;
        let free_gb = number(part, "free")?.unwrap_or(0.0) / BYTES_TO_GB;
        let percent = number(part, "percent")?.unwrap_or(0.0);

        info.push_str(&format!("{} ({})\n", device, fstype));
        info.push_str(&format!("  Mount: {}\n", mountpoint));
        info.push_str(&format!(
            "  Used: {:.2} GB / {:.2} GB ({:.1}%)\n",
            used_gb, total_gb, percent
        ));
        info.push_str(&format!("  Free: {:.2} GB\n\n", free_gb));
    }

    Ok(DiskPanel {
        text: info.trim().to_string(),
    })
}

// Battery

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatteryPanel {
    pub percent: Option<f64>,
    pub power_plugged: Option<bool>,
    pub secs_left: Option<i64>,
}

impl BatteryPanel {
    pub fn status_text(&self) -> String {
        match self.power_plugged {
            None => "Status: ---".to_string(),
            Some(true) if self.percent.unwrap_or(0.0) < 100.0 => {
                "Status: Plugged In (Charging)".to_string()
            }
            Some(true) => "Status: Plugged In (Fully Charged)".to_string(),
            Some(false) => "Status: On Battery".to_string(),
        }
    }

    pub fn level_text(&self) -> String {
        match self.percent {
            Some(p) => format!("Level: {:.0}%", p),
            None => "Level: ---%".to_string(),
        }
    }

    pub fn time_text(&self) -> String {
        match (self.secs_left, self.power_plugged) {
            (Some(secs), _) if secs > 0 => {
                format!("Time: {}h {}m remaining", secs / 3600, (secs % 3600) / 60)
            }
            (_, Some(true)) => "Time: Charging".to_string(),
            (None, None) => "Time: ---".to_string(),
            _ => "Time: Calculating...".to_string(),
        }
    }

    pub fn progress(&self) -> u16 {
        progress_from(self.percent)
    }
}

pub fn render_battery(prev: &BatteryPanel, snapshot: &Snapshot) -> Result<BatteryPanel> {
    let map = snapshot.as_map();
    let mut next = prev.clone();

    if let Some(v) = number(map, "percent")? {
        next.percent = Some(v);
    }
    if let Some(v) = flag(map, "power_plugged")? {
        next.power_plugged = Some(v);
    }
    // An explicit null means "unknown", which clears the previous estimate
    if map.contains_key("secsleft") {
        next.secs_left = integer(map, "secsleft")?;
    }

    Ok(next)
}

// Network

const NETWORK_KEYS: &[&str] = &[
    "bytes_sent",
    "bytes_recv",
    "interfaces",
    "public_ip",
    "default_gateway",
    "dns_servers",
    "dhcp_enabled",
    "behind_nat",
    "local_ip",
];

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkPanel {
    pub text: String,
}

impl Default for NetworkPanel {
    fn default() -> Self {
        Self {
            text: "Loading network information...".to_string(),
        }
    }
}

pub fn render_network(prev: &NetworkPanel, snapshot: &Snapshot) -> Result<NetworkPanel> {
    let map = snapshot.as_map();
    if !NETWORK_KEYS.iter().any(|key| map.contains_key(*key)) {
        return Ok(prev.clone());
    }

    let sent_mb = number(map, "bytes_sent")?.unwrap_or(0.0) / BYTES_TO_MB;
    let recv_mb = number(map, "bytes_recv")?.unwrap_or(0.0) / BYTES_TO_MB;
    let empty = Vec::new();
    let interfaces = list(map, "interfaces")?.unwrap_or(&empty);

    let mut info = String::from("Network Statistics:\n");
    info.push_str(&format!("  Sent: {:.2} MB\n", sent_mb));
    info.push_str(&format!("  Received: {:.2} MB\n\n", recv_mb));

    let mut active: Option<(&Map<String, Value>, &str)> = None;
    let mut mac_address: Option<&str> = None;
    let mut local_ip: Option<&str> = None;
    let mut subnet_mask: Option<&str> = None;

    for entry in interfaces {
        let iface = object(entry, "interface")?;
        if !flag(iface, "is_up")?.unwrap_or(false) {
            continue;
        }

        active = Some((iface, text(iface, "name")?.unwrap_or("Unknown")));

        for addr_entry in list(iface, "addresses")?.unwrap_or(&empty) {
            let addr = object(addr_entry, "address")?;
            let family = text(addr, "family")?.unwrap_or("");
            let address = text(addr, "address")?.unwrap_or("");
            let lowered = family.to_ascii_lowercase();

            if lowered.contains("packet") || lowered.contains("link") {
                mac_address = Some(address);
            } else if family.contains("AF_INET") && !address.contains(':') && local_ip.is_none()
            {
                local_ip = Some(address);
                subnet_mask = Some(text(addr, "netmask")?.unwrap_or("N/A"));
            }
        }
        break;
    }

    let public_ip = text(map, "public_ip")?.unwrap_or("N/A");
    let default_gateway = text(map, "default_gateway")?.unwrap_or("N/A");
    let dhcp_enabled = flag(map, "dhcp_enabled")?.unwrap_or(false);
    let behind_nat = flag(map, "behind_nat")?.unwrap_or(false);
    let dns_servers = list(map, "dns_servers")?.unwrap_or(&empty);
    let local_ip = match local_ip {
        Some(ip) => ip,
        None => text(map, "local_ip")?.unwrap_or("N/A"),
    };

    info.push_str("Active Interface:\n");
    match active {
        Some((iface, name)) => {
            info.push_str(&format!("  Name: {}\n", name));
            if let Some(mac) = mac_address.filter(|m| !m.is_empty()) {
                info.push_str(&format!("  MAC: {}\n", mac));
            }
            let speed = integer(iface, "speed")?.unwrap_or(0);
            if speed > 0 {
                info.push_str(&format!("  Speed: {} Mbps\n", speed));
            }
            info.push_str("  Status: Connected\n");
        }
        None => info.push_str("  No active interface detected\n"),
    }

    info.push_str("\nIP Addressing:\n");
    info.push_str(&format!(
        "  Local IP: {}\n",
        if local_ip.is_empty() { "N/A" } else { local_ip }
    ));
    info.push_str(&format!("  Public IP: {}\n", public_ip));
    if let Some(mask) = subnet_mask.filter(|m| *m != "N/A") {
        info.push_str(&format!("  Subnet Mask: {}\n", mask));
    }
    if !default_gateway.is_empty() {
        info.push_str(&format!("  Gateway: {}\n", default_gateway));
    }

    info.push_str("\nNetwork Configuration:\n");
    info.push_str(&format!(
        "  DHCP: {}\n",
        if dhcp_enabled { "Enabled" } else { "Disabled/Unknown" }
    ));

    if dns_servers.is_empty() {
        info.push_str("  DNS Servers: N/A\n");
    } else {
        info.push_str("  DNS Servers:\n");
        for dns in dns_servers.iter().take(MAX_DNS_SERVERS) {
            match dns {
                Value::String(s) => info.push_str(&format!("    - {}\n", s)),
                other => info.push_str(&format!("    - {}\n", other)),
            }
        }
    }

    info.push_str(&format!(
        "  Network Type: {}\n",
        if behind_nat { "Behind NAT" } else { "Direct/Unknown" }
    ));

    Ok(NetworkPanel { text: info })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snap(value: Value) -> Snapshot {
        Snapshot::try_from(value).unwrap()
    }

    #[test]
    fn test_cpu_scenario() {
        let s = snap(json!({
            "percent": 47.5,
            "physical_cores": 4,
            "logical_cores": 8,
            "frequency": {"current": 3200}
        }));

        let panel = render_cpu(&CpuPanel::default(), &s).unwrap();
        assert_eq!(panel.usage_text(), "Usage: 47.5%");
        assert_eq!(panel.cores_text(), "Cores: 4 physical, 8 logical");
        assert_eq!(panel.frequency_text(), "Frequency: 3200 MHz");
        assert_eq!(panel.progress(), 47);
    }

    #[test]
    fn test_cpu_missing_keys_keep_previous() {
        let first = render_cpu(
            &CpuPanel::default(),
            &snap(json!({"percent": 10.0, "frequency": {"current": 2000}})),
        )
        .unwrap();

        let second = render_cpu(&first, &snap(json!({"logical_cores": 8}))).unwrap();
        assert_eq!(second.usage_text(), "Usage: 10.0%");
        assert_eq!(second.frequency_text(), "Frequency: 2000 MHz");
        assert_eq!(second.cores_text(), "Cores: 0 physical, 8 logical");

        let third = render_cpu(&second, &snap(json!({"frequency": {}}))).unwrap();
        assert_eq!(third, second);
    }

    #[test]
    fn test_cpu_placeholders() {
        let panel = CpuPanel::default();
        assert_eq!(panel.usage_text(), "Usage: ---%");
        assert_eq!(panel.cores_text(), "Cores: ---");
        assert_eq!(panel.frequency_text(), "Frequency: --- MHz");
        assert_eq!(panel.progress(), 0);
    }

    #[test]
    fn test_cpu_malformed_is_error() {
        assert!(render_cpu(&CpuPanel::default(), &snap(json!({"percent": "high"}))).is_err());
        assert!(render_cpu(&CpuPanel::default(), &snap(json!({"frequency": 3200}))).is_err());
    }

    #[test]
    fn test_progress_clamped() {
        let panel = render_cpu(&CpuPanel::default(), &snap(json!({"percent": 140.2}))).unwrap();
        assert_eq!(panel.progress(), 100);
        let panel = render_cpu(&CpuPanel::default(), &snap(json!({"percent": -3}))).unwrap();
        assert_eq!(panel.progress(), 0);
    }

    #[test]
    fn test_ram_render() {
        let gb = 1024u64 * 1024 * 1024;
        let panel = render_ram(
            &RamPanel::default(),
            &snap(json!({
                "percent": 62.25,
                "used": 10 * gb,
                "total": 16 * gb,
                "available": 6 * gb
            })),
        )
        .unwrap();

        assert_eq!(panel.usage_text(), "Usage: 62.2%");
        assert_eq!(panel.details_text(), "10.00 GB / 16.00 GB");
        assert_eq!(panel.available_text(), "Available: 6.00 GB");
        assert_eq!(panel.progress(), 62);

        let kept = render_ram(&panel, &snap(json!({}))).unwrap();
        assert_eq!(kept, panel);
    }

    #[test]
    fn test_disk_render() {
        let gb = 1024u64 * 1024 * 1024;
        let panel = render_disk(
            &DiskPanel::default(),
            &snap(json!({"partitions": [
                {"device": "C:", "mountpoint": "C:\\", "fstype": "NTFS",
                 "total": 100 * gb, "used": 40 * gb, "free": 60 * gb, "percent": 40.0},
                {"mountpoint": "/data"}
            ]})),
        )
        .unwrap();

        let expected = "C: (NTFS)\n  Mount: C:\\\n  Used: 40.00 GB / 100.00 GB (40.0%)\n  Free: 60.00 GB\n\n\
                        Unknown ()\n  Mount: /data\n  Used: 0.00 GB / 0.00 GB (0.0%)\n  Free: 0.00 GB";
        assert_eq!(panel.text, expected);
    }

    #[test]
    fn test_disk_missing_partitions_keeps_text() {
        let prev = DiskPanel {
            text: "previous".into(),
        };
        assert_eq!(render_disk(&prev, &snap(json!({}))).unwrap(), prev);
        assert!(render_disk(&prev, &snap(json!({"partitions": [1]}))).is_err());
    }

    #[test]
    fn test_battery_status_variants() {
        let charging = render_battery(
            &BatteryPanel::default(),
            &snap(json!({"percent": 80.4, "power_plugged": true, "secsleft": null})),
        )
        .unwrap();
        assert_eq!(charging.status_text(), "Status: Plugged In (Charging)");
        assert_eq!(charging.level_text(), "Level: 80%");
        assert_eq!(charging.time_text(), "Time: Charging");

        let full = render_battery(&charging, &snap(json!({"percent": 100}))).unwrap();
        assert_eq!(full.status_text(), "Status: Plugged In (Fully Charged)");

        let discharging = render_battery(
            &full,
            &snap(json!({"percent": 55, "power_plugged": false, "secsleft": 5400})),
        )
        .unwrap();
        assert_eq!(discharging.status_text(), "Status: On Battery");
        assert_eq!(discharging.time_text(), "Time: 1h 30m remaining");

        let unknown = render_battery(&discharging, &snap(json!({"secsleft": -1}))).unwrap();
        assert_eq!(unknown.time_text(), "Time: Calculating...");
        assert_eq!(unknown.level_text(), "Level: 55%");
    }

    #[test]
    fn test_network_render() {
        let mb = 1024u64 * 1024;
        let panel = render_network(
            &NetworkPanel::default(),
            &snap(json!({
                "bytes_sent": 5 * mb,
                "bytes_recv": 12 * mb,
                "interfaces": [
                    {"name": "lo", "is_up": false, "addresses": []},
                    {"name": "eth0", "is_up": true, "speed": 1000, "addresses": [
                        {"family": "AF_LINK", "address": "aa:bb:cc:dd:ee:ff"},
                        {"family": "AF_INET6", "address": "fe80::1"},
                        {"family": "AF_INET", "address": "192.168.1.20", "netmask": "255.255.255.0"}
                    ]}
                ],
                "default_gateway": "192.168.1.1",
                "dns_servers": ["1.1.1.1", "8.8.8.8", "9.9.9.9", "8.8.4.4"],
                "dhcp_enabled": true
            })),
        )
        .unwrap();

        let text = &panel.text;
        assert!(text.starts_with("Network Statistics:\n  Sent: 5.00 MB\n  Received: 12.00 MB\n"));
        assert!(text.contains("  Name: eth0\n  MAC: aa:bb:cc:dd:ee:ff\n  Speed: 1000 Mbps\n  Status: Connected\n"));
        assert!(text.contains("  Local IP: 192.168.1.20\n  Public IP: N/A\n  Subnet Mask: 255.255.255.0\n  Gateway: 192.168.1.1\n"));
        assert!(text.contains("  DHCP: Enabled\n"));
        assert!(text.contains("    - 9.9.9.9\n"));
        assert!(!text.contains("8.8.4.4"));
        assert!(text.ends_with("  Network Type: Direct/Unknown\n"));
    }

    #[test]
    fn test_network_no_active_interface_uses_local_ip() {
        let panel = render_network(
            &NetworkPanel::default(),
            &snap(json!({"interfaces": [], "local_ip": "10.0.0.5"})),
        )
        .unwrap();
        assert!(panel.text.contains("  No active interface detected\n"));
        assert!(panel.text.contains("  Local IP: 10.0.0.5\n"));
        assert!(panel.text.contains("  DNS Servers: N/A\n"));
    }

    #[test]
    fn test_network_without_known_keys_keeps_text() {
        let prev = NetworkPanel::default();
        assert_eq!(
            render_network(&prev, &snap(json!({"timestamp": 1}))).unwrap(),
            prev
        );
        assert!(render_network(&prev, &snap(json!({"interfaces": "eth0"}))).is_err());
    }
}
