//! Network interfaces, addresses and traffic totals.

use serde_json::{json, Value};
use std::net::{IpAddr, Ipv4Addr};
use sysinfo::Networks;

use super::Probe;
use crate::core::telemetry::{Family, Snapshot};
use crate::error::Result;

pub struct NetworkProbe {
    networks: Networks,
}

impl NetworkProbe {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for NetworkProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for NetworkProbe {
    fn family(&self) -> Family {
        Family::Network
    }

    fn sample(&mut self) -> Result<Snapshot> {
        self.networks.refresh(true);

        let mut bytes_sent = 0u64;
        let mut bytes_recv = 0u64;
        let mut local_ip: Option<String> = None;

        let mut names: Vec<&String> = self.networks.keys().collect();
        names.sort();

        let mut interfaces = Vec::with_capacity(names.len());
        for name in names {
            let Some(data) = self.networks.get(name) else {
                continue;
            };

            bytes_sent = bytes_sent.saturating_add(data.total_transmitted());
            bytes_recv = bytes_recv.saturating_add(data.total_received());

            let mac = data.mac_address().to_string();
            let mut addresses = vec![json!({
                "family": "AF_LINK",
                "address": mac,
                "netmask": Value::Null,
            })];

            let mut is_up = false;
            for network in data.ip_networks() {
                let (family, netmask) = match network.addr {
                    IpAddr::V4(_) => ("AF_INET", Value::from(ipv4_netmask(network.prefix))),
                    IpAddr::V6(_) => ("AF_INET6", Value::Null),
                };

                if !network.addr.is_loopback() {
                    is_up = true;
                    if local_ip.is_none() && network.addr.is_ipv4() {
                        local_ip = Some(network.addr.to_string());
                    }
                }

                addresses.push(json!({
                    "family": family,
                    "address": network.addr.to_string(),
                    "netmask": netmask,
                }));
            }

            interfaces.push(json!({
                "name": name,
                "is_up": is_up,
                // Link speed is not exposed by sysinfo
                "speed": 0,
                "mac": mac,
                "addresses": addresses,
            }));
        }

        let mut snapshot = Snapshot::new()
            .with("bytes_sent", bytes_sent)
            .with("bytes_recv", bytes_recv)
            .with("interfaces", interfaces);

        if let Some(ip) = local_ip {
            let private = ip.parse::<Ipv4Addr>().is_ok_and(|addr| addr.is_private());
            snapshot.insert("behind_nat", private);
            snapshot.insert("local_ip", ip);
        }
        if let Some(gateway) = default_gateway() {
            snapshot.insert("default_gateway", gateway.to_string());
        }
        let dns = dns_servers();
        if !dns.is_empty() {
            snapshot.insert("dns_servers", dns);
        }

        Ok(snapshot)
    }
}

fn default_gateway() -> Option<Ipv4Addr> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/net/route")
            .ok()
            .and_then(|table| parse_route_table(&table))
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

fn dns_servers() -> Vec<String> {
    #[cfg(unix)]
    {
        std::fs::read_to_string("/etc/resolv.conf")
            .map(|conf| parse_resolv_conf(&conf))
            .unwrap_or_default()
    }
    #[cfg(not(unix))]
    {
        Vec::new()
    }
}

/// Gateway of the default route in a `/proc/net/route` table.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_route_table(table: &str) -> Option<Ipv4Addr> {
    const RTF_GATEWAY: u32 = 0x2;

    table.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (destination, gateway, flags) = (fields.get(1)?, fields.get(2)?, fields.get(3)?);
        let flags = u32::from_str_radix(flags, 16).ok()?;
        if *destination != "00000000" || flags & RTF_GATEWAY == 0 {
            return None;
        }
        // Addresses are printed from memory in network byte order
        let raw = u32::from_str_radix(gateway, 16).ok()?;
        Some(Ipv4Addr::from(raw.to_ne_bytes()))
    })
}

#[cfg_attr(not(unix), allow(dead_code))]
fn parse_resolv_conf(conf: &str) -> Vec<String> {
    conf.lines()
        .filter_map(|line| {
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (Some("nameserver"), Some(addr)) => Some(addr.to_string()),
                _ => None,
            }
        })
        .collect()
}

fn ipv4_netmask(prefix: u8) -> String {
    let prefix = u32::from(prefix.min(32));
    let bits = if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - prefix)
    };
    Ipv4Addr::from(bits).to_string()
}
