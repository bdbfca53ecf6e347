use super::Collector;
use crate::error::{Error, Result};
use crate::host::HostRoot;
use crate::profile::{NetworkInterface, ProfileBuilder};
use nix::net::if_::InterfaceFlags;
use tracing::debug;

const NET_BASE: &str = "sys/class/net";

/// Flag name the loopback device carries.
pub const LOOPBACK: &str = "loopback";

/// An interface as the kernel reports it, before filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInterface {
    pub name: String,
    pub flags: Vec<String>,
    pub hardware_addr: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkCollector;

impl Collector for NetworkCollector {
    fn name(&self) -> &'static str {
        "Collecting system network interfaces information"
    }

    fn collect(&self, host: &HostRoot, profile: &mut ProfileBuilder) -> Result<()> {
        let raw = list_interfaces(host)?;
        let interfaces = filter_interfaces(raw);
        debug!(count = interfaces.len(), "network interfaces");
        profile.set_network_interfaces(interfaces);
        Ok(())
    }
}

/// Enumerate interfaces under /sys/class/net, ordered by name.
pub fn list_interfaces(host: &HostRoot) -> Result<Vec<RawInterface>> {
    let mut interfaces = Vec::new();

    for name in host.list_dir(NET_BASE)? {
        let flags_path = format!("{}/{}/flags", NET_BASE, name);
        // Plain files such as bonding_masters live alongside the interfaces
        if !host.exists(&flags_path) {
            continue;
        }

        let flags = decode_flags(&host.read(&flags_path)?)?;
        let hardware_addr = host
            .read_optional(format!("{}/{}/address", NET_BASE, name))?
            .unwrap_or_default();

        interfaces.push(RawInterface {
            name,
            flags,
            hardware_addr,
        });
    }

    Ok(interfaces)
}

/// Decode the kernel's hex `IFF_*` mask (e.g. `0x1003`) into flag names.
pub fn decode_flags(text: &str) -> Result<Vec<String>> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let bits = u32::from_str_radix(digits, 16).map_err(|e| Error::Parse {
        field: "interface flags".to_string(),
        value: text.to_string(),
        detail: e.to_string(),
    })?;
    let flags = InterfaceFlags::from_bits_truncate(bits as _);

    Ok([
        (InterfaceFlags::IFF_UP, "up"),
        (InterfaceFlags::IFF_BROADCAST, "broadcast"),
        (InterfaceFlags::IFF_LOOPBACK, LOOPBACK),
        (InterfaceFlags::IFF_POINTOPOINT, "pointtopoint"),
        (InterfaceFlags::IFF_MULTICAST, "multicast"),
    ]
    .into_iter()
    .filter(|(flag, _)| flags.contains(*flag))
    .map(|(_, name)| name.to_string())
    .collect())
}

/// Drop loopback interfaces; keep name and hardware address of the rest as reported.
pub fn filter_interfaces(raw: Vec<RawInterface>) -> Vec<NetworkInterface> {
    raw.into_iter()
        .filter(|iface| !iface.flags.iter().any(|f| f == LOOPBACK))
        .map(|iface| NetworkInterface {
            name: iface.name,
            hardware_addr: iface.hardware_addr,
        })
        .collect()
}
