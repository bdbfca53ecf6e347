use super::Collector;
use crate::error::{Error, Result};
use crate::host::HostRoot;
use crate::numeric::parse_u64;
use crate::profile::ProfileBuilder;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryCollector;

impl Collector for MemoryCollector {
    fn name(&self) -> &'static str {
        "Collecting system memory information"
    }

    fn collect(&self, host: &HostRoot, profile: &mut ProfileBuilder) -> Result<()> {
        let meminfo = host.read("proc/meminfo")?;
        let total = parse_mem_total(&meminfo)?;
        debug!(bytes = total, "memory total");
        profile.set_memory_total(total);
        Ok(())
    }
}

/// Total physical memory in bytes from the `MemTotal:` line of /proc/meminfo.
pub fn parse_mem_total(meminfo: &str) -> Result<u64> {
    let line = meminfo
        .lines()
        .find(|l| l.starts_with("MemTotal:"))
        .ok_or_else(|| Error::Detection("MemTotal missing from /proc/meminfo".to_string()))?;

    // Format: MemTotal:       16318412 kB
    let value = line.split_whitespace().nth(1).unwrap_or_default();
    let kib = parse_u64("MemTotal", value)?;
    kib.checked_mul(1024)
        .ok_or_else(|| Error::Detection(format!("MemTotal out of range: {} kB", kib)))
}
