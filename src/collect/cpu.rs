use super::Collector;
use crate::error::{Error, Result};
use crate::host::HostRoot;
use crate::numeric::{parse_f64, parse_i32, parse_i64};
use crate::profile::{CpuSocket, ProfileBuilder};
use tracing::debug;

/// One logical CPU as reported by /proc/cpuinfo, fields still as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogicalCpu {
    pub physical_id: String,
    pub cpu_cores: String,
    pub vendor_id: String,
    pub family: String,
    pub model: String,
    pub model_name: String,
    pub mhz: String,
    pub cache_size: String,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessorCollector;

impl Collector for ProcessorCollector {
    fn name(&self) -> &'static str {
        "Collecting system processor information"
    }

    fn collect(&self, host: &HostRoot, profile: &mut ProfileBuilder) -> Result<()> {
        let cpuinfo = host.read("proc/cpuinfo")?;
        let cpus = parse_cpuinfo(&cpuinfo);
        if cpus.is_empty() {
            return Err(Error::Detection(
                "no processors listed in /proc/cpuinfo".to_string(),
            ));
        }

        let sockets = group_sockets(&cpus)?;
        debug!(logical = cpus.len(), sockets = sockets.len(), "processors");
        profile.set_sockets(sockets);
        Ok(())
    }
}

/// Split /proc/cpuinfo into one record per `processor` stanza.
pub fn parse_cpuinfo(cpuinfo: &str) -> Vec<LogicalCpu> {
    let mut cpus = Vec::new();
    let mut current: Option<LogicalCpu> = None;

    for line in cpuinfo.lines() {
        if line.trim().is_empty() {
            cpus.extend(current.take());
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        if key.trim() == "processor" {
            cpus.extend(current.take());
            current = Some(LogicalCpu::default());
            continue;
        }

        // Stanzas without a processor line (e.g. the ARM "Hardware" trailer) are skipped
        let Some(cpu) = current.as_mut() else {
            continue;
        };

        match key.trim() {
            "physical id" => cpu.physical_id = value.to_string(),
            "cpu cores" => cpu.cpu_cores = value.to_string(),
            "vendor_id" => cpu.vendor_id = value.to_string(),
            "cpu family" => cpu.family = value.to_string(),
            "model" => cpu.model = value.to_string(),
            "model name" => cpu.model_name = value.to_string(),
            "cpu MHz" => cpu.mhz = value.to_string(),
            "cache size" => cpu.cache_size = value.to_string(),
            "flags" => cpu.flags = value.split_whitespace().map(String::from).collect(),
            _ => {}
        }
    }
    cpus.extend(current);

    cpus
}

/// Collapse logical CPUs into one record per physical package.
///
/// An empty physical id counts as socket 0. When several logical CPUs share a
/// socket the last one in input order supplies the fields. Sockets keep the
/// order in which their id first appeared.
pub fn group_sockets(cpus: &[LogicalCpu]) -> Result<Vec<CpuSocket>> {
    let mut sockets: Vec<CpuSocket> = Vec::new();

    for cpu in cpus {
        let id = if cpu.physical_id.is_empty() {
            "0"
        } else {
            cpu.physical_id.as_str()
        };
        let socket = to_socket(parse_i32("physical id", id)?, cpu)?;

        match sockets
            .iter_mut()
            .find(|s| s.socket_number == socket.socket_number)
        {
            Some(slot) => *slot = socket,
            None => sockets.push(socket),
        }
    }

    Ok(sockets)
}

fn to_socket(socket_number: i32, cpu: &LogicalCpu) -> Result<CpuSocket> {
    Ok(CpuSocket {
        socket_number,
        total_cores: optional(&cpu.cpu_cores, |t| parse_i32("cpu cores", t))?,
        vendor_id: cpu.vendor_id.clone(),
        family_id: optional(&cpu.family, |t| parse_i32("cpu family", t))?,
        model_id: optional(&cpu.model, |t| parse_i32("model", t))?,
        model_name: cpu.model_name.clone(),
        mhz: optional(&cpu.mhz, |t| parse_f64("cpu MHz", t))?,
        // Format: 8192 KB
        cache_size: optional(&cpu.cache_size, |t| {
            parse_i64("cache size", t.split_whitespace().next().unwrap_or_default())
        })?,
        flags: cpu.flags.clone(),
    })
}

/// Fields the kernel omits on some architectures read as zero; present
/// values must parse.
fn optional<T: Default>(text: &str, parse: impl FnOnce(&str) -> Result<T>) -> Result<T> {
    if text.is_empty() {
        Ok(T::default())
    } else {
        parse(text)
    }
}
