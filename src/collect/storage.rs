use super::Collector;
use crate::command::{find_executable, run_with_timeout};
use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::host::HostRoot;
use crate::numeric::parse_u64;
use crate::profile::{BlockDevice, ProfileBuilder};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Whole devices only (`-d`), JSON (`-J`), sizes in bytes (`-b`).
pub const LSBLK_ARGS: &[&str] = &[
    "--output",
    "NAME,SIZE,TYPE,MODEL,SERIAL,VENDOR,REV",
    "-J",
    "-d",
    "-b",
];

#[derive(Debug, Clone)]
pub struct StorageCollector {
    program: String,
    timeout: Duration,
}

impl StorageCollector {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            program: config.lsblk.clone(),
            timeout: config.timeout(),
        }
    }
}

impl Collector for StorageCollector {
    fn name(&self) -> &'static str {
        "Collecting block device information"
    }

    fn collect(&self, host: &HostRoot, profile: &mut ProfileBuilder) -> Result<()> {
        let lsblk = find_executable(&self.program)?;
        let args = lsblk_args(host.root());
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = run_with_timeout(&lsblk, &args, self.timeout)?;
        let devices = parse_lsblk(&self.program, &output)?;
        debug!(count = devices.len(), "block devices");
        profile.set_storage_devices(devices);
        Ok(())
    }
}

/// lsblk reads the live system's sysfs unless pointed at another tree.
fn lsblk_args(root: &Path) -> Vec<String> {
    let mut args: Vec<String> = LSBLK_ARGS.iter().map(|a| a.to_string()).collect();
    if root != Path::new("/") {
        args.push("--sysroot".to_string());
        args.push(root.to_string_lossy().into_owned());
    }
    args
}

#[derive(Debug, Deserialize)]
struct LsblkOutput {
    blockdevices: Vec<LsblkDevice>,
}

#[derive(Debug, Deserialize)]
struct LsblkDevice {
    name: String,
    size: LsblkSize,
    #[serde(rename = "type")]
    device_type: Option<String>,
    model: Option<String>,
    serial: Option<String>,
    vendor: Option<String>,
    rev: Option<String>,
}

/// util-linux before 2.33 prints sizes as strings, later versions as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LsblkSize {
    Bytes(u64),
    Text(String),
}

/// Validate the JSON shape of lsblk output, then convert each row.
/// Rows keep lsblk's order and none are filtered out.
pub fn parse_lsblk(program: &str, output: &[u8]) -> Result<Vec<BlockDevice>> {
    let parsed: LsblkOutput = serde_json::from_slice(output).map_err(|e| Error::Malformed {
        program: program.to_string(),
        detail: e.to_string(),
    })?;

    parsed
        .blockdevices
        .into_iter()
        .map(|dev| -> Result<BlockDevice> {
            let size = match dev.size {
                LsblkSize::Bytes(n) => n,
                LsblkSize::Text(text) => parse_u64(&format!("size of {}", dev.name), &text)?,
            };
            Ok(BlockDevice {
                name: dev.name,
                size,
                device_type: dev.device_type.unwrap_or_default(),
                model: dev.model.unwrap_or_default(),
                serial: dev.serial.unwrap_or_default(),
                vendor: dev.vendor.unwrap_or_default(),
                revision: dev.rev.unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsblk_args_follow_host_root() {
        assert_eq!(lsblk_args(Path::new("/")), LSBLK_ARGS);
        let args = lsblk_args(Path::new("/mnt/target"));
        assert_eq!(&args[..LSBLK_ARGS.len()], LSBLK_ARGS);
        assert_eq!(&args[LSBLK_ARGS.len()..], ["--sysroot", "/mnt/target"]);
    }

    #[test]
    fn test_parse_string_sizes() {
        let json = br#"{
           "blockdevices": [
              {"name": "sda", "size": "1073741824", "type": "disk", "model": "Samsung SSD 860 ", "serial": "S3Z9NB0K", "vendor": "ATA     ", "rev": "RVT01B6Q"},
              {"name": "sr0", "size": "1073741312", "type": "rom", "model": null, "serial": null, "vendor": null, "rev": null}
           ]
        }"#;
        let devices = parse_lsblk("lsblk", json).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "sda");
        assert_eq!(devices[0].size, 1_073_741_824);
        assert_eq!(devices[0].device_type, "disk");
        assert_eq!(devices[0].vendor, "ATA     ");
        assert_eq!(devices[0].revision, "RVT01B6Q");
        assert_eq!(devices[1].device_type, "rom");
        assert_eq!(devices[1].model, "");
    }

    #[test]
    fn test_parse_numeric_sizes() {
        let json = br#"{"blockdevices": [{"name": "nvme0n1", "size": 500107862016, "type": "disk", "model": "WDC", "serial": "X", "vendor": null, "rev": "1"}]}"#;
        let devices = parse_lsblk("lsblk", json).unwrap();
        assert_eq!(devices[0].size, 500_107_862_016);
    }

    #[test]
    fn test_malformed_size_is_error_not_zero() {
        let json = br#"{"blockdevices": [{"name": "sda", "size": "465.8G", "type": "disk"}]}"#;
        let err = parse_lsblk("lsblk", json).unwrap_err();
        match err {
            Error::Parse { field, value, .. } => {
                assert_eq!(field, "size of sda");
                assert_eq!(value, "465.8G");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_schema_violations() {
        assert!(matches!(
            parse_lsblk("lsblk", b"not json").unwrap_err(),
            Error::Malformed { .. }
        ));
        assert!(matches!(
            parse_lsblk("lsblk", br#"{"devices": []}"#).unwrap_err(),
            Error::Malformed { .. }
        ));
        assert!(matches!(
            parse_lsblk("lsblk", br#"{"blockdevices": [{"name": "sda"}]}"#).unwrap_err(),
            Error::Malformed { .. }
        ));
    }

    #[test]
    fn test_empty_device_list() {
        let devices = parse_lsblk("lsblk", br#"{"blockdevices": []}"#).unwrap();
        assert!(devices.is_empty());
    }
}
