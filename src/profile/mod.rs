pub mod assemble;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Everything collected about one host in one run.
/// Field names and order are the wire schema consumed by the Rebuild core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemProfile {
    pub serial: String,
    pub uuid: String,
    pub vendor: String,
    pub product_name: String,
    pub memory_total_bytes: u64,
    pub sockets: Vec<CpuSocket>,
    pub network_interfaces: Vec<NetworkInterface>,
    pub storage_devices: Vec<BlockDevice>,
}

/// One physical CPU package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuSocket {
    pub socket_number: i32,
    pub total_cores: i32,
    pub vendor_id: String,
    pub family_id: i32,
    pub model_id: i32,
    pub model_name: String,
    /// Clock speed in MHz.
    pub mhz: f64,
    pub cache_size: i64,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub name: String,
    pub hardware_addr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDevice {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    #[serde(rename = "type")]
    pub device_type: String,
    pub model: String,
    pub serial: String,
    pub vendor: String,
    pub revision: String,
}

/// Firmware identity fields, read once before any collector runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub serial: String,
    pub uuid: String,
    pub vendor: String,
    pub product_name: String,
}

/// Mutable handle the collectors write into, one section each.
/// Only `finish` produces a `SystemProfile`, and only once every section is set.
#[derive(Debug)]
pub struct ProfileBuilder {
    identity: Identity,
    memory_total_bytes: Option<u64>,
    sockets: Option<Vec<CpuSocket>>,
    network_interfaces: Option<Vec<NetworkInterface>>,
    storage_devices: Option<Vec<BlockDevice>>,
}

impl ProfileBuilder {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            memory_total_bytes: None,
            sockets: None,
            network_interfaces: None,
            storage_devices: None,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn set_memory_total(&mut self, bytes: u64) {
        self.memory_total_bytes = Some(bytes);
    }

    pub fn set_sockets(&mut self, sockets: Vec<CpuSocket>) {
        self.sockets = Some(sockets);
    }

    pub fn set_network_interfaces(&mut self, interfaces: Vec<NetworkInterface>) {
        self.network_interfaces = Some(interfaces);
    }

    pub fn set_storage_devices(&mut self, devices: Vec<BlockDevice>) {
        self.storage_devices = Some(devices);
    }

    pub fn finish(self) -> Result<SystemProfile> {
        let missing = |section: &str| Error::Detection(format!("{} was never collected", section));

        Ok(SystemProfile {
            serial: self.identity.serial,
            uuid: self.identity.uuid,
            vendor: self.identity.vendor,
            product_name: self.identity.product_name,
            memory_total_bytes: self.memory_total_bytes.ok_or_else(|| missing("memory"))?,
            sockets: self.sockets.ok_or_else(|| missing("processors"))?,
            network_interfaces: self
                .network_interfaces
                .ok_or_else(|| missing("network interfaces"))?,
            storage_devices: self.storage_devices.ok_or_else(|| missing("storage"))?,
        })
    }
}
