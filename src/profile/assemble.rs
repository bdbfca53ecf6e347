use super::{Identity, ProfileBuilder, SystemProfile};
use crate::collect::{Collector, all_collectors};
use crate::config::AgentConfig;
use crate::host::HostRoot;
use crate::readers::read_firmware_attribute;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Runs the collectors in order against one profile.
/// The first failure aborts the run and the partial profile is dropped.
#[derive(Debug)]
pub struct Assembler {
    host: HostRoot,
    collectors: Vec<Box<dyn Collector>>,
}

impl Assembler {
    pub fn new(config: &AgentConfig) -> Self {
        Self::with_collectors(HostRoot::new(&config.host.root), all_collectors(config))
    }

    pub fn with_collectors(host: HostRoot, collectors: Vec<Box<dyn Collector>>) -> Self {
        Self { host, collectors }
    }

    pub fn read_identity(&self) -> Result<Identity> {
        let read = |name: &str| {
            read_firmware_attribute(&self.host, name)
                .with_context(|| format!("Retrieving DMI value {}", name))
        };

        Ok(Identity {
            product_name: read("product_name")?,
            serial: read("product_serial")?,
            vendor: read("chassis_vendor")?,
            uuid: read("product_uuid")?,
        })
    }

    pub fn assemble(&self) -> Result<SystemProfile> {
        info!("Collecting system information to build a profile");

        let mut builder = ProfileBuilder::new(self.read_identity()?);
        debug!(identity = ?builder.identity(), "identity");

        for collector in &self.collectors {
            debug!(collector = collector.name(), "running");
            collector
                .collect(&self.host, &mut builder)
                .context(collector.name())?;
        }

        Ok(builder.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::profile::{BlockDevice, NetworkInterface};
    use std::fs;

    #[derive(Debug)]
    struct Fixed;

    impl Collector for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn collect(&self, _host: &HostRoot, profile: &mut ProfileBuilder) -> crate::error::Result<()> {
            profile.set_memory_total(42);
            profile.set_sockets(Vec::new());
            profile.set_network_interfaces(vec![NetworkInterface {
                name: "eth0".to_string(),
                hardware_addr: String::new(),
            }]);
            profile.set_storage_devices(Vec::<BlockDevice>::new());
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl Collector for Failing {
        fn name(&self) -> &'static str {
            "Collecting block device information"
        }

        fn collect(&self, _host: &HostRoot, _profile: &mut ProfileBuilder) -> crate::error::Result<()> {
            Err(Error::ToolNotFound("lsblk".to_string()))
        }
    }

    fn identity_host() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let dmi = tmp.path().join("sys/class/dmi/id");
        fs::create_dir_all(&dmi).unwrap();
        fs::write(dmi.join("product_name"), "TestBox\n").unwrap();
        fs::write(dmi.join("product_serial"), "SN1\n").unwrap();
        fs::write(dmi.join("chassis_vendor"), "Acme\n").unwrap();
        fs::write(dmi.join("product_uuid"), "UUID1\n").unwrap();
        tmp
    }

    #[test]
    fn test_identity_fields() {
        let tmp = identity_host();
        let assembler = Assembler::with_collectors(HostRoot::new(tmp.path()), vec![Box::new(Fixed)]);
        let profile = assembler.assemble().unwrap();
        assert_eq!(profile.product_name, "TestBox");
        assert_eq!(profile.serial, "SN1");
        assert_eq!(profile.vendor, "Acme");
        assert_eq!(profile.uuid, "UUID1");
        assert_eq!(profile.memory_total_bytes, 42);
    }

    #[test]
    fn test_missing_identity_names_operation() {
        let tmp = identity_host();
        fs::remove_file(tmp.path().join("sys/class/dmi/id/product_uuid")).unwrap();

        let assembler = Assembler::with_collectors(HostRoot::new(tmp.path()), vec![Box::new(Fixed)]);
        let err = assembler.assemble().unwrap_err();
        assert_eq!(err.to_string(), "Retrieving DMI value product_uuid");
        assert!(err.downcast_ref::<Error>().is_some_and(Error::is_not_found));
    }

    #[test]
    fn test_collector_failure_aborts() {
        let tmp = identity_host();
        let assembler = Assembler::with_collectors(
            HostRoot::new(tmp.path()),
            vec![Box::new(Fixed), Box::new(Failing)],
        );
        let err = assembler.assemble().unwrap_err();
        assert_eq!(err.to_string(), "Collecting block device information");
        assert!(format!("{:#}", err).contains("lsblk"));
    }

    #[test]
    fn test_unfinished_profile_is_rejected() {
        let tmp = identity_host();
        let assembler = Assembler::with_collectors(HostRoot::new(tmp.path()), Vec::new());
        assert!(assembler.assemble().is_err());
    }
}
