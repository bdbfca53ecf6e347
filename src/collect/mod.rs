pub mod cpu;
pub mod memory;
pub mod network;
pub mod storage;

use crate::config::AgentConfig;
use crate::error::Result;
use crate::host::HostRoot;
use crate::profile::ProfileBuilder;

/// A collector queries one subsystem and writes its section of the profile.
pub trait Collector: std::fmt::Debug {
    /// Operation name reported when this collector fails.
    fn name(&self) -> &'static str;

    fn collect(&self, host: &HostRoot, profile: &mut ProfileBuilder) -> Result<()>;
}

/// Every collector, in the order they run: memory, processors, network, storage.
pub fn all_collectors(config: &AgentConfig) -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(memory::MemoryCollector),
        Box::new(cpu::ProcessorCollector),
        Box::new(network::NetworkCollector),
        Box::new(storage::StorageCollector::new(&config.storage)),
    ]
}
