//! Single-fact queries against the host: firmware (DMI) attributes, the
//! kernel release, and the initrd release tag.

use crate::error::Result;
use crate::host::HostRoot;
use tracing::warn;

/// Directory the kernel exposes DMI attributes under, one file per attribute.
pub const DMI_BASE: &str = "sys/class/dmi/id";

/// Release tag shipped with the Rebuild initrd image.
pub const BUILD_TAG_FILE: &str = "lib/rebuild/initrd-release";

pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read one firmware attribute (e.g. `product_serial`).
/// An absent attribute is `NotFound`; an empty file is `Ok("")`.
pub fn read_firmware_attribute(host: &HostRoot, name: &str) -> Result<String> {
    host.read(format!("{}/{}", DMI_BASE, name))
}

/// Kernel release from uname(2). Best effort: failure yields an empty string.
pub fn read_kernel_release() -> String {
    match nix::sys::utsname::uname() {
        Ok(uts) => uts.release().to_string_lossy().trim().to_string(),
        Err(e) => {
            warn!(error = %e, "uname failed, kernel release unknown");
            String::new()
        }
    }
}

pub fn read_build_tag(host: &HostRoot) -> Result<String> {
    host.read(BUILD_TAG_FILE)
}
