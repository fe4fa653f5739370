//! static VM registry and per-run configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, TestbedError};

/// the three testbed VMs, in check order
const VM_TABLE: [(&str, &str); 3] = [
    ("gateway-vm", "192.168.56.2"),
    ("servers-vm", "192.168.56.3"),
    ("resolvers-vm", "192.168.56.4"),
];

pub const DEFAULT_SSH_USER: &str = "root";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmDescriptor {
    pub name: String,
    /// address of the management interface, not the data-plane one
    pub control_address: String,
}

impl VmDescriptor {
    pub fn new(name: &str, control_address: &str) -> Self {
        Self {
            name: name.to_string(),
            control_address: control_address.to_string(),
        }
    }
}

/// read-only for the whole run once built
#[derive(Debug, Clone)]
pub struct TestbedConfig {
    vms: Vec<VmDescriptor>,
    pub ssh_user: String,
    /// private key for the remote account; falls back to the ssh agent
    pub ssh_key: Option<PathBuf>,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl TestbedConfig {
    pub fn builtin() -> Self {
        Self::with_vms(
            VM_TABLE
                .iter()
                .map(|(name, addr)| VmDescriptor::new(name, addr))
                .collect(),
        )
    }

    pub fn with_vms(vms: Vec<VmDescriptor>) -> Self {
        Self {
            vms,
            ssh_user: DEFAULT_SSH_USER.to_string(),
            ssh_key: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn vms(&self) -> &[VmDescriptor] {
        &self.vms
    }

    pub fn vm_names(&self) -> impl Iterator<Item = &str> {
        self.vms.iter().map(|vm| vm.name.as_str())
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.vms.iter().any(|vm| vm.name == name)
    }

    /// look up a VM that commands may be sent to
    pub fn vm(&self, name: &str) -> Result<&VmDescriptor> {
        let vm = self
            .vms
            .iter()
            .find(|vm| vm.name == name)
            .ok_or_else(|| TestbedError::UnknownVm(name.to_string()))?;
        if vm.control_address.trim().is_empty() {
            return Err(TestbedError::MissingAddress(name.to_string()));
        }
        Ok(vm)
    }
}
