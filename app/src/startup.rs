//! checks on the control host before any command runs

use log::debug;

use crate::config::TestbedConfig;
use crate::error::{Result, TestbedError};
use crate::hypervisor::VBoxManage;
use crate::process::ProcessRunner;

/// relative path the binary must be started with, so sibling files resolve
pub const EXPECTED_INVOCATION: &str = "./rt";

pub fn validate<R: ProcessRunner>(
    invocation: &str,
    hypervisor: &VBoxManage<R>,
    config: &TestbedConfig,
) -> Result<()> {
    if invocation != EXPECTED_INVOCATION {
        return Err(TestbedError::WrongInvocation {
            expected: EXPECTED_INVOCATION,
        });
    }

    let version = hypervisor.version()?;
    debug!("VBoxManage version {}", version);

    // registered is enough here; running is checked per command
    for name in config.vm_names() {
        if !hypervisor.vm_exists(name) {
            return Err(TestbedError::VmNotInInventory(name.to_string()));
        }
    }
    Ok(())
}
