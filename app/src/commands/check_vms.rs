//! check_vms command implementation

use log::info;

use crate::config::TestbedConfig;
use crate::error::Result;
use crate::hypervisor::VBoxManage;
use crate::process::ProcessRunner;
use crate::remote::RemoteExecutor;
use crate::sanity::SanityChecker;
use crate::ssh::Connector;

pub fn run<R: ProcessRunner, C: Connector>(
    config: &TestbedConfig,
    hypervisor: &VBoxManage<R>,
    connector: &C,
) -> Result<()> {
    let executor = RemoteExecutor::new(config, hypervisor, connector);
    let report = SanityChecker::new(&executor, config.vm_names()).check_all()?;
    if !report.created.is_empty() {
        info!("Created {} missing directories", report.created.len());
    }
    info!("VMs are running as expected");
    Ok(())
}
