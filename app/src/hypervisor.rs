//! wrapper around the VBoxManage cli

use log::debug;

use crate::error::{Result, TestbedError};
use crate::process::ProcessRunner;

pub const VBOXMANAGE: &str = "VBoxManage";

/// VirtualBox as seen through its command line tool
pub struct VBoxManage<R: ProcessRunner> {
    runner: R,
}

impl<R: ProcessRunner> VBoxManage<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// make sure the cli is installed and callable
    pub fn version(&self) -> Result<String> {
        let out = self.runner.run(VBOXMANAGE, &["--version"]);
        if !out.success() {
            return Err(TestbedError::HypervisorUnavailable);
        }
        Ok(out.stdout.trim().to_string())
    }

    /// true if the VM is registered, running or not
    pub fn vm_exists(&self, name: &str) -> bool {
        self.runner.run(VBOXMANAGE, &["showvminfo", name]).success()
    }

    pub fn running_vms(&self) -> Result<Vec<String>> {
        let out = self.runner.run(VBOXMANAGE, &["list", "runningvms"]);
        if !out.success() {
            return Err(TestbedError::ListRunningFailed);
        }
        Ok(parse_running_vms(&out.stdout))
    }

    pub fn ensure_running(&self, name: &str) -> Result<()> {
        let running = self.running_vms()?;
        if !running.iter().any(|vm| vm == name) {
            return Err(TestbedError::VmNotRunning {
                vm: name.to_string(),
                running,
            });
        }
        debug!("{} is running", name);
        Ok(())
    }
}

/// pull the quoted names out of `"name" {uuid}` lines
pub fn parse_running_vms(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix('"')?;
            let end = rest.find('"')?;
            Some(rest[..end].to_string())
        })
        .collect()
}
