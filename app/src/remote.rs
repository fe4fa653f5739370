//! run shell commands on a named testbed VM

use std::fmt;

use log::debug;

use crate::config::TestbedConfig;
use crate::error::{Result, TestbedError};
use crate::hypervisor::VBoxManage;
use crate::process::ProcessRunner;
use crate::ssh::Connector;

/// command used to confirm we reached the VM we think we did
pub const IDENTITY_COMMAND: &str = "hostname";

/// result of a command that ran to completion on the VM
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success { stdout: String },
    Failed { exit_code: i32, stderr: String },
}

impl CommandOutcome {
    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success { .. })
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Success { stdout } => write!(f, "{}", stdout),
            CommandOutcome::Failed { stderr, .. } => write!(f, "Error: {}", stderr),
        }
    }
}

pub struct RemoteExecutor<'a, R: ProcessRunner, C: Connector> {
    config: &'a TestbedConfig,
    hypervisor: &'a VBoxManage<R>,
    connector: &'a C,
}

impl<'a, R: ProcessRunner, C: Connector> RemoteExecutor<'a, R, C> {
    pub fn new(config: &'a TestbedConfig, hypervisor: &'a VBoxManage<R>, connector: &'a C) -> Self {
        Self {
            config,
            hypervisor,
            connector,
        }
    }

    pub fn hypervisor(&self) -> &VBoxManage<R> {
        self.hypervisor
    }

    /// run `command` on `vm_name` over a fresh session.
    ///
    /// only a non-zero exit of `command` itself comes back as `Ok`;
    /// everything that happens before it is an error.
    pub fn run(&self, command: &str, vm_name: &str) -> Result<CommandOutcome> {
        let vm = self.config.vm(vm_name)?;
        self.hypervisor.ensure_running(vm_name)?;

        let mut session = self.connector.connect(vm)?;

        debug!("Executing command on {}: {}", vm_name, IDENTITY_COMMAND);
        let identity = session.exec(IDENTITY_COMMAND)?;
        if !identity.success() {
            return Err(TestbedError::HostnameFailed(vm_name.to_string()));
        }
        if identity.stdout.trim_end() != vm_name {
            return Err(TestbedError::IdentityMismatch {
                address: vm.control_address.clone(),
                vm: vm_name.to_string(),
                returned: identity.stdout,
            });
        }

        debug!("Executing command on {}: {}", vm_name, command);
        let out = session.exec(command)?;
        debug!("{} on {} exited with {}", command, vm_name, out.exit_code);
        if out.success() {
            Ok(CommandOutcome::Success {
                stdout: out.stdout.trim().to_string(),
            })
        } else {
            Ok(CommandOutcome::Failed {
                exit_code: out.exit_code,
                stderr: out.stderr.trim().to_string(),
            })
        }
    }
}
