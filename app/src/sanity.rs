//! make sure the VMs are up and have their working directories

use log::info;

use crate::error::{Result, TestbedError};
use crate::process::ProcessRunner;
use crate::remote::{CommandOutcome, RemoteExecutor};
use crate::ssh::Connector;

/// directories every VM needs
pub const WORK_DIRS: [&str; 2] = ["~/Target", "~/Source"];

const MISSING_MARKER: &str = "No such file or directory";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SanityReport {
    /// (vm, directory) pairs created during this run
    pub created: Vec<(String, String)>,
}

pub struct SanityChecker<'a, R: ProcessRunner, C: Connector> {
    executor: &'a RemoteExecutor<'a, R, C>,
    vms: Vec<String>,
}

impl<'a, R: ProcessRunner, C: Connector> SanityChecker<'a, R, C> {
    pub fn new<'n>(executor: &'a RemoteExecutor<'a, R, C>, vm_names: impl Iterator<Item = &'n str>) -> Self {
        Self {
            executor,
            vms: vm_names.map(str::to_string).collect(),
        }
    }

    pub fn check_all(&self) -> Result<SanityReport> {
        let mut report = SanityReport::default();
        for vm in &self.vms {
            info!("Starting sanity check on {}", vm);
            self.executor.hypervisor().ensure_running(vm)?;
            for dir in WORK_DIRS {
                if self.ensure_dir(vm, dir)? {
                    info!("Created {} on {}", dir, vm);
                    report.created.push((vm.clone(), dir.to_string()));
                }
            }
        }
        Ok(report)
    }

    /// true if the directory had to be created
    fn ensure_dir(&self, vm: &str, dir: &str) -> Result<bool> {
        let listing = format!("ls {}", dir);
        match self.executor.run(&listing, vm)? {
            CommandOutcome::Success { .. } => Ok(false),
            CommandOutcome::Failed { stderr, .. } if stderr.contains(MISSING_MARKER) => {
                match self.executor.run(&format!("mkdir {}", dir), vm)? {
                    CommandOutcome::Success { .. } => Ok(true),
                    CommandOutcome::Failed { stderr, .. } => Err(TestbedError::DirectoryCreateFailed {
                        vm: vm.to_string(),
                        dir: dir.to_string(),
                        stderr,
                    }),
                }
            }
            CommandOutcome::Failed { stderr, .. } => Err(TestbedError::RemoteCommandFailed {
                vm: vm.to_string(),
                command: listing,
                stderr,
            }),
        }
    }
}
