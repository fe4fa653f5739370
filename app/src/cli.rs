//! command line options and the command set

use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::config::{DEFAULT_SSH_USER, TestbedConfig};
use crate::error::TestbedError;

pub const HELP_TEXT: &str = "\
Available commands for rt are:
help                 Show this text
check_vms            Run simple checks on the VMs";

pub const DEFAULT_LOG_FILE: &str = "log_resolver_testbed.txt";

#[derive(Args, Debug, Clone)]
pub struct TestbedArgs {
    /// log file, appended to on every run
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
    /// account used on the VMs
    #[arg(long, default_value = DEFAULT_SSH_USER)]
    pub ssh_user: String,
    /// private key for the VMs; uses the ssh agent when omitted
    #[arg(long)]
    pub ssh_key: Option<PathBuf>,
    /// seconds to wait for the TCP connection
    #[arg(long, default_value_t = 10)]
    pub connect_timeout: u64,
    /// seconds any single ssh operation may block
    #[arg(long, default_value_t = 300)]
    pub command_timeout: u64,
}

impl TestbedArgs {
    pub fn config(&self) -> TestbedConfig {
        let mut config = TestbedConfig::builtin();
        config.ssh_user = self.ssh_user.clone();
        config.ssh_key = self.ssh_key.clone();
        config.connect_timeout = Duration::from_secs(self.connect_timeout);
        config.command_timeout = Duration::from_secs(self.command_timeout);
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    CheckVms,
}

impl FromStr for Command {
    type Err = TestbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Command::Help),
            "check_vms" => Ok(Command::CheckVms),
            _ => Err(TestbedError::InvalidCommand(s.to_string())),
        }
    }
}
