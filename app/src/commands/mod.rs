//! command dispatch for one run of the tool

pub mod check_vms;
pub mod help;

use std::io::Write;
use std::process::ExitCode;

use chrono::Local;
use log::{error, info};

use crate::cli::Command;
use crate::config::TestbedConfig;
use crate::error::{Result, TestbedError};
use crate::hypervisor::VBoxManage;
use crate::process::ProcessRunner;
use crate::ssh::Connector;
use crate::startup;

pub struct Dispatcher<'a, R: ProcessRunner, C: Connector, W: Write> {
    config: &'a TestbedConfig,
    hypervisor: &'a VBoxManage<R>,
    connector: &'a C,
    out: W,
}

impl<'a, R: ProcessRunner, C: Connector, W: Write> Dispatcher<'a, R, C, W> {
    pub fn new(config: &'a TestbedConfig, hypervisor: &'a VBoxManage<R>, connector: &'a C, out: W) -> Self {
        Self {
            config,
            hypervisor,
            connector,
            out,
        }
    }

    /// `invocation` is argv[0]; `args` are passed through untouched
    pub fn run(&mut self, invocation: &str, command: Option<&str>, args: &[String]) -> Result<()> {
        info!("## Starting run on date {}", Local::now().format("%Y-%m-%d"));

        let Some(name) = command else {
            help::run(&mut self.out)?;
            return Err(TestbedError::NoArguments);
        };

        startup::validate(invocation, self.hypervisor, self.config)?;

        info!("Command was {} {}", name, args.join(" "));
        let command = match name.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                help::run(&mut self.out)?;
                return Err(e);
            }
        };

        match command {
            Command::Help => help::run(&mut self.out)?,
            Command::CheckVms => check_vms::run(self.config, self.hypervisor, self.connector)?,
        }

        info!("## Finished run");
        Ok(())
    }

    /// run, logging a fatal error as the last line of the run
    pub fn exit(&mut self, invocation: &str, command: Option<&str>, args: &[String]) -> ExitCode {
        match self.run(invocation, command, args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{} Exiting.", e);
                ExitCode::FAILURE
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }
}
