//! synchronous local process execution

use std::process::Command;

use log::debug;

/// captured result of a local invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process could not be spawned or was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// runs a local program to completion
pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> ProcessOutput;
}

/// runner backed by `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> ProcessOutput {
        debug!("Running {} {}", program, args.join(" "));
        match Command::new(program).args(args).output() {
            Ok(out) => ProcessOutput {
                exit_code: out.status.code(),
                stdout: latin1(&out.stdout),
                stderr: latin1(&out.stderr),
            },
            // a missing binary reads the same as a failed one to callers
            Err(e) => ProcessOutput {
                exit_code: None,
                stdout: String::new(),
                stderr: e.to_string(),
            },
        }
    }
}

/// VirtualBox may report names that are not valid UTF-8
pub fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
