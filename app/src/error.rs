//! error types for resolver-testbed

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestbedError {
    #[error("This program must be run as {expected} so that all the additional files are found.")]
    WrongInvocation { expected: &'static str },

    #[error("Could not run VBoxManage during sanity check.")]
    HypervisorUnavailable,

    #[error("Could not find '{0}' in the VirtualBox inventory.")]
    VmNotInInventory(String),

    #[error("VBoxManage runningvms failed to run.")]
    ListRunningFailed,

    #[error("{vm} is not in the list of running VMs: '{}'.", .running.join(" "))]
    VmNotRunning { vm: String, running: Vec<String> },

    #[error("Attempt to run on {0}, which is not a valid VM")]
    UnknownVm(String),

    #[error("There was no address for {0}")]
    MissingAddress(String),

    #[error("Could not open an SSH connection to {vm}.")]
    ConnectFailed {
        vm: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not run hostname on {0}")]
    HostnameFailed(String),

    #[error("The host at {address} is not {vm}: '{returned}'")]
    IdentityMismatch {
        address: String,
        vm: String,
        returned: String,
    },

    #[error("Command '{command}' failed on {vm}: {stderr}")]
    RemoteCommandFailed {
        vm: String,
        command: String,
        stderr: String,
    },

    #[error("Could not create {dir} on {vm}: {stderr}")]
    DirectoryCreateFailed {
        vm: String,
        dir: String,
        stderr: String,
    },

    #[error("There were no arguments on the command line.")]
    NoArguments,

    #[error("{0} is not valid command.")]
    InvalidCommand(String),

    #[error("SSH transport error on {vm}: {source}")]
    Transport {
        vm: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TestbedError>;
