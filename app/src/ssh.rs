//! ssh transport to the testbed VMs

use std::io::{self, Read};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use log::debug;

use crate::config::{TestbedConfig, VmDescriptor};
use crate::error::{Result, TestbedError};

pub const SSH_PORT: u16 = 22;

/// what a remote command left behind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// an open, authenticated session on one VM
pub trait RemoteSession {
    fn exec(&mut self, command: &str) -> Result<ExecOutput>;
}

/// opens sessions to VMs
pub trait Connector {
    fn connect(&self, vm: &VmDescriptor) -> Result<Box<dyn RemoteSession>>;
}

pub struct Ssh2Connector {
    user: String,
    key: Option<PathBuf>,
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl Ssh2Connector {
    pub fn new(config: &TestbedConfig) -> Self {
        Self {
            user: config.ssh_user.clone(),
            key: config.ssh_key.clone(),
            connect_timeout: config.connect_timeout,
            command_timeout: config.command_timeout,
        }
    }

    fn open(&self, vm: &VmDescriptor) -> io::Result<ssh2::Session> {
        let addr = (vm.control_address.as_str(), SSH_PORT)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("no socket address for {}", vm.control_address),
                )
            })?;
        let tcp = TcpStream::connect_timeout(&addr, self.connect_timeout)?;

        let mut session = ssh2::Session::new()?;
        session.set_tcp_stream(tcp);
        // 0 would mean wait forever
        session.set_timeout(self.command_timeout.as_millis().clamp(1, u32::MAX as u128) as u32);
        session.handshake()?;
        match &self.key {
            Some(key) => session.userauth_pubkey_file(&self.user, None, key, None)?,
            None => session.userauth_agent(&self.user)?,
        }
        if !session.authenticated() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("authentication as {} rejected", self.user),
            ));
        }
        Ok(session)
    }
}

impl Connector for Ssh2Connector {
    fn connect(&self, vm: &VmDescriptor) -> Result<Box<dyn RemoteSession>> {
        debug!("Opening SSH session to {} at {}", vm.name, vm.control_address);
        let session = self.open(vm).map_err(|source| TestbedError::ConnectFailed {
            vm: vm.name.clone(),
            source,
        })?;
        Ok(Box::new(Ssh2Session {
            vm: vm.name.clone(),
            session,
        }))
    }
}

pub struct Ssh2Session {
    vm: String,
    session: ssh2::Session,
}

impl Ssh2Session {
    fn exec_inner(&mut self, command: &str) -> io::Result<ExecOutput> {
        let mut channel = self.session.channel_session()?;
        channel.exec(command)?;
        let mut stdout = String::new();
        channel.read_to_string(&mut stdout)?;
        let mut stderr = String::new();
        channel.stderr().read_to_string(&mut stderr)?;
        channel.wait_close()?;
        let status = channel.exit_status()?;
        let signal = channel.exit_signal()?.exit_signal;
        Ok(ExecOutput {
            exit_code: exit_code(status, signal.as_deref(), &mut stderr),
            stdout,
            stderr,
        })
    }
}

/// libssh2 reports status 0 for a command killed by a signal; map that to
/// the shell's 128+N convention so it reads as a failure
fn exit_code(status: i32, signal: Option<&str>, stderr: &mut String) -> i32 {
    let Some(signal) = signal.filter(|s| !s.is_empty()) else {
        return status;
    };
    if stderr.trim().is_empty() {
        *stderr = format!("terminated by signal SIG{}", signal);
    }
    if status != 0 {
        return status;
    }
    let number = match signal {
        "HUP" => 1,
        "INT" => 2,
        "QUIT" => 3,
        "ILL" => 4,
        "ABRT" => 6,
        "FPE" => 8,
        "KILL" => 9,
        "SEGV" => 11,
        "PIPE" => 13,
        "ALRM" => 14,
        "TERM" => 15,
        _ => return 255,
    };
    128 + number
}

impl RemoteSession for Ssh2Session {
    fn exec(&mut self, command: &str) -> Result<ExecOutput> {
        self.exec_inner(command)
            .map_err(|source| TestbedError::Transport {
                vm: self.vm.clone(),
                source,
            })
    }
}
