#![allow(unused)]
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;
use std::sync::Once;

use log::LevelFilter;

use crate::config::{TestbedConfig, VmDescriptor};
use crate::error::{Result, TestbedError};
use crate::process::{ProcessOutput, ProcessRunner};
use crate::ssh::{Connector, ExecOutput, RemoteSession};

/// scripted `ProcessRunner` keyed by the joined argument list.
/// anything unscripted behaves like a binary that could not be spawned.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, ProcessOutput>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, args: &str, code: i32, stdout: &str) -> Self {
        self.responses.insert(
            args.to_string(),
            ProcessOutput {
                exit_code: Some(code),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, _program: &str, args: &[&str]) -> ProcessOutput {
        let key = args.join(" ");
        self.calls.borrow_mut().push(key.clone());
        self.responses.get(&key).cloned().unwrap_or_default()
    }
}

/// a healthy VirtualBox host with every builtin VM registered and running
pub fn running_all() -> MockRunner {
    let cfg = TestbedConfig::builtin();
    let listing: String = cfg
        .vm_names()
        .enumerate()
        .map(|(i, name)| format!("\"{name}\" {{00000000-0000-0000-0000-00000000000{i}}}\n"))
        .collect();
    let mut runner = MockRunner::new()
        .respond("--version", 0, "7.0.14r161095\n")
        .respond("list runningvms", 0, &listing);
    for name in cfg.vm_names() {
        runner = runner.respond(&format!("showvminfo {name}"), 0, "");
    }
    runner
}

#[derive(Debug, Default)]
struct Log {
    connections: Vec<String>,
    commands: Vec<(String, String)>,
}

/// scripted ssh endpoint; every VM answers `hostname` with its own name
/// and any other unscripted command succeeds with no output
#[derive(Debug, Default)]
pub struct MockConnector {
    replies: HashMap<(String, String), ExecOutput>,
    refused: Vec<String>,
    log: Rc<RefCell<Log>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, vm: &str, command: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.replies.insert(
            (vm.to_string(), command.to_string()),
            ExecOutput {
                exit_code: code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn hostname(self, vm: &str, reply: &str) -> Self {
        self.respond(vm, "hostname", 0, reply, "")
    }

    pub fn refuse(mut self, vm: &str) -> Self {
        self.refused.push(vm.to_string());
        self
    }

    pub fn connections(&self) -> Vec<String> {
        self.log.borrow().connections.clone()
    }

    pub fn commands(&self) -> Vec<(String, String)> {
        self.log.borrow().commands.clone()
    }
}

impl Connector for MockConnector {
    fn connect(&self, vm: &VmDescriptor) -> Result<Box<dyn RemoteSession>> {
        if self.refused.contains(&vm.name) {
            return Err(TestbedError::ConnectFailed {
                vm: vm.name.clone(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            });
        }
        self.log.borrow_mut().connections.push(vm.name.clone());
        Ok(Box::new(MockSession {
            vm: vm.name.clone(),
            replies: self.replies.clone(),
            log: self.log.clone(),
        }))
    }
}

struct MockSession {
    vm: String,
    replies: HashMap<(String, String), ExecOutput>,
    log: Rc<RefCell<Log>>,
}

impl RemoteSession for MockSession {
    fn exec(&mut self, command: &str) -> Result<ExecOutput> {
        self.log
            .borrow_mut()
            .commands
            .push((self.vm.clone(), command.to_string()));
        if let Some(reply) = self.replies.get(&(self.vm.clone(), command.to_string())) {
            return Ok(reply.clone());
        }
        let stdout = if command == "hostname" {
            format!("{}\n", self.vm)
        } else {
            String::new()
        };
        Ok(ExecOutput {
            exit_code: 0,
            stdout,
            stderr: String::new(),
        })
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

static CAPTURE: Once = Once::new();

/// route info-level log lines to the calling test thread, dropping earlier ones
pub fn capture_logs() {
    CAPTURE.call_once(|| {
        fern::Dispatch::new()
            .level(LevelFilter::Info)
            .chain(fern::Output::call(|record| {
                CAPTURED.with(|c| c.borrow_mut().push(record.args().to_string()))
            }))
            .apply()
            .expect("test logger installed twice");
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

/// lines logged on this thread since `capture_logs`
pub fn logged() -> Vec<String> {
    CAPTURED.with(|c| c.borrow().clone())
}
