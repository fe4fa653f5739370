//! resolver-testbed: control plane for the three-VM DNS resolver testbed
//!
//! checks the VirtualBox VMs and runs commands on them over ssh

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod hypervisor;
pub mod logging;
pub mod process;
pub mod remote;
pub mod sanity;
pub mod ssh;
pub mod startup;

#[cfg(test)]
pub mod mocks;
