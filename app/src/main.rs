//! rt - resolver testbed control tool

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use resolver_testbed::cli::TestbedArgs;
use resolver_testbed::commands::Dispatcher;
use resolver_testbed::hypervisor::VBoxManage;
use resolver_testbed::logging;
use resolver_testbed::process::SystemRunner;
use resolver_testbed::ssh::Ssh2Connector;

#[derive(Parser)]
#[command(author, version, about = "Testbed for DNS resolvers")]
struct Cli {
    #[command(flatten)]
    testbed: TestbedArgs,

    /// help | check_vms
    command: Option<String>,

    /// passed through to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(&cli.testbed.log_file)
        .with_context(|| format!("cannot open log file {}", cli.testbed.log_file.display()))?;

    let config = cli.testbed.config();
    let hypervisor = VBoxManage::new(SystemRunner);
    let connector = Ssh2Connector::new(&config);
    let invocation = std::env::args().next().unwrap_or_default();

    let mut dispatcher = Dispatcher::new(&config, &hypervisor, &connector, std::io::stdout());
    Ok(dispatcher.exit(&invocation, cli.command.as_deref(), &cli.args))
}
