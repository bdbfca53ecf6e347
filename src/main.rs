use anyhow::{Context, Result};
use clap::Parser;
use rebuild_agent::cli::{Cli, Command};
use rebuild_agent::config::{self, AgentConfig};
use rebuild_agent::host::HostRoot;
use rebuild_agent::output::{self, StdoutTransport};
use rebuild_agent::profile::assemble::Assembler;
use rebuild_agent::readers::{self, AGENT_VERSION};

fn main() -> Result<()> {
    let cli = Cli::parse();
    rebuild_agent::logging::init(cli.verbose);

    let mut config = config::load(cli.config.as_deref());
    if let Some(root) = cli.root {
        config.host.root = root;
    }
    config.output.pretty |= cli.pretty;

    match cli.command {
        Command::Profile => cmd_profile(&config)?,
        Command::Banner => cmd_banner(&config)?,
        Command::Version => cmd_version(),
        Command::Completions { shell } => rebuild_agent::cli::print_completions(shell),
    }

    Ok(())
}

fn cmd_profile(config: &AgentConfig) -> Result<()> {
    let profile = Assembler::new(config).assemble()?;

    // TODO: hand the profile to the Rebuild core over the network once its transport exists
    output::emit(&profile, &mut StdoutTransport, config.output.pretty)
        .context("Emitting system profile")?;
    Ok(())
}

fn cmd_banner(config: &AgentConfig) -> Result<()> {
    let host = HostRoot::new(&config.host.root);
    let initrd = readers::read_build_tag(&host)
        .context("Failed to get the Rebuild Initrd version from file")?;

    output::print_banner(AGENT_VERSION, &initrd).context("Writing banner")?;
    Ok(())
}

fn cmd_version() {
    let kernel = readers::read_kernel_release();
    println!("rebuild-agent {}", AGENT_VERSION);
    if !kernel.is_empty() {
        println!("kernel {}", kernel);
    }
}
