use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rebuild-agent",
    about = "Rebuild agent - collects a hardware profile of the host it runs on",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Read configuration from this file instead of the system and user config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile the host tree under this directory instead of / (lsblk gets --sysroot)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Log at debug level regardless of LOGLEVEL
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Profile this host and write the profile as JSON to stdout
    Profile,

    /// Show the agent banner with agent and initrd versions
    Banner,

    /// Print the agent version and kernel release
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (auto-detected if omitted)
        shell: Option<Shell>,
    },
}

/// Print shell completions to stdout.
pub fn print_completions(shell: Option<Shell>) {
    let shell = shell.or_else(Shell::from_env).unwrap_or_else(|| {
        eprintln!(
            "Could not detect shell. Specify one: rebuild-agent completions bash|zsh|fish|elvish|powershell"
        );
        std::process::exit(1);
    });
    clap_complete::generate(
        shell,
        &mut Cli::command(),
        "rebuild-agent",
        &mut std::io::stdout(),
    );
}
