use crate::error::{Error, Result};
use crate::profile::SystemProfile;
use colored::Colorize;
use figlet_rs::FIGfont;
use std::io::{self, Write};

/// Destination for a serialized profile.
pub trait Transport {
    fn send(&mut self, payload: &[u8]) -> Result<()>;
}

/// Writes the profile to standard output.
#[derive(Debug, Default)]
pub struct StdoutTransport;

impl Transport for StdoutTransport {
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        WriterTransport::new(std::io::stdout().lock()).send(payload)
    }
}

#[derive(Debug)]
pub struct WriterTransport<W: Write> {
    writer: W,
}

impl<W: Write> WriterTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for WriterTransport<W> {
    fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.writer
            .write_all(payload)
            .and_then(|_| self.writer.flush())
            .map_err(Error::Transport)
    }
}

/// Serialize the profile as one newline-terminated JSON document.
pub fn to_json(profile: &SystemProfile, pretty: bool) -> Result<Vec<u8>> {
    let mut out = if pretty {
        serde_json::to_vec_pretty(profile)?
    } else {
        serde_json::to_vec(profile)?
    };
    out.push(b'\n');
    Ok(out)
}

pub fn emit(profile: &SystemProfile, transport: &mut dyn Transport, pretty: bool) -> Result<()> {
    transport.send(&to_json(profile, pretty)?)
}

const BANNER_TEXT: &str = "rebuild agent";

/// Console banner shown on the live system.
pub fn print_banner(agent_version: &str, initrd_version: &str) -> io::Result<()> {
    render_banner(&mut io::stdout().lock(), agent_version, initrd_version)
}

/// Large-letter title followed by the version line.
pub fn render_banner<W: Write>(
    w: &mut W,
    agent_version: &str,
    initrd_version: &str,
) -> io::Result<()> {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(BANNER_TEXT).map(|figure| figure.to_string()));
    match art {
        Some(art) => write!(w, "{}", art)?,
        None => writeln!(w, "{}", BANNER_TEXT.bold())?,
    }
    writeln!(w)?;
    writeln!(
        w,
        "{} - {}",
        format!("Agent v{}", agent_version).green(),
        format!("Initrd v{}", initrd_version).yellow()
    )
}
