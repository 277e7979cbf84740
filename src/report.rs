use crate::net::NetInterface;
use std::io::{self, Write};

pub const DEFAULT_CONSTANTS_FILE: &str = "lib/core/constants/api_constants.dart";
pub const DEFAULT_BACKEND_PORT: u16 = 3000;

/// Where the user should paste the address, and which port the backend uses.
pub struct ReportSettings {
    pub constants_file: String,
    pub port: u16,
}

pub fn backend_url(address: &str, port: u16) -> String {
    format!("http://{address}:{port}")
}

pub fn write_found<W: Write>(out: &mut W, address: &str, settings: &ReportSettings) -> io::Result<()> {
    writeln!(out, "🌐 Your local IP address is: {address}")?;
    writeln!(out, "📝 Update this in: {}", settings.constants_file)?;
    writeln!(
        out,
        "🔗 Backend URL should be: {}",
        backend_url(address, settings.port)
    )
}

pub fn write_not_found<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "❌ Could not find local IP address")?;
    writeln!(out, "💡 Make sure you are connected to a network")
}

/// Lists every candidate, but only when there is a choice to make.
pub fn write_candidates<W: Write>(out: &mut W, candidates: &[&NetInterface]) -> io::Result<()> {
    if candidates.len() < 2 {
        return Ok(());
    }
    writeln!(out, "All candidates (first one is used):")?;
    for iface in candidates {
        writeln!(out, "  {}: {}", iface.name, iface.address)?;
    }
    Ok(())
}
