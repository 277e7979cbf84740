mod error;
mod interfaces;
mod net;
mod report;

use std::io::{self, Write};
use std::process;

use clap::{Parser, ValueEnum};
use log::{debug, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::error::Result;
use crate::interfaces::{InterfaceSource, SystemInterfaces};
use crate::report::{ReportSettings, DEFAULT_BACKEND_PORT, DEFAULT_CONSTANTS_FILE};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Prints this machine's local IPv4 address for pointing a client at a dev backend.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Backend port used in the suggested URL
    #[arg(short, long, default_value_t = DEFAULT_BACKEND_PORT)]
    port: u16,

    /// File the address should be copied into
    #[arg(short, long, default_value = DEFAULT_CONSTANTS_FILE)]
    constants_file: String,

    /// Also list every external IPv4 interface found
    #[arg(short, long)]
    all: bool,

    /// Log verbosity (logs go to stderr)
    #[arg(short, long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

impl Args {
    fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            constants_file: self.constants_file.clone(),
            port: self.port,
        }
    }
}

/// Queries the source once and writes the report. Absence of an address is
/// not an error.
fn run<S, W>(source: &S, args: &Args, out: &mut W) -> Result<Option<String>>
where
    S: InterfaceSource + ?Sized,
    W: Write,
{
    let interfaces = source.interfaces()?;
    let address = net::find_local_ipv4(&interfaces);

    match &address {
        Some(address) => {
            info!("Using local address {address}");
            report::write_found(out, address, &args.report_settings())?;
            if args.all {
                let candidates = net::local_ipv4_candidates(&interfaces);
                report::write_candidates(out, &candidates)?;
            }
        }
        None => {
            debug!("No external IPv4 interface among {} entries", interfaces.len());
            report::write_not_found(out)?;
        }
    }
    out.flush()?;
    Ok(address)
}

fn start(args: &Args) -> Result<()> {
    TermLogger::init(
        args.log_level.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    debug!("{:?}", args);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&SystemInterfaces, args, &mut out)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = start(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
