//! Mushroom Monitoring Log CLI
//!
//! Command-line front end for the mushroom-log-core library. It adds:
//! - An interactive session (fill → save → copy to a spreadsheet)
//! - Script mode for unattended runs (`--script FILE`)
//! - TOML configuration (clipboard command, download directory, ...)
//! - Plain-text rendering of the form, targets and history

use anyhow::{Context, Result};
use clap::Parser;
use mushroom_log_core::{PhaseKey, Session};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

mod commands;
mod config;
mod render;
mod shell;

use shell::{Shell, ShellOptions};

/// Mushroom Monitoring Log - record daily cultivation checks and export them
#[derive(Parser, Debug)]
#[command(name = "mushroom-log")]
#[command(about = "Record mushroom cultivation monitoring entries and export them as TSV/CSV", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Read commands from a file instead of the terminal
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Phase to start on (colonization, fruiting, leather)
    #[arg(short, long, value_name = "PHASE")]
    phase: Option<PhaseKey>,

    /// Directory CSV downloads are written to
    #[arg(short, long, value_name = "DIR")]
    download_dir: Option<PathBuf>,

    /// Confirm `clear` without asking
    #[arg(short = 'y', long)]
    yes: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Mushroom Log CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using core library v{}", mushroom_log_core::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    // Command-line flags win over the file
    let mut session_config = app_config.session_config();
    if let Some(phase) = args.phase {
        session_config = session_config.with_initial_phase(phase);
    }
    if let Some(dir) = &args.download_dir {
        session_config = session_config.with_download_dir(dir.clone());
    }
    log::debug!("Session configuration: {:?}", session_config);

    let mut session = Session::from_config(&session_config)
        .context("Failed to set up the clipboard")?;

    let stdout = io::stdout();
    let summary = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script: {:?}", path))?;
            let options = ShellOptions {
                interactive: false,
                assume_yes: args.yes,
            };
            Shell::new(&mut session, BufReader::new(file), stdout.lock(), options).run()?
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            if interactive {
                println!("🍄 Mushroom Monitoring System");
                println!("Fill → Save → Copy to Google Sheets. Type `help` for commands.");
                println!("Data is only kept for this session. Download a CSV backup regularly!\n");
            }
            let options = ShellOptions {
                interactive,
                assume_yes: args.yes,
            };
            Shell::new(&mut session, stdin.lock(), stdout.lock(), options).run()?
        }
    };

    log::debug!("Run summary: {:?}", summary);
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
