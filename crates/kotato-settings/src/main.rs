//! Kotatogram settings manager: headless host.
//!
//! Loads `<working-dir>/tdata/kotato-settings-*.json` on start, accepts
//! setting changes as console commands on stdin, rewrites the custom document
//! a few seconds after each burst of changes and flushes on exit.
//!
//! # Usage
//!
//! ```text
//! kotato-settings [OPTIONS]
//!
//! Options:
//!   --working-dir    <DIR>  Directory containing tdata/ [default: .]
//!   --write-delay-ms <MS>   Debounce window for writes [default: 5000]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                | Default | Description              |
//! |-------------------------|---------|--------------------------|
//! | `KOTATO_WORKING_DIR`    | `.`     | Directory containing tdata/ |
//! | `KOTATO_WRITE_DELAY_MS` | `5000`  | Debounce window (ms)     |
//!
//! Log verbosity follows `RUST_LOG` (default `info`).
//!
//! # Event loop
//!
//! ```text
//! stdin line ──► parse_command ──► execute ──► SettingsManager (state + scheduler)
//!                                                      │
//! service.tick() ◄── sleeps until the pending deadline ┘ ──► custom file
//! Ctrl-C / EOF / quit ──► service.finish() (forced flush) ──► exit
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kotato_settings::application::lifecycle::SettingsService;
use kotato_settings::infrastructure::console::{execute, parse_command};
use kotato_settings::infrastructure::storage::files::FileStorage;
use kotato_settings_core::ManagerConfig;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Kotatogram settings manager.
#[derive(Debug, Parser)]
#[command(
    name = "kotato-settings",
    about = "Loads, edits and persists Kotatogram JSON settings",
    version
)]
struct Cli {
    /// Directory that contains (or will contain) the `tdata` folder.
    #[arg(long, default_value = ".", env = "KOTATO_WORKING_DIR")]
    working_dir: PathBuf,

    /// Milliseconds to wait after the first change before saving.
    ///
    /// Further changes inside the window are saved together and do not
    /// extend it.
    #[arg(long, default_value_t = 5000, env = "KOTATO_WRITE_DELAY_MS")]
    write_delay_ms: u64,
}

impl Cli {
    fn into_manager_config(self) -> ManagerConfig {
        ManagerConfig {
            working_dir: self.working_dir,
            write_delay: Duration::from_millis(self.write_delay_ms),
            ..ManagerConfig::default()
        }
    }
}

/// One wake-up of the host loop.
enum Event {
    Line(Option<String>),
    InputError(std::io::Error),
    Flushed,
    Interrupted,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_manager_config();
    info!(
        "settings manager starting (data dir {}, write delay {:?})",
        config.data_dir().display(),
        config.write_delay
    );

    let mut service = SettingsService::new();
    service.start(FileStorage::new(&config), &config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        // `next_line` is cancel safe, so losing the race to the timer or
        // Ctrl-C drops no input.
        let event = tokio::select! {
            line = lines.next_line() => match line {
                Ok(line) => Event::Line(line),
                Err(e) => Event::InputError(e),
            },
            () = service.tick() => Event::Flushed,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    error!("failed to listen for Ctrl+C signal: {e}");
                }
                Event::Interrupted
            }
        };

        match event {
            Event::Line(Some(line)) => match parse_command(&line) {
                Ok(Some(command)) => {
                    let reply = execute(command, &mut service);
                    if let Some(text) = reply.output {
                        println!("{text}");
                    }
                    if reply.quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => println!("{e}"),
            },
            Event::Line(None) => {
                info!("stdin closed");
                break;
            }
            Event::InputError(e) => {
                error!("failed to read stdin: {e}");
                break;
            }
            Event::Flushed => {}
            Event::Interrupted => {
                info!("received Ctrl+C, shutting down");
                break;
            }
        }
    }

    service.finish();
    info!("settings manager stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
