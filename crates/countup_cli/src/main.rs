//! Terminal host for the countup display.
//!
//! # Responsibility
//! - Parse flags into a `CountupConfig` and open the milestone store.
//! - Provide terminal presenters and map keyboard lines to commands.

mod terminal;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use countup_core::db::open_db;
use countup_core::{
    compute, default_log_level, format_elapsed_with, init_logging, parse_reference,
    run_event_loop, App, Clock, Command, CountupConfig, DisplaySurface, Event, KeyValueStore,
    LogLevel, MemoryKeyValueStore, SqliteKeyValueStore, SystemClock, ViewMode,
};
use log::{info, warn};
use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;
use terminal::{EchoedLines, TerminalPresenters};

#[derive(Parser, Debug)]
#[command(version, about = "Count up from a fixed instant and celebrate month milestones")]
struct Cli {
    /// Reference instant, ISO-8601 with explicit offset
    #[arg(long, value_name = "DATETIME")]
    since: Option<String>,

    /// SQLite file holding celebrated milestones
    #[arg(long, value_name = "PATH", default_value = "countup.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Tick cadence in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    tick_ms: u64,

    /// Locale for digit grouping, e.g. de-DE; defaults to the host locale
    #[arg(long, value_name = "TAG")]
    locale: Option<String>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Mode {
    /// Live display; Enter cycles the view, `h` shows history, `q` quits
    Watch,
    /// Print one frame without touching milestones and exit
    Show {
        /// View mode index 0..3
        #[arg(long, default_value_t = 0)]
        mode: u8,
    },
    /// Print celebrated milestones and exit
    History,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        let level = match &cli.log_level {
            Some(raw) => raw.parse::<LogLevel>().map_err(|err| anyhow!("{err}"))?,
            None => default_log_level(),
        };
        init_logging(level, dir).map_err(|err| anyhow!("initializing logging: {err}"))?;
    }

    let config = build_config(&cli)?;

    // Storage failure degrades to a session-only store.
    match open_db(&cli.db) {
        Ok(conn) => run(&cli, &config, SqliteKeyValueStore::new(&conn)),
        Err(err) => {
            warn!(
                "event=store_fallback module=cli status=degraded path={} error={}",
                cli.db.display(),
                err
            );
            eprintln!(
                "warning: cannot open {} ({err}); milestones will not be saved",
                cli.db.display()
            );
            run(&cli, &config, MemoryKeyValueStore::new())
        }
    }
}

fn build_config(cli: &Cli) -> Result<CountupConfig> {
    let mut config = CountupConfig::default();
    if let Some(since) = &cli.since {
        config.reference = parse_reference(since)?;
    }
    config.tick_interval = Duration::from_millis(cli.tick_ms);
    config.locale = cli.locale.clone();
    config.validate()?;
    Ok(config)
}

fn run<S: KeyValueStore>(cli: &Cli, config: &CountupConfig, store: S) -> Result<()> {
    let mut app = App::new(config, store);
    let mut presenters = TerminalPresenters::stdout();
    let clock = SystemClock;

    match cli.command.unwrap_or(Mode::Watch) {
        Mode::Watch => {
            // Typed lines are echoed only when stdin is a terminal.
            let echoed = std::io::stdin().is_terminal().then(EchoedLines::default);
            if let Some(echoed) = &echoed {
                presenters = presenters.erasing_echoes(echoed.clone());
            }
            let (tx, rx) = mpsc::channel();
            spawn_input_reader(tx, echoed);
            let summary = run_event_loop(
                &mut app,
                &clock,
                &mut presenters,
                &rx,
                config.tick_interval,
            );
            presenters.finish();
            info!(
                "event=cli_exit module=cli status=ok ticks={} reason={:?}",
                summary.ticks,
                summary.reason
            );
        }
        Mode::Show { mode } => {
            // Read-only preview: milestones are left for the live display.
            let mode = ViewMode::try_from(mode)?;
            let breakdown = compute(&clock.now(), &app.reference());
            let text = format_elapsed_with(&breakdown, mode, app.number_format());
            presenters.show_elapsed(&text);
            presenters.finish();
        }
        Mode::History => {
            app.dispatch(Event::ShowHistory, clock.now(), &mut presenters);
        }
    }
    Ok(())
}

/// Reads stdin lines on a helper thread; it only ever sends commands.
fn spawn_input_reader(tx: Sender<Command>, echoed: Option<EchoedLines>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(echoed) = &echoed {
                echoed.record();
            }
            let command = match line.trim() {
                "" | "m" => Command::AdvanceMode,
                "h" => Command::ShowHistory,
                "q" => Command::Shutdown,
                _ => continue,
            };
            if tx.send(command).is_err() || command == Command::Shutdown {
                break;
            }
        }
        // EOF drops `tx`, which stops the render loop.
    });
}
