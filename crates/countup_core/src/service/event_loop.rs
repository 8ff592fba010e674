//! Render loop: periodic ticks plus user commands on one thread.
//!
//! # Responsibility
//! - Fire `Event::Tick` at a fixed cadence, starting immediately.
//! - Forward user commands to the dispatcher between ticks.
//! - Stop on `Command::Shutdown` or when every command sender is dropped.
//!
//! # Invariants
//! - Only the thread calling [`run_event_loop`] touches `App` state; other
//!   threads can only send [`Command`]s.
//! - A command never delays or doubles the periodic schedule: the next tick
//!   stays due at its scheduled deadline.

use crate::clock::Clock;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::app::{App, Event, Presenters};
use log::info;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// User-originated requests delivered over a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AdvanceMode,
    ShowHistory,
    Shutdown,
}

/// Why the loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    Disconnected,
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub commands: u64,
    pub reason: StopReason,
}

/// Runs the render loop until shutdown.
///
/// Dropping the last `Sender<Command>` cancels the loop like `Shutdown`.
pub fn run_event_loop<S, C, P>(
    app: &mut App<S>,
    clock: &C,
    presenters: &mut P,
    commands: &Receiver<Command>,
    tick_interval: Duration,
) -> LoopSummary
where
    S: KeyValueStore,
    C: Clock,
    P: Presenters,
{
    info!(
        "event=render_loop module=event_loop status=start tick_ms={}",
        tick_interval.as_millis()
    );

    let mut ticks = 0_u64;
    let mut handled = 0_u64;

    app.dispatch(Event::Tick, clock.now(), presenters);
    ticks += 1;
    let mut next_tick = Instant::now() + tick_interval;

    let reason = loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match commands.recv_timeout(wait) {
            Ok(Command::AdvanceMode) => {
                handled += 1;
                app.dispatch(Event::AdvanceMode, clock.now(), presenters);
            }
            Ok(Command::ShowHistory) => {
                handled += 1;
                app.dispatch(Event::ShowHistory, clock.now(), presenters);
            }
            Ok(Command::Shutdown) => break StopReason::Shutdown,
            Err(RecvTimeoutError::Disconnected) => break StopReason::Disconnected,
            Err(RecvTimeoutError::Timeout) => {
                app.dispatch(Event::Tick, clock.now(), presenters);
                ticks += 1;
                next_tick += tick_interval;
                // After a stall, resume from now instead of bursting.
                let now = Instant::now();
                if next_tick < now {
                    next_tick = now + tick_interval;
                }
            }
        }
    };

    info!(
        "event=render_loop module=event_loop status=stopped reason={:?} ticks={} commands={}",
        reason, ticks, handled
    );

    LoopSummary {
        ticks,
        commands: handled,
        reason,
    }
}
