//! Core logic for the countup display.
//! This crate is the single source of truth for elapsed-time, view-mode and
//! milestone invariants. Hosts only supply a clock and presenters.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{parse_reference, ConfigError, CountupConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::elapsed::{calendar_month_count, compute, DurationBreakdown};
pub use model::milestone::{celebration_label, history_label, Celebration, MilestoneSet};
pub use model::view_mode::{InvalidViewMode, ViewMode};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};
pub use repo::milestone_repo::MilestoneRepository;
pub use service::app::{
    App, CelebrationPresenter, DisplaySurface, Event, Frame, HistoryPresenter, MilestoneHistory,
    Presenters, EMPTY_HISTORY_NOTICE,
};
pub use service::event_loop::{run_event_loop, Command, LoopSummary, StopReason};
pub use service::milestone_tracker::{MilestoneOutcome, MilestoneTracker};
pub use view::formatter::{format_elapsed, format_elapsed_with};
pub use view::number_format::NumberFormat;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
