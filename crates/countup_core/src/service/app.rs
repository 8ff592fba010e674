//! Application state and single event dispatcher.
//!
//! # Responsibility
//! - Own every piece of mutable session state (view mode, milestones).
//! - Turn `Tick`, `AdvanceMode` and `ShowHistory` events into calls on the
//!   presentation collaborators.
//!
//! # Invariants
//! - Events are handled synchronously, one at a time, through `&mut self`.
//!   No breakdown or mode is observable half-updated.
//! - A tick runs: breakdown -> milestone check -> format -> display.
//! - `AdvanceMode` renders immediately instead of waiting for the next tick.

use crate::config::CountupConfig;
use crate::model::elapsed::{compute, DurationBreakdown};
use crate::model::milestone::{history_label, Celebration};
use crate::model::view_mode::ViewMode;
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::milestone_repo::MilestoneRepository;
use crate::service::milestone_tracker::{MilestoneOutcome, MilestoneTracker};
use crate::view::formatter::format_elapsed_with;
use crate::view::number_format::NumberFormat;
use chrono::{DateTime, FixedOffset, Utc};
use log::{debug, warn};

/// Notice shown by the history presenter when nothing was celebrated yet.
pub const EMPTY_HISTORY_NOTICE: &str = "No milestones yet!";

/// Accepts the current elapsed-time text.
pub trait DisplaySurface {
    fn show_elapsed(&mut self, text: &str);
}

/// Shows (and later dismisses) one milestone celebration.
pub trait CelebrationPresenter {
    fn celebrate(&mut self, celebration: &Celebration);
}

/// Shows the celebrated milestones, newest first.
pub trait HistoryPresenter {
    fn show_history(&mut self, history: &MilestoneHistory);
}

/// Every collaborator the dispatcher talks to.
pub trait Presenters: DisplaySurface + CelebrationPresenter + HistoryPresenter {}

impl<T: DisplaySurface + CelebrationPresenter + HistoryPresenter> Presenters for T {}

/// Discrete inputs processed by [`App::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Periodic timer fired.
    Tick,
    /// User asked for the next view mode.
    AdvanceMode,
    /// User asked for the milestone history.
    ShowHistory,
}

/// Read-only history snapshot handed to [`HistoryPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneHistory {
    /// Celebrated months, largest first.
    pub months: Vec<u32>,
}

impl MilestoneHistory {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Lower-case labels in display order, e.g. `1 year and 6 months`.
    pub fn labels(&self) -> Vec<String> {
        self.months.iter().map(|month| history_label(*month)).collect()
    }
}

/// What one dispatched event produced, mainly for hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub mode: ViewMode,
    pub breakdown: DurationBreakdown,
    pub text: String,
    pub milestone: MilestoneOutcome,
}

/// Explicit session state driven by the render loop.
pub struct App<S: KeyValueStore> {
    reference: DateTime<FixedOffset>,
    numbers: NumberFormat,
    view_mode: ViewMode,
    tracker: MilestoneTracker<S>,
}

impl<S: KeyValueStore> App<S> {
    /// Builds session state, loading celebrated milestones from `store`.
    ///
    /// An unusable `config.locale` falls back to the host locale; call
    /// `CountupConfig::validate` first to reject it instead.
    pub fn new(config: &CountupConfig, store: S) -> Self {
        let repo = MilestoneRepository::new(store, config.storage_key.clone());
        let numbers = NumberFormat::resolve(config.locale.as_deref()).unwrap_or_else(|err| {
            warn!("event=locale_fallback module=app status=degraded error={err}");
            NumberFormat::system()
        });
        Self {
            reference: config.reference,
            numbers,
            view_mode: ViewMode::default(),
            tracker: MilestoneTracker::load(repo),
        }
    }

    pub fn reference(&self) -> DateTime<FixedOffset> {
        self.reference
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Digit grouping used for the totals modes.
    pub fn number_format(&self) -> &NumberFormat {
        &self.numbers
    }

    pub fn history(&self) -> MilestoneHistory {
        MilestoneHistory {
            months: self.tracker.celebrated().descending(),
        }
    }

    /// Handles one event to completion.
    ///
    /// Returns the rendered frame for `Tick`/`AdvanceMode`, `None` for
    /// `ShowHistory`.
    pub fn dispatch<P: Presenters>(
        &mut self,
        event: Event,
        now: DateTime<Utc>,
        presenters: &mut P,
    ) -> Option<Frame> {
        match event {
            Event::Tick => Some(self.tick(now, presenters)),
            Event::AdvanceMode => {
                self.view_mode = self.view_mode.advance();
                debug!(
                    "event=view_mode_advance module=app status=ok mode={}",
                    self.view_mode.index()
                );
                Some(self.tick(now, presenters))
            }
            Event::ShowHistory => {
                presenters.show_history(&self.history());
                None
            }
        }
    }

    fn tick<P: Presenters>(&mut self, now: DateTime<Utc>, presenters: &mut P) -> Frame {
        let breakdown = compute(&now, &self.reference);

        let milestone = self.tracker.check(
            breakdown.total_months,
            now.with_timezone(self.reference.offset()),
        );
        if let MilestoneOutcome::Celebrated(celebration) = &milestone {
            presenters.celebrate(celebration);
        }

        let text = format_elapsed_with(&breakdown, self.view_mode, &self.numbers);
        presenters.show_elapsed(&text);

        Frame {
            mode: self.view_mode,
            breakdown,
            text,
            milestone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MilestoneHistory;

    #[test]
    fn history_labels_follow_month_order() {
        let history = MilestoneHistory {
            months: vec![18, 12, 1],
        };
        assert_eq!(
            history.labels(),
            vec!["1 year and 6 months", "1 year", "1 month"]
        );
        assert!(!history.is_empty());
    }
}
