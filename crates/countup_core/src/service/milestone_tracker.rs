//! Milestone tracker state machine.
//!
//! # Responsibility
//! - Decide, once per tick, whether a month milestone becomes celebrated.
//! - Persist the celebrated set on every transition.
//!
//! # Invariants
//! - At most one milestone transitions per `check` call.
//! - The scan runs from the current month count down to 1 and stops at the
//!   first uncelebrated month.
//! - Only the current month count is surfaced as a [`Celebration`]. Older
//!   months found by later scans are marked celebrated silently, one per
//!   call.
//! - The set is persisted before the outcome is returned. Persistence
//!   failures are logged and swallowed; memory stays authoritative.

use crate::model::milestone::{Celebration, MilestoneSet};
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::milestone_repo::MilestoneRepository;
use chrono::{DateTime, FixedOffset};
use log::{info, warn};

/// Result of one milestone check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MilestoneOutcome {
    /// Nothing left to mark for this month count.
    Idle,
    /// The newest month was marked; the presenter should celebrate it.
    Celebrated(Celebration),
    /// An older, skipped month was marked without a celebration.
    MarkedSilently(u32),
}

/// Owns the in-memory celebrated set and its persistence.
pub struct MilestoneTracker<S: KeyValueStore> {
    repo: MilestoneRepository<S>,
    celebrated: MilestoneSet,
}

impl<S: KeyValueStore> MilestoneTracker<S> {
    /// Loads the persisted set once; corrupt or missing data starts empty.
    pub fn load(repo: MilestoneRepository<S>) -> Self {
        let celebrated = repo.load();
        info!(
            "event=milestone_tracker_init module=tracker status=ok key={} celebrated={}",
            repo.key(),
            celebrated.len()
        );
        Self { repo, celebrated }
    }

    /// Read-only view of every celebrated month.
    pub fn celebrated(&self) -> &MilestoneSet {
        &self.celebrated
    }

    /// Applies the transition rule for `month_count` whole months elapsed.
    ///
    /// `now` only stamps the celebration payload.
    pub fn check(&mut self, month_count: i64, now: DateTime<FixedOffset>) -> MilestoneOutcome {
        if month_count <= 0 {
            return MilestoneOutcome::Idle;
        }
        let newest = u32::try_from(month_count).unwrap_or(u32::MAX);

        let Some(month) = (1..=newest).rev().find(|m| !self.celebrated.contains(*m)) else {
            return MilestoneOutcome::Idle;
        };

        self.celebrated.insert(month);
        self.persist(month);

        if month == newest {
            info!(
                "event=milestone_celebrated module=tracker status=ok month={}",
                month
            );
            MilestoneOutcome::Celebrated(Celebration::new(month, now))
        } else {
            info!(
                "event=milestone_backfilled module=tracker status=ok month={} newest={}",
                month, newest
            );
            MilestoneOutcome::MarkedSilently(month)
        }
    }

    fn persist(&self, month: u32) {
        if let Err(err) = self.repo.save(&self.celebrated) {
            warn!(
                "event=milestones_save module=tracker status=error month={} error={}",
                month, err
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MilestoneOutcome, MilestoneTracker};
    use crate::repo::kv_repo::MemoryKeyValueStore;
    use crate::repo::milestone_repo::MilestoneRepository;
    use chrono::DateTime;

    #[test]
    fn non_positive_month_counts_are_idle() {
        let store = MemoryKeyValueStore::new();
        let mut tracker = MilestoneTracker::load(MilestoneRepository::new(&store, "k"));
        let now = DateTime::parse_from_rfc3339("2024-06-01T00:00:00+03:00").unwrap();

        assert_eq!(tracker.check(0, now), MilestoneOutcome::Idle);
        assert_eq!(tracker.check(-5, now), MilestoneOutcome::Idle);
        assert!(tracker.celebrated().is_empty());
    }
}
