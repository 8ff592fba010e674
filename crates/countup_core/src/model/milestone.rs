//! Month milestones and their display labels.
//!
//! # Responsibility
//! - Hold the set of whole-month marks already celebrated.
//! - Render milestone labels for celebrations and the history list.
//!
//! # Invariants
//! - Every member of a `MilestoneSet` is a positive month count.
//! - Members are only ever added, never removed.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeSet;

/// Celebrated month counts. Serializes as an ascending JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct MilestoneSet(BTreeSet<u32>);

impl MilestoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, month: u32) -> bool {
        self.0.contains(&month)
    }

    /// Adds `month`; returns `false` when it was already present or zero.
    pub fn insert(&mut self, month: u32) -> bool {
        month > 0 && self.0.insert(month)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ascending iteration.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Largest month first, the order the history list is shown in.
    pub fn descending(&self) -> Vec<u32> {
        self.0.iter().rev().copied().collect()
    }
}

impl FromIterator<u32> for MilestoneSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = Self::new();
        for month in iter {
            set.insert(month);
        }
        set
    }
}

/// Payload handed to the celebration presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    /// Month count being celebrated.
    pub month: u32,
    /// Capitalized label, e.g. `1 Month` or `1 Year and 6 Months`.
    pub label: String,
    /// Instant the milestone was detected, in the reference offset.
    pub celebrated_at: DateTime<FixedOffset>,
}

impl Celebration {
    pub fn new(month: u32, celebrated_at: DateTime<FixedOffset>) -> Self {
        Self {
            month,
            label: celebration_label(month),
            celebrated_at,
        }
    }

    /// Headline shown by presenters.
    pub fn message(&self) -> String {
        format!("🎉 {} Together! 🎉", self.label)
    }
}

/// `N Month(s)` below a year, otherwise `Y Year(s)[ and R Month(s)]`.
pub fn celebration_label(month: u32) -> String {
    month_label(month, ("Year", "Years"), ("Month", "Months"))
}

/// Lower-case variant used in the history list.
pub fn history_label(month: u32) -> String {
    month_label(month, ("year", "years"), ("month", "months"))
}

fn month_label(
    month: u32,
    year_words: (&str, &str),
    month_words: (&str, &str),
) -> String {
    if month < 12 {
        return counted(month, month_words);
    }

    let years = month / 12;
    let remaining = month % 12;
    let mut label = counted(years, year_words);
    if remaining > 0 {
        label.push_str(" and ");
        label.push_str(&counted(remaining, month_words));
    }
    label
}

fn counted(value: u32, (singular, plural): (&str, &str)) -> String {
    let noun = if value == 1 { singular } else { plural };
    format!("{value} {noun}")
}
