//! Text rendering of elapsed-time breakdowns.
//!
//! # Responsibility
//! - Turn a `DurationBreakdown` plus `ViewMode` into the display string.
//!
//! # Invariants
//! - Rendering is pure and total over the four view modes.

pub mod formatter;
pub mod number_format;
