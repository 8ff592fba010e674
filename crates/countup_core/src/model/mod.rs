//! Domain model for the count-up display.
//!
//! # Responsibility
//! - Define the pure data shapes shared by formatter, tracker and dispatcher.
//!
//! # Invariants
//! - Nothing in this module performs I/O or reads the clock.

pub mod elapsed;
pub mod milestone;
pub mod view_mode;
