//! Display mode selected by the user.
//!
//! # Invariants
//! - Exactly four modes exist; `advance` wraps modulo 4.
//! - Mode is session-only state and starts at [`ViewMode::Default`].

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of four mutually exclusive formats for the same breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Years, days, hours, minutes, seconds.
    #[default]
    Default,
    /// Calendar months, weeks, days.
    MonthsAndWeeks,
    /// Total days, hours, minutes.
    Totals,
    /// Total days only.
    Simple,
}

impl ViewMode {
    pub const COUNT: u8 = 4;
    pub const ALL: [ViewMode; 4] = [
        Self::Default,
        Self::MonthsAndWeeks,
        Self::Totals,
        Self::Simple,
    ];

    /// Stable index in `0..4`.
    pub fn index(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::MonthsAndWeeks => 1,
            Self::Totals => 2,
            Self::Simple => 3,
        }
    }

    /// Mode for an index the caller has already validated.
    ///
    /// # Panics
    /// Panics when `index >= 4`; an out-of-range mode is a programming error.
    /// Use `ViewMode::try_from` for untrusted input.
    pub fn from_index(index: u8) -> Self {
        match Self::try_from(index) {
            Ok(mode) => mode,
            Err(err) => panic!("{err}"),
        }
    }

    /// Next mode, wrapping from `Simple` back to `Default`.
    #[must_use]
    pub fn advance(self) -> Self {
        Self::from_index((self.index() + 1) % Self::COUNT)
    }
}

/// Index outside `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidViewMode(pub u8);

impl Display for InvalidViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid view mode index {}; expected 0..{}",
            self.0,
            ViewMode::COUNT
        )
    }
}

impl Error for InvalidViewMode {}

impl TryFrom<u8> for ViewMode {
    type Error = InvalidViewMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Default),
            1 => Ok(Self::MonthsAndWeeks),
            2 => Ok(Self::Totals),
            3 => Ok(Self::Simple),
            other => Err(InvalidViewMode(other)),
        }
    }
}
