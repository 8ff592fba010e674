//! Terminal presenters.
//!
//! # Responsibility
//! - Redraw the elapsed-time line in place on every frame.
//! - Print celebrations and the milestone history above the live line.
//! - Erase input lines the terminal echoed below the live line.

use countup_core::{
    Celebration, CelebrationPresenter, DisplaySurface, HistoryPresenter, MilestoneHistory,
    EMPTY_HISTORY_NOTICE,
};
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const CLEAR_LINE: &str = "\r\x1b[2K";
const CLEAR_ROW_ABOVE: &str = "\x1b[1A\r\x1b[2K";

/// Count of typed lines the terminal echoed since the last redraw.
///
/// The stdin reader records lines; the presenters consume the count.
#[derive(Debug, Clone, Default)]
pub struct EchoedLines(Arc<AtomicUsize>);

impl EchoedLines {
    pub fn record(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn take(&self) -> usize {
        self.0.swap(0, Ordering::SeqCst)
    }
}

/// Writes every collaborator's output to one terminal stream.
pub struct TerminalPresenters<W: Write> {
    out: W,
    line_open: bool,
    echoed: Option<EchoedLines>,
}

impl TerminalPresenters<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenters<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line_open: false,
            echoed: None,
        }
    }

    /// Clears echoed input rows before each redraw.
    pub fn erasing_echoes(mut self, echoed: EchoedLines) -> Self {
        self.echoed = Some(echoed);
        self
    }

    /// Ends the live line so the shell prompt starts on a fresh row.
    pub fn finish(&mut self) {
        if self.line_open {
            self.emit(|out| writeln!(out));
            self.line_open = false;
        }
    }

    /// Prints a full line above the live display.
    fn print_block(&mut self, lines: &[String]) {
        let rewind = self.rewind_echoes();
        self.emit(|out| {
            write!(out, "{rewind}{CLEAR_LINE}")?;
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(())
        });
        self.line_open = false;
    }

    // Each echoed line pushed the cursor one row down; step back over them.
    fn rewind_echoes(&self) -> String {
        let rows = self.echoed.as_ref().map_or(0, EchoedLines::take);
        CLEAR_ROW_ABOVE.repeat(rows)
    }

    // A broken stdout must not take the render loop down with it.
    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) {
        let result = write(&mut self.out).and_then(|()| self.out.flush());
        if let Err(err) = result {
            log::warn!("event=terminal_write module=cli status=error error={err}");
        }
    }
}

impl<W: Write> DisplaySurface for TerminalPresenters<W> {
    fn show_elapsed(&mut self, text: &str) {
        let rewind = self.rewind_echoes();
        self.emit(|out| write!(out, "{rewind}{CLEAR_LINE}{text}"));
        self.line_open = true;
    }
}

impl<W: Write> CelebrationPresenter for TerminalPresenters<W> {
    fn celebrate(&mut self, celebration: &Celebration) {
        let date = celebration.celebrated_at.format("%-m/%-d/%Y").to_string();
        self.print_block(&[celebration.message(), format!("   {date}")]);
    }
}

impl<W: Write> HistoryPresenter for TerminalPresenters<W> {
    fn show_history(&mut self, history: &MilestoneHistory) {
        if history.is_empty() {
            self.print_block(&[EMPTY_HISTORY_NOTICE.to_string()]);
            return;
        }

        let mut lines = vec!["🎉 Milestone History".to_string()];
        lines.extend(history.labels().into_iter().map(|label| format!("  - {label}")));
        self.print_block(&lines);
    }
}
