//! Bounded status log
//!
//! Lines are kept FIFO: once the log is full the oldest line is dropped.
//! The header is never part of the scrolling region and survives a reset.

use core::fmt::{self, Write};

use heapless::{Deque, String};

use crate::traits::{StatusHeader, StatusSink};

/// Total lines on the display
pub const DISPLAY_LINES: usize = 23;

/// Lines reserved for the header
pub const HEADER_LINES: usize = 3;

/// Scrolling lines kept below the header
pub const LOG_CAPACITY: usize = DISPLAY_LINES - HEADER_LINES;

/// Longest stored line in bytes; longer lines are truncated
pub const MAX_LINE_LEN: usize = 96;

/// One stored log line
pub type LogLine = String<MAX_LINE_LEN>;

/// Header plus scrolling log
#[derive(Debug, Clone, Default)]
pub struct StatusLog {
    header: StatusHeader,
    lines: Deque<LogLine, LOG_CAPACITY>,
}

impl StatusLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Current header
    pub fn header(&self) -> StatusHeader {
        self.header
    }

    /// Number of stored lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no lines are stored
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stored lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_str())
    }

    /// Most recent line
    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(|line| line.as_str())
    }

    /// Render header and log as display text
    pub fn render<W: Write>(&self, out: &mut W) -> fmt::Result {
        let h = &self.header;
        writeln!(out, "Phase: {}", h.phase.name())?;
        writeln!(out, "Step: {}", h.step)?;
        write!(out, "Running: {}", if h.running { "yes" } else { "no" })?;
        for line in self.lines() {
            write!(out, "\n{}", line)?;
        }
        Ok(())
    }
}

impl StatusSink for StatusLog {
    fn write_line(&mut self, line: &str) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }
        let _ = self.lines.push_back(truncate(line));
    }

    fn reset(&mut self) {
        self.lines.clear();
    }

    fn set_header(&mut self, header: StatusHeader) {
        self.header = header;
    }
}

/// Copy `line`, cutting it at the last char boundary that fits
fn truncate(line: &str) -> LogLine {
    let mut end = line.len().min(MAX_LINE_LEN);
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::new();
    let _ = out.push_str(&line[..end]);
    out
}
