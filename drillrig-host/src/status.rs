//! Status sink for the host
//!
//! Keeps the same bounded log the rig display shows and mirrors every
//! line to tracing.

use drillrig_core::status::StatusLog;
use drillrig_core::traits::{StatusHeader, StatusSink};
use tracing::{debug, info};

/// [`StatusLog`] that also emits each line as a tracing event
#[derive(Debug, Default)]
pub struct TracingSink {
    log: StatusLog,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mirrored log
    pub fn log(&self) -> &StatusLog {
        &self.log
    }

    /// Display text: header then log lines
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.log.render(&mut out);
        out
    }
}

impl StatusSink for TracingSink {
    fn write_line(&mut self, line: &str) {
        info!(target: "drillrig::status", "{}", line);
        self.log.write_line(line);
    }

    fn reset(&mut self) {
        debug!("status log cleared");
        self.log.reset();
    }

    fn set_header(&mut self, header: StatusHeader) {
        let prev = self.log.header();
        if prev.phase != header.phase {
            info!(from = prev.phase.name(), to = header.phase.name(), "phase changed");
        } else if prev.step != header.step {
            debug!(phase = header.phase.name(), step = header.step, "step advanced");
        }
        self.log.set_header(header);
    }
}
