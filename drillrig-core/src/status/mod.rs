//! Status reporting
//!
//! A scrolling text log under a fixed header, sized for the rig's LCD.

pub mod log;

pub use log::{StatusLog, DISPLAY_LINES, HEADER_LINES, LOG_CAPACITY, MAX_LINE_LEN};
