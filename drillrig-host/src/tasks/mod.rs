//! Host tasks
//!
//! A reader thread turns stdin lines into command tokens; the tick loop
//! runs on the main thread and takes at most one token per tick.

pub mod commands;
pub mod tick;

pub use commands::spawn_stdin_reader;
pub use tick::{run, TickOptions, DEFAULT_TICK_MS};
